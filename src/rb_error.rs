use std::{error, fmt};

/// Unified error type
///
/// Only conditions that abort a whole operation are errors. Problems that
/// just cause one line of a rig file to be skipped, such as a reference to an
/// unknown bone id in lenient mode, are logged as warnings instead.
#[derive(Debug)]
pub enum RbError {
    UnsupportedVersion(i32),
    UnreadableVersion(String),
    MissingVersion,
    DuplicateVersion,
    ReservedBoneId,
    DuplicateBoneId(i32),
    UnknownBoneId(i32),
    SingularTransform(i32),
    MalformedSkeleton,
    SerdeYamlError(Box<serde_yaml::Error>),
    StdIoError(std::io::Error),
}

impl error::Error for RbError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::SerdeYamlError(e) => Some(&**e),
            Self::StdIoError(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for RbError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnsupportedVersion(v) => {
                write!(f, "don't know how to load skl version {v}")
            }
            Self::UnreadableVersion(line) => {
                write!(f, "can't read a version number from \"{line}\"")
            }
            Self::MissingVersion => {
                write!(f, "skl file has no version line")
            }
            Self::DuplicateVersion => {
                write!(f, "skl file has more than one version line")
            }
            Self::ReservedBoneId => {
                write!(f, "bone id -1 is reserved for \"no parent\"")
            }
            Self::DuplicateBoneId(id) => {
                write!(f, "bone id {id} is declared more than once")
            }
            Self::UnknownBoneId(id) => write!(f, "unknown bone id {id}"),
            Self::SingularTransform(id) => {
                write!(f, "transform of bone {id} can not be inverted")
            }
            Self::MalformedSkeleton => {
                write!(f, "skeleton data has a misaligned or forward parent")
            }
            Self::SerdeYamlError(e) => {
                write!(f, "serde_yaml::Error: {e}")
            }
            Self::StdIoError(e) => write!(f, "std::io::Error: {}", e.kind()),
        }
    }
}

impl From<serde_yaml::Error> for RbError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::SerdeYamlError(Box::new(e))
    }
}

impl From<std::io::Error> for RbError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}
