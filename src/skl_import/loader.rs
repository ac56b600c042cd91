use super::{
    convert,
    parser::{Line, Parser},
    types::SklToLoad,
};
use crate::{
    rb_error::RbError,
    skeleton::{self, Lookup, Skeleton, NO_PARENT},
};
use log::{error, info, trace, warn};
use std::{
    fs::File,
    io::{BufRead, BufReader},
};

/// The only rig file version understood
const SUPPORTED_VERSION: i32 = 1;

/// Load a skeleton from an .skl rig file. Opens the file and calls
/// `process_skl`. You may call that directly if you have the rig data in
/// some other readable form.
///
/// # Errors
/// May return `RbError`
pub fn load(file: &SklToLoad) -> Result<Skeleton, RbError> {
    let handle = File::open(&file.filename)
        .inspect_err(|_| error!("Could not load file {}", file.filename))?;
    process_skl(file, BufReader::new(handle))
}

/// Builds a skeleton from rig file lines and generates its transforms and
/// inverse transforms. Called by `load` or can be used with any `BufRead`.
///
/// Nothing is returned on error, not even a partial skeleton.
///
/// # Errors
/// May return `RbError`
pub fn process_skl<R: BufRead>(
    file: &SklToLoad,
    reader: R,
) -> Result<Skeleton, RbError> {
    info!("Loading skeleton {:?}", file.filename);
    let mut skeleton = Skeleton::new();
    let mut parser = Parser::new();
    let mut version_seen = false;

    // Lines are read as bytes so stray non UTF-8 text, usually in comments,
    // doesn't stop the load
    for (number, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let text = String::from_utf8_lossy(&bytes);
        let number = number + 1;
        match parser.feed(&text) {
            Line::Version(version) => {
                if version != SUPPORTED_VERSION {
                    error!(
                        "Can't load skl file {}. Don't know how to load version {version}",
                        file.filename
                    );
                    return Err(RbError::UnsupportedVersion(version));
                }
                if version_seen && file.strict {
                    return Err(RbError::DuplicateVersion);
                }
                version_seen = true;
            }
            Line::BadVersion(line) => {
                error!(
                    "Can't load skl file {}. Unreadable version line {line:?}",
                    file.filename
                );
                return Err(RbError::UnreadableVersion(line.to_owned()));
            }
            Line::SectionStart(_) => {
                if !version_seen && file.strict {
                    return Err(RbError::MissingVersion);
                }
            }
            Line::Bone {
                id,
                name,
                parent_id,
            } => {
                if id == NO_PARENT {
                    return Err(RbError::ReservedBoneId);
                }
                if skeleton.contains_id(id) {
                    return Err(RbError::DuplicateBoneId(id));
                }
                trace!("line {number}: bone {id} {name} parent {parent_id}");
                skeleton.add_bone(name, id, parent_id);
            }
            Line::Pose {
                id,
                position,
                rotation,
            } => match skeleton.lookup(id) {
                Lookup::Found(index) => {
                    trace!("line {number}: pose for bone {id}");
                    skeleton.set_pose(
                        index,
                        convert::swap_position(position),
                        convert::convert_rotation(rotation),
                    );
                }
                Lookup::NoParent | Lookup::NotFound => {
                    if file.strict {
                        return Err(RbError::UnknownBoneId(id));
                    }
                    warn!("line {number}: skipping pose for bone {id}");
                }
            },
            Line::SectionEnd | Line::Ignored => {}
        }
    }

    if !version_seen && file.strict {
        return Err(RbError::MissingVersion);
    }

    skeleton::gen_inv_transforms(&mut skeleton)?;
    info!("Loaded {} bones", skeleton.len());
    Ok(skeleton)
}
