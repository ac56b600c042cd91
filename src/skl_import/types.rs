use crate::rb_error::RbError;
use serde::{Deserialize, Serialize};

/// Options for loading a rig file.
///
/// With `strict` off, pose lines for bones that were never declared are
/// skipped with a warning and the version line is optional. With `strict` on
/// those are errors, as is a second version line.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct SklToLoad {
    pub filename: String, // Used for load but not process_skl
    pub strict: bool,
}

impl SklToLoad {
    /// Options for a file with everything else left at default
    #[must_use]
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_owned(),
            ..Default::default()
        }
    }

    /// Reads options from YAML. Missing fields take their default values.
    ///
    /// # Errors
    /// May return `RbError`
    pub fn from_yaml(yaml: &str) -> Result<Self, RbError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
