//! Skeletal rig store with bind pose forward kinematics, and a loader for the
//! line based `.skl` rig file format.
//!
//! ```no_run
//! use skelrig::skl_import::{self, SklToLoad};
//!
//! let skeleton = skl_import::load(&SklToLoad::new("hero.skl"))?;
//! for (bone, inv) in skeleton.bones().iter().zip(skeleton.inv_transforms()) {
//!     println!("{} {:?}", bone.name, inv);
//! }
//! # Ok::<(), skelrig::rb_error::RbError>(())
//! ```

pub mod rb_error;
pub mod skeleton;
pub mod skl_import;
