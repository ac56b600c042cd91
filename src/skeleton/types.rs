use crate::rb_error::RbError;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

/// A joint of the rig. Position and rotation are local, relative to the
/// parent bone or to rig space for a root bone.
///
/// `parent` is an index into the bone sequence of the owning `Skeleton`. It
/// never owns anything and is always lower than the bone's own index, since
/// a parent has to exist before a child can refer to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub id: i32,
    pub name: String,
    pub position: glm::Vec3,
    pub rotation: glm::Mat4,
    pub(super) parent: Option<usize>,
}

impl Bone {
    /// Creates a root bone at the bind pose origin
    #[must_use]
    pub fn new(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            position: glm::Vec3::zeros(),
            rotation: glm::Mat4::identity(),
            parent: None,
        }
    }

    /// Index of the parent bone in the owning skeleton, `None` for a root
    #[must_use]
    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }
}

/// Result of looking up a bone by id.
///
/// `NoParent` is only produced by the reserved id -1 and is not an error.
/// `NotFound` means a real id had no match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lookup {
    NoParent,
    Found(usize),
    NotFound,
}

impl Lookup {
    /// Bone index if one was found
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Found(index) => Some(index),
            Self::NoParent | Self::NotFound => None,
        }
    }
}

/// A rig: bones in load order plus their world transforms and inverses.
///
/// `transforms[i]` and `inv_transforms[i]` belong to `bones[i]`. They go stale
/// after any change to the bones and are refreshed by `gen_transforms` or
/// `gen_inv_transforms`.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSkeleton")]
pub struct Skeleton {
    pub(super) bones: Vec<Bone>,
    pub(super) transforms: Vec<glm::Mat4>,
    pub(super) inv_transforms: Vec<glm::Mat4>,
}

/// Unchecked form of `Skeleton` used for deserialization
#[derive(Deserialize)]
struct RawSkeleton {
    bones: Vec<Bone>,
    transforms: Vec<glm::Mat4>,
    inv_transforms: Vec<glm::Mat4>,
}

impl TryFrom<RawSkeleton> for Skeleton {
    type Error = RbError;

    fn try_from(raw: RawSkeleton) -> Result<Self, Self::Error> {
        let count = raw.bones.len();
        if raw.transforms.len() != count || raw.inv_transforms.len() != count
        {
            return Err(RbError::MalformedSkeleton);
        }
        for (index, bone) in raw.bones.iter().enumerate() {
            if bone.parent.is_some_and(|parent| parent >= index) {
                return Err(RbError::MalformedSkeleton);
            }
        }
        Ok(Self {
            bones: raw.bones,
            transforms: raw.transforms,
            inv_transforms: raw.inv_transforms,
        })
    }
}
