pub mod store;
pub mod transform;
mod types;

// Re-exports
pub use {
    store::NO_PARENT,
    transform::{
        bone_transform, gen_inv_transforms, gen_transforms, local_transform,
    },
    types::{Bone, Lookup, Skeleton},
};
