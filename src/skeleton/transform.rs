//! Forward kinematics for the bind pose
//!
//! A bone's world transform is its parent's world transform, then its local
//! translation, then its local rotation:
//!
//! `world = parent_world * translation(position) * rotation`
//!
//! Parents always come before their children in the bone sequence, so one
//! pass in sequence order sees every parent finished before its children.

use super::types::{Bone, Skeleton};
use crate::rb_error::RbError;
use log::debug;
use nalgebra_glm as glm;
use smallvec::SmallVec;

/// Local transform of a bone, relative to its parent
#[must_use]
pub fn local_transform(bone: &Bone) -> glm::Mat4 {
    glm::translation(&bone.position) * bone.rotation
}

/// Calculates the world transform of one bone by walking its ancestors.
/// Returns `None` if there is no bone at `index`.
#[must_use]
pub fn bone_transform(skeleton: &Skeleton, index: usize) -> Option<glm::Mat4> {
    skeleton.bones.get(index)?;

    let mut chain = SmallVec::<[usize; 16]>::new();
    let mut current = Some(index);
    while let Some(i) = current {
        chain.push(i);
        current = skeleton.bones[i].parent;
    }

    // Compose from the root down
    Some(chain.iter().rev().fold(glm::Mat4::identity(), |world, &i| {
        world * local_transform(&skeleton.bones[i])
    }))
}

/// World transforms for all bones, in bone order
fn world_transforms(skeleton: &Skeleton) -> Vec<glm::Mat4> {
    let mut out: Vec<glm::Mat4> = Vec::with_capacity(skeleton.bones.len());
    for bone in &skeleton.bones {
        let local = local_transform(bone);
        let world = match bone.parent {
            Some(parent) => out[parent] * local,
            None => local,
        };
        out.push(world);
    }
    out
}

/// Recalculates the world transforms. The inverse transforms are left alone.
pub fn gen_transforms(skeleton: &mut Skeleton) {
    skeleton.transforms = world_transforms(skeleton);
}

/// Recalculates the world transforms and their inverses. Call once the bind
/// pose is complete; the inverses are what skinning needs.
///
/// # Errors
/// Returns `RbError::SingularTransform` with the bone id if a world transform
/// has no inverse. The skeleton is unchanged in that case.
pub fn gen_inv_transforms(skeleton: &mut Skeleton) -> Result<(), RbError> {
    let transforms = world_transforms(skeleton);
    let inv_transforms = transforms
        .iter()
        .zip(&skeleton.bones)
        .map(|(m, bone)| {
            m.try_inverse()
                .ok_or(RbError::SingularTransform(bone.id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("generated {} inverse transforms", inv_transforms.len());

    skeleton.transforms = transforms;
    skeleton.inv_transforms = inv_transforms;
    Ok(())
}
