use super::types::{Bone, Lookup, Skeleton};
use ahash::{HashMap, HashMapExt};
use log::warn;
use nalgebra_glm as glm;
use std::fmt;

/// Parent id meaning "this bone is a root". Never a valid bone id.
pub const NO_PARENT: i32 = -1;

impl Skeleton {
    /// Creates an empty skeleton
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bones: Vec::new(),
            transforms: Vec::new(),
            inv_transforms: Vec::new(),
        }
    }

    /// Appends a bone with an identity local pose and returns its index.
    ///
    /// `parent_id` is resolved against the bones already present. An unknown
    /// parent is logged and the bone becomes a root. Ids are not checked for
    /// uniqueness here; that is the caller's job.
    pub fn add_bone(&mut self, name: &str, id: i32, parent_id: i32) -> usize {
        let mut bone = Bone::new(id, name);
        bone.parent = self.lookup(parent_id).index();

        self.bones.push(bone);
        self.transforms.push(glm::Mat4::identity());
        self.inv_transforms.push(glm::Mat4::identity());
        self.bones.len() - 1
    }

    /// Finds the first bone with the given id. Id -1 resolves to
    /// `Lookup::NoParent` without scanning. A miss is logged as a warning.
    #[must_use]
    pub fn lookup(&self, id: i32) -> Lookup {
        if id == NO_PARENT {
            return Lookup::NoParent;
        }
        self.position_of(id).map_or_else(
            || {
                warn!("unknown bone id {id}");
                Lookup::NotFound
            },
            Lookup::Found,
        )
    }

    /// Like `lookup` but silent and without the -1 special case
    #[must_use]
    pub fn contains_id(&self, id: i32) -> bool {
        self.position_of(id).is_some()
    }

    fn position_of(&self, id: i32) -> Option<usize> {
        self.bones.iter().position(|b| b.id == id)
    }

    /// Deep copy. Parent links are found again in the new bone sequence by
    /// matching ids. Transforms are copied as they are, not recalculated.
    #[must_use]
    pub fn copy(&self) -> Self {
        let mut bones: Vec<Bone> = self
            .bones
            .iter()
            .map(|old| {
                let mut bone = Bone::new(old.id, &old.name);
                bone.position = old.position;
                bone.rotation = old.rotation;
                bone
            })
            .collect();

        // First match wins, as with `lookup`
        let mut by_id = HashMap::with_capacity(bones.len());
        for (index, bone) in bones.iter().enumerate() {
            by_id.entry(bone.id).or_insert(index);
        }
        for (new, old) in bones.iter_mut().zip(&self.bones) {
            new.parent = old
                .parent
                .and_then(|p| by_id.get(&self.bones[p].id).copied());
        }

        Self {
            bones,
            transforms: self.transforms.clone(),
            inv_transforms: self.inv_transforms.clone(),
        }
    }

    /// Releases all bones and transforms
    pub fn clear(&mut self) {
        self.bones.clear();
        self.transforms.clear();
        self.inv_transforms.clear();
    }

    /// Sets the local pose of a bone. Returns false if there is no bone at
    /// `index`.
    pub fn set_pose(
        &mut self,
        index: usize,
        position: glm::Vec3,
        rotation: glm::Mat4,
    ) -> bool {
        let Some(bone) = self.bones.get_mut(index) else {
            return false;
        };
        bone.position = position;
        bone.rotation = rotation;
        true
    }

    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[must_use]
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    /// Local position of a bone for editing. Bones themselves are only
    /// handed out shared, so ids and parent links stay as loaded.
    pub fn position_mut(&mut self, index: usize) -> Option<&mut glm::Vec3> {
        self.bones.get_mut(index).map(|b| &mut b.position)
    }

    /// Local rotation of a bone for editing
    pub fn rotation_mut(&mut self, index: usize) -> Option<&mut glm::Mat4> {
        self.bones.get_mut(index).map(|b| &mut b.rotation)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// World transforms, index aligned with `bones`
    #[must_use]
    pub fn transforms(&self) -> &[glm::Mat4] {
        &self.transforms
    }

    /// Inverse world transforms, index aligned with `bones`
    #[must_use]
    pub fn inv_transforms(&self) -> &[glm::Mat4] {
        &self.inv_transforms
    }

    /// Index of the first bone with the given name
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    /// Indices of the direct children of a bone
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.parent == Some(index))
            .map(|(i, _)| i)
    }

    /// Indices of all bones without a parent
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.bones
            .iter()
            .enumerate()
            .filter(|(_, b)| b.parent.is_none())
            .map(|(i, _)| i)
    }
}

impl Clone for Skeleton {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, bone) in self.bones.iter().enumerate() {
            let p = &bone.position;
            write!(
                f,
                "Bone {index}: {} {} ({}, {}, {}) ",
                bone.id, bone.name, p.x, p.y, p.z
            )?;
            match bone.parent {
                Some(parent) => writeln!(f, "{}", self.bones[parent].id)?,
                None => writeln!(f, "ROOT")?,
            }
        }
        Ok(())
    }
}
