//! In-memory skeleton with an explicit world/local transform cache
//!
//! Every world-transform assignment recomputes the bone's parent-relative
//! local transform (`local = inverse(parent.world) * world`) and then
//! re-derives the world transform of every descendant from its unchanged
//! local. Descendants therefore follow their parent exactly like they do in
//! a host scene graph, which is why bones must be aligned parent-first.

use glam::Quat;
use hashbrown::HashMap;

use crate::error::SkeletonError;
use crate::transform::RigidTransform;

/// Index of a bone inside its [`Skeleton`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoneId(pub usize);

/// Operations the remap pipeline needs from a skeletal host.
///
/// [`Skeleton`] is the in-memory implementation; other hosts (an editor
/// scene, an engine runtime) can implement this to be driven directly.
pub trait RigHost {
    /// Number of bones
    fn bone_count(&self) -> usize;

    /// Name of a bone
    fn bone_name(&self, id: BoneId) -> &str;

    /// Look a bone up by name
    fn find_bone(&self, name: &str) -> Option<BoneId>;

    /// Parent of a bone, `None` for roots
    fn parent(&self, id: BoneId) -> Option<BoneId>;

    /// Current world (armature space) transform
    fn world(&self, id: BoneId) -> RigidTransform;

    /// Assign a new world transform
    fn set_world(&mut self, id: BoneId, world: RigidTransform);

    /// Local pose rotation, relative to the bone's rest frame
    fn pose_rotation(&self, id: BoneId) -> Quat;

    /// Bind (rest) orientation in armature space
    fn bind_rotation(&self, id: BoneId) -> Quat;

    /// Turn off IK on every bone, returning how many bones had it on
    fn disable_ik(&mut self) -> usize {
        0
    }

    /// Clear all location/rotation/scale channel locks
    fn unlock_channels(&mut self) {}
}

/// Per-channel transform locks carried by a bone
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelLocks {
    pub location: [bool; 3],
    pub rotation: [bool; 3],
    pub rotation_w: bool,
    pub scale: [bool; 3],
}

impl ChannelLocks {
    pub const NONE: Self = Self {
        location: [false; 3],
        rotation: [false; 3],
        rotation_w: false,
        scale: [false; 3],
    };

    pub const ALL: Self = Self {
        location: [true; 3],
        rotation: [true; 3],
        rotation_w: true,
        scale: [true; 3],
    };

    pub fn is_unlocked(&self) -> bool {
        *self == Self::NONE
    }
}

/// Declarative bone description used to build a [`Skeleton`]
#[derive(Clone, Debug, PartialEq)]
pub struct BoneDef {
    pub name: String,
    pub parent: Option<String>,
    /// Rest transform in armature space
    pub bind: RigidTransform,
    /// Pose rotation relative to rest (identity = bone sits at rest)
    pub pose_rotation: Quat,
    pub ik_enabled: bool,
    pub locks: ChannelLocks,
}

impl BoneDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            bind: RigidTransform::IDENTITY,
            pose_rotation: Quat::IDENTITY,
            ik_enabled: false,
            locks: ChannelLocks::NONE,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_bind(mut self, bind: RigidTransform) -> Self {
        self.bind = bind;
        self
    }

    pub fn with_pose_rotation(mut self, rotation: Quat) -> Self {
        self.pose_rotation = rotation;
        self
    }

    pub fn with_ik(mut self, enabled: bool) -> Self {
        self.ik_enabled = enabled;
        self
    }

    pub fn with_locks(mut self, locks: ChannelLocks) -> Self {
        self.locks = locks;
        self
    }
}

/// A bone owned by a [`Skeleton`]
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    pub parent: Option<BoneId>,
    pub children: Vec<BoneId>,
    /// Rest transform in armature space
    pub bind: RigidTransform,
    /// Current armature-space transform
    pub world: RigidTransform,
    /// Current transform relative to the parent's world transform
    pub local: RigidTransform,
    pub ik_enabled: bool,
    pub locks: ChannelLocks,
}

/// Ordered bone collection with name lookup
#[derive(Clone, Debug)]
pub struct Skeleton {
    name: String,
    bones: Vec<Bone>,
    by_name: HashMap<String, BoneId>,
}

impl Skeleton {
    /// Build a skeleton from bone definitions.
    ///
    /// Parents may be declared after their children. Duplicate names,
    /// unknown parents and parent cycles are rejected.
    pub fn new(name: impl Into<String>, defs: Vec<BoneDef>) -> Result<Self, SkeletonError> {
        let mut by_name = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            if by_name.insert(def.name.clone(), BoneId(i)).is_some() {
                return Err(SkeletonError::DuplicateBone(def.name.clone()));
            }
        }

        let mut parents = Vec::with_capacity(defs.len());
        for def in &defs {
            let parent = match &def.parent {
                Some(parent) => Some(*by_name.get(parent.as_str()).ok_or_else(|| {
                    SkeletonError::UnknownParent {
                        bone: def.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };
            parents.push(parent);
        }

        // Any chain longer than the bone count must revisit a bone.
        for (i, def) in defs.iter().enumerate() {
            let mut current = parents[i];
            let mut steps = 0;
            while let Some(BoneId(p)) = current {
                steps += 1;
                if p == i || steps > defs.len() {
                    return Err(SkeletonError::ParentCycle(def.name.clone()));
                }
                current = parents[p];
            }
        }

        let mut bones: Vec<Bone> = defs
            .iter()
            .zip(&parents)
            .map(|(def, parent)| Bone {
                name: def.name.clone(),
                parent: *parent,
                children: Vec::new(),
                bind: def.bind,
                world: def.bind,
                local: RigidTransform::IDENTITY,
                ik_enabled: def.ik_enabled,
                locks: def.locks,
            })
            .collect();
        for (i, parent) in parents.iter().enumerate() {
            if let Some(BoneId(p)) = parent {
                bones[*p].children.push(BoneId(i));
            }
        }

        let mut skeleton = Self {
            name: name.into(),
            bones,
            by_name,
        };

        // Seed world transforms parent-first: world = parent.world * rest_offset * pose
        for id in skeleton.topological_order() {
            let pose = RigidTransform::from_rotation(defs[id.0].pose_rotation);
            let parent_world = skeleton.bones[id.0]
                .parent
                .map(|p| skeleton.bones[p.0].world)
                .unwrap_or(RigidTransform::IDENTITY);
            let local = skeleton.rest_offset(id) * pose;
            let bone = &mut skeleton.bones[id.0];
            bone.local = local;
            bone.world = parent_world * local;
        }

        Ok(skeleton)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone(&self, id: BoneId) -> &Bone {
        &self.bones[id.0]
    }

    pub fn get(&self, name: &str) -> Option<&Bone> {
        self.by_name.get(name).map(|id| &self.bones[id.0])
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Rest transform relative to the parent's rest transform
    pub fn rest_offset(&self, id: BoneId) -> RigidTransform {
        let bone = &self.bones[id.0];
        match bone.parent {
            Some(p) => self.bones[p.0].bind.inverse() * bone.bind,
            None => bone.bind,
        }
    }

    /// Bone ids with every parent before its children (roots in declaration order)
    fn topological_order(&self) -> Vec<BoneId> {
        let mut order = Vec::with_capacity(self.bones.len());
        let mut stack: Vec<BoneId> = self
            .bones
            .iter()
            .enumerate()
            .filter(|(_, b)| b.parent.is_none())
            .map(|(i, _)| BoneId(i))
            .rev()
            .collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.bones[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Re-derive world transforms below `id` from their cached locals
    fn propagate_to_descendants(&mut self, id: BoneId) {
        let mut stack = vec![id];
        while let Some(parent) = stack.pop() {
            let parent_world = self.bones[parent.0].world;
            let children = self.bones[parent.0].children.clone();
            for child in children {
                let bone = &mut self.bones[child.0];
                bone.world = parent_world * bone.local;
                stack.push(child);
            }
        }
    }
}

/// Flip to the `w >= 0` hemisphere so equal rotations print identically
fn canonical(q: Quat) -> Quat {
    if q.w < 0.0 { -q } else { q }
}

impl RigHost for Skeleton {
    fn bone_count(&self) -> usize {
        self.bones.len()
    }

    fn bone_name(&self, id: BoneId) -> &str {
        &self.bones[id.0].name
    }

    fn find_bone(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }

    fn parent(&self, id: BoneId) -> Option<BoneId> {
        self.bones[id.0].parent
    }

    fn world(&self, id: BoneId) -> RigidTransform {
        self.bones[id.0].world
    }

    fn set_world(&mut self, id: BoneId, world: RigidTransform) {
        let parent_world = self.bones[id.0]
            .parent
            .map(|p| self.bones[p.0].world)
            .unwrap_or(RigidTransform::IDENTITY);
        let bone = &mut self.bones[id.0];
        bone.world = world;
        bone.local = parent_world.inverse() * world;
        self.propagate_to_descendants(id);
    }

    fn pose_rotation(&self, id: BoneId) -> Quat {
        let pose = self.rest_offset(id).inverse() * self.bones[id.0].local;
        canonical(pose.rotation.normalize())
    }

    fn bind_rotation(&self, id: BoneId) -> Quat {
        canonical(self.bones[id.0].bind.rotation.normalize())
    }

    fn disable_ik(&mut self) -> usize {
        let mut disabled = 0;
        for bone in &mut self.bones {
            if bone.ik_enabled {
                bone.ik_enabled = false;
                disabled += 1;
            }
        }
        disabled
    }

    fn unlock_channels(&mut self) {
        for bone in &mut self.bones {
            bone.locks = ChannelLocks::NONE;
        }
    }
}
