//! Rig and task-table manifests (TOML)
//!
//! Rig file:
//!
//! ```toml
//! [[skeleton]]
//! name = "Armature"
//!
//! [[skeleton.bone]]
//! name = "センター"
//! head = [0.0, 0.0, 0.8]          # bind translation, armature space
//! rotation = [0.0, 0.0, 0.0, 1.0] # bind rotation [x, y, z, w]
//!
//! [[skeleton.bone]]
//! name = "上半身"
//! parent = "センター"
//! ik = true
//! locked = true
//! ```
//!
//! Task file:
//!
//! ```toml
//! eye_bones = ["左目", "右目"]
//! style = "csharp"
//!
//! [[task]]
//! bone = "上半身"
//! direction = [0, 0, 1]
//! twist = 0
//! ```

use anyhow::{Context, Result, bail};
use bone_remap::{BoneDef, BoneTask, ChannelLocks, RigidTransform, RowStyle, Skeleton};
use glam::{Quat, Vec3};
use serde::Deserialize;
use std::path::Path;

/// Rig file: one or more skeletons
#[derive(Debug, Default, Deserialize)]
pub struct RigFile {
    #[serde(default)]
    pub skeleton: Vec<SkeletonEntry>,
}

/// One `[[skeleton]]` table
#[derive(Debug, Deserialize)]
pub struct SkeletonEntry {
    pub name: String,
    #[serde(default)]
    pub bone: Vec<BoneEntry>,
}

/// One `[[skeleton.bone]]` table
#[derive(Debug, Deserialize)]
pub struct BoneEntry {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,

    /// Bind translation in armature space.
    /// Default: origin
    #[serde(default)]
    pub head: [f32; 3],

    /// Bind rotation [x, y, z, w] in armature space.
    /// Default: identity
    #[serde(default = "identity_xyzw")]
    pub rotation: [f32; 4],

    /// Pose rotation [x, y, z, w] relative to rest.
    /// Default: identity (bone at rest)
    #[serde(default)]
    pub pose_rotation: Option<[f32; 4]>,

    /// IK constraint currently enabled on this bone
    #[serde(default)]
    pub ik: bool,

    /// All transform channels locked
    #[serde(default)]
    pub locked: bool,
}

fn identity_xyzw() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

impl RigFile {
    /// Load rig file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rig file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse rig file from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse rig file")
    }

    /// Pick a skeleton by name, or the first one when no name is given
    pub fn select(&self, name: Option<&str>) -> Option<&SkeletonEntry> {
        match name {
            Some(name) => self.skeleton.iter().find(|s| s.name == name),
            None => self.skeleton.first(),
        }
    }
}

impl SkeletonEntry {
    /// Build the in-memory skeleton
    pub fn to_skeleton(&self) -> Result<Skeleton> {
        let defs = self
            .bone
            .iter()
            .map(BoneEntry::to_def)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Invalid bone in skeleton '{}'", self.name))?;
        Skeleton::new(self.name.clone(), defs)
            .with_context(|| format!("Invalid skeleton '{}'", self.name))
    }
}

impl BoneEntry {
    fn to_def(&self) -> Result<BoneDef> {
        let bind = RigidTransform::from_rotation_translation(
            unit_rotation(&self.name, "rotation", self.rotation)?,
            Vec3::from_array(self.head),
        );
        let mut def = BoneDef::new(self.name.clone())
            .with_bind(bind)
            .with_ik(self.ik);
        if let Some(parent) = &self.parent {
            def = def.with_parent(parent.clone());
        }
        if let Some(pose) = self.pose_rotation {
            def = def.with_pose_rotation(unit_rotation(&self.name, "pose_rotation", pose)?);
        }
        if self.locked {
            def = def.with_locks(ChannelLocks::ALL);
        }
        Ok(def)
    }
}

/// Normalize an `[x, y, z, w]` rotation, rejecting values that have no direction
pub(crate) fn unit_rotation(bone: &str, field: &str, xyzw: [f32; 4]) -> Result<Quat> {
    let q = Quat::from_array(xyzw);
    if !q.is_finite() {
        bail!("bone '{}' has a non-finite {}", bone, field);
    }
    if q.length_squared() < 1e-12 {
        bail!("bone '{}' has a zero-length {}", bone, field);
    }
    Ok(q.normalize())
}

/// Task file: the declarative (bone, direction, twist) table
#[derive(Debug, Default, Deserialize)]
pub struct TaskFile {
    /// Bones whose rest-pose correction is forced to identity.
    /// Default: the MMD eye bones
    #[serde(default)]
    pub eye_bones: Option<Vec<String>>,

    /// Row style for the text report.
    /// Default: tuple
    #[serde(default)]
    pub style: Option<RowStyle>,

    #[serde(default)]
    pub task: Vec<TaskEntry>,
}

/// One `[[task]]` entry
#[derive(Debug, Deserialize)]
pub struct TaskEntry {
    pub bone: String,
    /// World direction; must normalize onto one of ±X, ±Y, ±Z
    pub direction: [f32; 3],
    /// Twist about the bone's own Y axis, in degrees
    #[serde(default)]
    pub twist: i32,
}

impl TaskFile {
    /// Load task file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read task file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse task file from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse task file")
    }

    /// Tasks in authored order
    pub fn tasks(&self) -> Vec<BoneTask> {
        self.task
            .iter()
            .map(|t| BoneTask::from_vector(t.bone.clone(), t.direction, t.twist))
            .collect()
    }
}
