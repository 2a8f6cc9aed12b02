//! bone-remap-cli library
//!
//! File loading for the `bone-remap` binary: rig and task manifests, glTF
//! skeleton import, and the processing-order listing.

pub mod gltf_import;
pub mod manifest;

use anyhow::Result;
use bone_remap::{BoneTask, DEFAULT_EYE_BONES, RigHost, RowStyle, Skeleton};
use std::path::Path;

use crate::manifest::{RigFile, TaskFile};

/// Where the skeleton comes from
#[derive(Debug, Clone, Copy)]
pub enum RigSource<'a> {
    /// TOML rig file
    Toml(&'a Path),
    /// glTF/GLB skin
    Gltf(&'a Path),
}

/// Load the selected skeleton.
///
/// `name` picks a skeleton (rig file) or skin (glTF) by name; without it the
/// first one is used. `Ok(None)` means nothing matched.
pub fn load_skeleton(source: RigSource<'_>, name: Option<&str>) -> Result<Option<Skeleton>> {
    match source {
        RigSource::Toml(path) => {
            let rig = RigFile::load(path)?;
            match rig.select(name) {
                Some(entry) => {
                    let skeleton = entry.to_skeleton()?;
                    tracing::info!(
                        "Loaded skeleton '{}': {} bones",
                        skeleton.name(),
                        skeleton.bone_count()
                    );
                    Ok(Some(skeleton))
                }
                None => Ok(None),
            }
        }
        RigSource::Gltf(path) => gltf_import::load_gltf_skeleton(path, name),
    }
}

/// Task list plus the report settings that travel with it
#[derive(Debug, Clone)]
pub struct TaskTable {
    pub tasks: Vec<BoneTask>,
    pub eye_bones: Vec<String>,
    pub style: Option<RowStyle>,
}

/// Load a task file, or fall back to the built-in MMD table
pub fn load_tasks(path: Option<&Path>) -> Result<TaskTable> {
    let default_eyes = || DEFAULT_EYE_BONES.iter().map(|s| s.to_string()).collect();

    let Some(path) = path else {
        tracing::info!("No task file given, using the MMD standard table");
        return Ok(TaskTable {
            tasks: bone_remap::mmd_standard(),
            eye_bones: default_eyes(),
            style: None,
        });
    };

    let file = TaskFile::load(path)?;
    let tasks = file.tasks();
    tracing::info!("Loaded {} tasks from {}", tasks.len(), path.display());

    Ok(TaskTable {
        tasks,
        eye_bones: file.eye_bones.unwrap_or_else(default_eyes),
        style: file.style,
    })
}

/// Processing order as text, one `NN. bone (depth: d)` line per task
pub fn order_listing<H: RigHost + ?Sized>(host: &H, tasks: &[BoneTask]) -> String {
    let order = bone_remap::hierarchy_order(host, tasks);
    bone_remap::order_lines(tasks, &order)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bone_remap::{Axis, BoneDef};
    use tempfile::tempdir;

    #[test]
    fn test_default_tasks_are_mmd() {
        let table = load_tasks(None).unwrap();
        assert_eq!(table.tasks.len(), 55);
        assert_eq!(table.eye_bones, vec!["左目".to_string(), "右目".to_string()]);
        assert_eq!(table.style, None);
    }

    #[test]
    fn test_task_file_keeps_default_eyes() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("tasks.toml");
        std::fs::write(&path, "[[task]]\nbone = \"a\"\ndirection = [0, 1, 0]\n")
            .expect("Failed to write tasks");

        let table = load_tasks(Some(&path)).unwrap();
        assert_eq!(table.tasks.len(), 1);
        assert_eq!(table.eye_bones.len(), 2);
    }

    #[test]
    fn test_missing_rig_file_is_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let missing = dir.path().join("nope.toml");
        assert!(load_skeleton(RigSource::Toml(&missing), None).is_err());
    }

    #[test]
    fn test_order_listing() {
        let skeleton = Skeleton::new(
            "s",
            vec![
                BoneDef::new("arm").with_parent("root"),
                BoneDef::new("root"),
            ],
        )
        .unwrap();
        let tasks = vec![
            BoneTask::new("arm", Axis::PosX, 0),
            BoneTask::new("root", Axis::PosZ, 0),
            BoneTask::new("ghost", Axis::PosZ, 0),
        ];

        assert_eq!(
            order_listing(&skeleton, &tasks),
            " 1. ghost (depth: 0)\n 2. root (depth: 1)\n 3. arm (depth: 2)\n"
        );
    }
}
