//! Error and skip types
//!
//! Only [`RemapError`] aborts a run. Everything that can go wrong for a
//! single bone is a [`Skip`]: logged, recorded, and the batch continues.

use serde::Serialize;

/// Fatal pipeline error, raised before any bone is touched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemapError {
    /// No skeleton was handed to the pipeline
    #[error("no skeleton selected")]
    NoSkeletonSelected,
}

/// Error building a [`Skeleton`](crate::Skeleton) from bone definitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkeletonError {
    /// Two bones share a name
    #[error("duplicate bone name '{0}'")]
    DuplicateBone(String),

    /// A bone names a parent that is not in the skeleton
    #[error("bone '{bone}' has unknown parent '{parent}'")]
    UnknownParent { bone: String, parent: String },

    /// Following parent links from this bone never reaches a root
    #[error("bone '{0}' is part of a parent cycle")]
    ParentCycle(String),
}

/// Recoverable per-bone condition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Skip {
    /// Task direction is not one of the six canonical axes
    UnsupportedDirection { bone: String, vector: [f32; 3] },

    /// Task (or report) names a bone the skeleton does not have
    UnknownBoneInTask { bone: String },
}

impl Skip {
    pub fn bone(&self) -> &str {
        match self {
            Skip::UnsupportedDirection { bone, .. } | Skip::UnknownBoneInTask { bone } => bone,
        }
    }
}

impl std::fmt::Display for Skip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skip::UnsupportedDirection { bone, vector } => write!(
                f,
                "unsupported direction ({}, {}, {}) for bone '{}'",
                vector[0], vector[1], vector[2], bone
            ),
            Skip::UnknownBoneInTask { bone } => write!(f, "bone '{}' does not exist", bone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_json_is_tagged() {
        let skips = vec![
            Skip::UnknownBoneInTask { bone: "Foo".into() },
            Skip::UnsupportedDirection {
                bone: "arm".into(),
                vector: [1.0, 1.0, 0.0],
            },
        ];
        let json = serde_json::to_value(&skips).unwrap();
        assert_eq!(json[0]["kind"], "unknown_bone_in_task");
        assert_eq!(json[0]["bone"], "Foo");
        assert_eq!(json[1]["kind"], "unsupported_direction");
        assert_eq!(json[1]["vector"][1], 1.0);
    }

    #[test]
    fn test_skip_messages_name_the_bone() {
        let skip = Skip::UnknownBoneInTask { bone: "Foo".into() };
        assert_eq!(skip.bone(), "Foo");
        assert_eq!(skip.to_string(), "bone 'Foo' does not exist");
    }
}
