//! bone-remap library
//!
//! Computes, for every bone of a skeletal rig, the rest-pose correction and
//! coordinate conversion quaternions needed to move the rig onto another
//! engine's bone-axis convention.
//!
//! The run is a single linear pipeline over a [`RigHost`]:
//! IK toggles off, channel locks cleared, bones aligned to canonical world
//! axes in hierarchy order, optional twists applied, then one report row per
//! bone in the authored task order.

pub mod convert;
pub mod direction;
pub mod emit;
pub mod error;
pub mod hierarchy;
pub mod normalize;
pub mod pipeline;
pub mod preset;
pub mod skeleton;
pub mod transform;

pub use convert::coordinate_conversion;
pub use direction::{Axis, BoneTask, Direction};
pub use emit::{
    BoneMappingEntry, DEFAULT_EYE_BONES, DEFAULT_PRECISION, MappingReport, RowStyle,
    format_component, format_quaternion, mapping_entry,
};
pub use error::{RemapError, SkeletonError, Skip};
pub use hierarchy::{OrderedTask, hierarchy_order, hierarchy_path, order_lines, processing_order};
pub use normalize::{align_bone, twist_bone};
pub use pipeline::{PipelineOptions, PipelineSummary, RemapOutput, remap, validate_tasks};
pub use preset::mmd_standard;
pub use skeleton::{Bone, BoneDef, BoneId, ChannelLocks, RigHost, Skeleton};
pub use transform::RigidTransform;
