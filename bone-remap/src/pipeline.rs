//! The remap run: one linear pass sequence over a single skeleton
//!
//! 1. processing order (computed once, shared by both bone passes)
//! 2. IK toggles off
//! 3. channel locks cleared
//! 4. align pass, parent-first
//! 5. twist pass, parent-first
//! 6. mapping rows, in authored task order
//!
//! Only a missing skeleton is fatal, and it is detected before anything is
//! mutated. Per-bone problems are logged, recorded in the summary, and
//! skipped.

use crate::direction::{BoneTask, Direction};
use crate::emit::{DEFAULT_EYE_BONES, DEFAULT_PRECISION, MappingReport, RowStyle, mapping_entry};
use crate::error::{RemapError, Skip};
use crate::hierarchy::{hierarchy_order, order_lines};
use crate::normalize::{align_bone, twist_bone};
use crate::skeleton::RigHost;

/// Switches for the host-side stages and the report
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOptions {
    /// Turn off IK on every bone before aligning
    pub disable_ik: bool,
    /// Clear every channel lock before aligning
    pub unlock_channels: bool,
    /// Bones whose rest-pose correction is forced to identity
    pub eye_bones: Vec<String>,
    pub style: RowStyle,
    /// Digits after the decimal point in text rows
    pub precision: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            disable_ik: true,
            unlock_channels: true,
            eye_bones: DEFAULT_EYE_BONES.iter().map(|s| s.to_string()).collect(),
            style: RowStyle::Tuple,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// What each pass did
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineSummary {
    pub ik_disabled: usize,
    pub aligned: usize,
    pub twisted: usize,
    pub skips: Vec<Skip>,
}

/// Result of a successful run
#[derive(Clone, Debug, PartialEq)]
pub struct RemapOutput {
    pub report: MappingReport,
    pub summary: PipelineSummary,
}

/// Run the full remap pipeline against `host`.
///
/// `host` is the selected skeleton; `None` aborts with
/// [`RemapError::NoSkeletonSelected`] before any mutation.
pub fn remap<H: RigHost + ?Sized>(
    host: Option<&mut H>,
    tasks: &[BoneTask],
    options: &PipelineOptions,
) -> Result<RemapOutput, RemapError> {
    let host = host.ok_or(RemapError::NoSkeletonSelected)?;
    let mut summary = PipelineSummary::default();

    let ordered = hierarchy_order(&*host, tasks);
    tracing::info!("Bone processing order (by hierarchy):");
    for line in order_lines(tasks, &ordered) {
        tracing::info!("{}", line);
    }
    let order: Vec<usize> = ordered.iter().map(|t| t.index).collect();

    if options.disable_ik {
        summary.ik_disabled = host.disable_ik();
        tracing::info!("Disabled IK on {} bones", summary.ik_disabled);
    }

    if options.unlock_channels {
        host.unlock_channels();
        tracing::info!("Cleared channel locks");
    }

    tracing::info!("Aligning bones to world axes");
    for &i in &order {
        match align_bone(host, &tasks[i]) {
            Ok(()) => summary.aligned += 1,
            Err(skip) => {
                tracing::warn!("Skipping alignment: {}", skip);
                summary.skips.push(skip);
            }
        }
    }

    tracing::info!("Applying twists");
    for &i in &order {
        let task = &tasks[i];
        if task.twist_degrees == 0 {
            continue;
        }
        match twist_bone(host, &task.bone, task.twist_degrees) {
            Ok(true) => summary.twisted += 1,
            Ok(false) => {}
            // Already recorded by the align pass
            Err(skip) => tracing::debug!("Skipping twist: {}", skip),
        }
    }

    let entries = tasks
        .iter()
        .map(|task| mapping_entry(&*host, &task.bone, &options.eye_bones))
        .collect();

    tracing::info!(
        "Remap complete: {} aligned, {} twisted, {} skipped",
        summary.aligned,
        summary.twisted,
        summary.skips.len()
    );

    Ok(RemapOutput {
        report: MappingReport::new(entries, options.style).with_precision(options.precision),
        summary,
    })
}

/// Everything the align pass would skip, without touching the host
pub fn validate_tasks<H: RigHost + ?Sized>(host: &H, tasks: &[BoneTask]) -> Vec<Skip> {
    tasks
        .iter()
        .filter_map(|task| {
            if host.find_bone(&task.bone).is_none() {
                Some(Skip::UnknownBoneInTask {
                    bone: task.bone.clone(),
                })
            } else if let Direction::Unsupported(vector) = task.direction {
                Some(Skip::UnsupportedDirection {
                    bone: task.bone.clone(),
                    vector,
                })
            } else {
                None
            }
        })
        .collect()
}
