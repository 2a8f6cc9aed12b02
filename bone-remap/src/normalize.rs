//! Bind-pose normalization: aim bones along world axes, then twist them
//!
//! Both steps write absolute world transforms. The host re-expresses each
//! write relative to the parent's *current* world transform and carries the
//! descendants along, so callers must walk bones parent-first
//! (see [`processing_order`](crate::hierarchy::processing_order)).

use glam::Quat;

use crate::direction::{BoneTask, Direction};
use crate::error::Skip;
use crate::skeleton::RigHost;
use crate::transform::RigidTransform;

/// Set the task's bone to the canonical world rotation of its direction,
/// keeping the bone's current world translation.
pub fn align_bone<H: RigHost + ?Sized>(host: &mut H, task: &BoneTask) -> Result<(), Skip> {
    let Some(id) = host.find_bone(&task.bone) else {
        return Err(Skip::UnknownBoneInTask {
            bone: task.bone.clone(),
        });
    };

    let axis = match task.direction {
        Direction::Axis(axis) => axis,
        Direction::Unsupported(vector) => {
            return Err(Skip::UnsupportedDirection {
                bone: task.bone.clone(),
                vector,
            });
        }
    };

    let translation = host.world(id).translation;
    host.set_world(
        id,
        RigidTransform::from_rotation_translation(axis.world_rotation(), translation),
    );

    tracing::debug!("Bone '{}' aimed along {}", task.bone, axis);
    Ok(())
}

/// Twist a bone about its own longitudinal (local Y) axis.
///
/// Returns `Ok(false)` without touching the host when `degrees` is zero.
pub fn twist_bone<H: RigHost + ?Sized>(
    host: &mut H,
    bone: &str,
    degrees: i32,
) -> Result<bool, Skip> {
    let Some(id) = host.find_bone(bone) else {
        return Err(Skip::UnknownBoneInTask {
            bone: bone.to_string(),
        });
    };

    if degrees == 0 {
        return Ok(false);
    }

    let world = host.world(id);
    let twist = RigidTransform::from_rotation(Quat::from_rotation_y((degrees as f32).to_radians()));
    host.set_world(id, world * twist);

    tracing::debug!("Bone '{}' twisted {}° about Y", bone, degrees);
    Ok(true)
}
