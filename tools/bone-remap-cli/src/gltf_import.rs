//! Skeleton import from glTF skins
//!
//! Joint names come from the node names, parent links from the node tree
//! (nearest ancestor that is also a joint), and bind transforms from the
//! accumulated node rotation/translation. Node scale is ignored.

use anyhow::{Context, Result};
use bone_remap::{BoneDef, RigidTransform, Skeleton};
use glam::Vec3;
use hashbrown::{HashMap, HashSet};
use std::path::Path;

use crate::manifest::unit_rotation;

/// Load the skeleton of a glTF skin.
///
/// Returns `Ok(None)` when the file has no skin (or none named `skin_name`),
/// so the caller can report it as "no skeleton selected".
pub fn load_gltf_skeleton(input: &Path, skin_name: Option<&str>) -> Result<Option<Skeleton>> {
    let (document, _buffers, _images) =
        gltf::import(input).with_context(|| format!("Failed to load glTF: {:?}", input))?;

    let skin = match skin_name {
        Some(name) => document.skins().find(|s| s.name() == Some(name)),
        None => document.skins().next(),
    };
    let Some(skin) = skin else {
        return Ok(None);
    };

    let mut parent_of: HashMap<usize, usize> = HashMap::new();
    for node in document.nodes() {
        for child in node.children() {
            parent_of.insert(child.index(), node.index());
        }
    }

    let locals = document
        .nodes()
        .map(|node| {
            let (translation, rotation, _scale) = node.transform().decomposed();
            Ok(RigidTransform::from_rotation_translation(
                unit_rotation(&joint_name(&node), "rotation", rotation)?,
                Vec3::from_array(translation),
            ))
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Invalid node transform in {:?}", input))?;

    let joints: Vec<gltf::Node> = skin.joints().collect();
    let joint_set: HashSet<usize> = joints.iter().map(|j| j.index()).collect();
    let names: HashMap<usize, String> = joints
        .iter()
        .map(|j| (j.index(), joint_name(j)))
        .collect();

    let defs = joints
        .iter()
        .map(|joint| {
            let mut def = BoneDef::new(names[&joint.index()].clone())
                .with_bind(global_transform(joint.index(), &locals, &parent_of));

            let mut ancestor = parent_of.get(&joint.index()).copied();
            while let Some(index) = ancestor {
                if joint_set.contains(&index) {
                    def = def.with_parent(names[&index].clone());
                    break;
                }
                ancestor = parent_of.get(&index).copied();
            }
            def
        })
        .collect();

    let skin_label = skin.name().unwrap_or("unnamed");
    let skeleton = Skeleton::new(skin_label, defs)
        .with_context(|| format!("Invalid skeleton in skin '{}'", skin_label))?;

    tracing::info!(
        "Imported skeleton: {} bones from skin '{}'",
        skeleton.bones().len(),
        skin_label
    );

    Ok(Some(skeleton))
}

fn joint_name(node: &gltf::Node) -> String {
    node.name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("joint_{}", node.index()))
}

/// Node transform in scene space, composed root-first
fn global_transform(
    index: usize,
    locals: &[RigidTransform],
    parent_of: &HashMap<usize, usize>,
) -> RigidTransform {
    let mut transform = locals[index];
    let mut current = parent_of.get(&index).copied();
    while let Some(parent) = current {
        transform = locals[parent] * transform;
        current = parent_of.get(&parent).copied();
    }
    transform
}
