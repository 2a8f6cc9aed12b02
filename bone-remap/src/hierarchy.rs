//! Parent-before-child processing order for task tables
//!
//! Each task is keyed by the chain of bone names from the root down to its
//! bone. Comparing chains lexicographically puts every ancestor's chain, a
//! strict prefix, ahead of all of its descendants'. Unrelated branches are
//! ordered by the first differing ancestor name. Bones missing from the
//! skeleton get an empty chain and sort to the front.

use crate::direction::BoneTask;
use crate::skeleton::RigHost;

/// Bone names from the root down to `bone` (empty if `bone` does not exist)
pub fn hierarchy_path<H: RigHost + ?Sized>(host: &H, bone: &str) -> Vec<String> {
    let Some(mut id) = host.find_bone(bone) else {
        return Vec::new();
    };

    let mut path = vec![host.bone_name(id).to_string()];
    while let Some(parent) = host.parent(id) {
        path.push(host.bone_name(parent).to_string());
        id = parent;
    }
    path.reverse();
    path
}

/// One task's slot in the processing order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderedTask {
    /// Index into the authored task list
    pub index: usize,
    /// Length of the bone's root-to-bone chain (0 for unknown bones)
    pub depth: usize,
}

/// Tasks in processing order, each chain computed once.
///
/// The sort is stable: tasks with equal chains (repeated bones, or several
/// unknown bones) keep their authored order.
pub fn hierarchy_order<H: RigHost + ?Sized>(host: &H, tasks: &[BoneTask]) -> Vec<OrderedTask> {
    let mut keyed: Vec<(Vec<String>, usize)> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| (hierarchy_path(host, &task.bone), i))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    keyed
        .into_iter()
        .map(|(path, index)| OrderedTask {
            index,
            depth: path.len(),
        })
        .collect()
}

/// Task indices in processing order
pub fn processing_order<H: RigHost + ?Sized>(host: &H, tasks: &[BoneTask]) -> Vec<usize> {
    hierarchy_order(host, tasks)
        .into_iter()
        .map(|t| t.index)
        .collect()
}

/// `NN. bone (depth: d)` per task, in processing order
pub fn order_lines(tasks: &[BoneTask], order: &[OrderedTask]) -> Vec<String> {
    order
        .iter()
        .enumerate()
        .map(|(n, t)| format!("{:2}. {} (depth: {})", n + 1, tasks[t.index].bone, t.depth))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Axis;
    use crate::skeleton::{BoneDef, Skeleton};

    //        root
    //       /    \
    //   spine    hips
    //     |        |
    //   neck     leg_l
    //     |
    //   head
    fn body() -> Skeleton {
        Skeleton::new(
            "body",
            vec![
                BoneDef::new("head").with_parent("neck"),
                BoneDef::new("leg_l").with_parent("hips"),
                BoneDef::new("neck").with_parent("spine"),
                BoneDef::new("root"),
                BoneDef::new("spine").with_parent("root"),
                BoneDef::new("hips").with_parent("root"),
            ],
        )
        .unwrap()
    }

    fn task(bone: &str) -> BoneTask {
        BoneTask::new(bone, Axis::PosZ, 0)
    }

    #[test]
    fn test_path_root_first() {
        let skeleton = body();
        assert_eq!(
            hierarchy_path(&skeleton, "head"),
            vec!["root", "spine", "neck", "head"]
        );
        assert_eq!(hierarchy_path(&skeleton, "root"), vec!["root"]);
    }

    #[test]
    fn test_path_unknown_bone_is_empty() {
        assert!(hierarchy_path(&body(), "tail").is_empty());
    }

    #[test]
    fn test_ancestors_before_descendants() {
        let skeleton = body();
        let tasks: Vec<_> = ["head", "leg_l", "neck", "spine", "hips", "root"]
            .into_iter()
            .map(task)
            .collect();
        let order = processing_order(&skeleton, &tasks);
        let position = |name: &str| {
            order
                .iter()
                .position(|&i| tasks[i].bone == name)
                .unwrap()
        };

        for t in &tasks {
            let path = hierarchy_path(&skeleton, &t.bone);
            for ancestor in &path[..path.len() - 1] {
                assert!(
                    position(ancestor.as_str()) < position(t.bone.as_str()),
                    "{ancestor} must come before {}",
                    t.bone
                );
            }
        }
    }

    #[test]
    fn test_cross_branch_tie_break_is_lexicographic() {
        let skeleton = body();
        let tasks: Vec<_> = ["head", "leg_l", "neck", "spine", "hips", "root"]
            .into_iter()
            .map(task)
            .collect();
        let order: Vec<_> = processing_order(&skeleton, &tasks)
            .into_iter()
            .map(|i| tasks[i].bone.as_str())
            .collect();
        // "hips" < "spine", so the whole hips branch runs first.
        assert_eq!(order, vec!["root", "hips", "leg_l", "spine", "neck", "head"]);
    }

    #[test]
    fn test_unknown_bones_sort_first_and_stay_stable() {
        let skeleton = body();
        let tasks = vec![task("spine"), task("ghost_b"), task("root"), task("ghost_a")];
        let order = processing_order(&skeleton, &tasks);
        assert_eq!(order, vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_order_lines_carry_depth() {
        let skeleton = body();
        let tasks = vec![task("neck"), task("ghost"), task("root")];
        let order = hierarchy_order(&skeleton, &tasks);
        assert_eq!(
            order_lines(&tasks, &order),
            vec![" 1. ghost (depth: 0)", " 2. root (depth: 1)", " 3. neck (depth: 3)"]
        );
    }
}
