//! Built-in task table for MMD (PMX) standard humanoid skeletons

use crate::direction::{Axis, BoneTask};

/// (bone, axis, twist degrees)
const MMD_STANDARD: &[(&str, Axis, i32)] = &[
    ("全ての親", Axis::PosZ, 0),
    ("センター", Axis::NegZ, 0),
    ("左目", Axis::NegY, -90),
    ("右目", Axis::NegY, -90),
    ("首", Axis::PosZ, 0),
    ("頭", Axis::PosZ, 0),
    ("上半身", Axis::PosZ, 0),
    ("上半身2", Axis::PosZ, 0),
    ("下半身", Axis::NegZ, 0),
    ("左肩", Axis::PosX, 180),
    ("右肩", Axis::NegX, 0),
    ("左腕", Axis::PosX, 0),
    ("右腕", Axis::NegX, 0),
    ("左ひじ", Axis::PosX, 0),
    ("右ひじ", Axis::NegX, 0),
    ("左手首", Axis::PosX, 0),
    ("右手首", Axis::NegX, 0),
    ("左足", Axis::NegZ, 0),
    ("右足", Axis::NegZ, 0),
    ("左ひざ", Axis::NegZ, 0),
    ("右ひざ", Axis::NegZ, 0),
    ("左足首", Axis::NegY, 180),
    ("右足首", Axis::NegY, 180),
    ("左足先EX", Axis::NegY, 180),
    ("右足先EX", Axis::NegY, 180),
    ("左親指０", Axis::PosX, -90),
    ("左親指１", Axis::PosX, 0),
    ("左親指２", Axis::PosX, 0),
    ("左人指１", Axis::PosX, 0),
    ("左人指２", Axis::PosX, 0),
    ("左人指３", Axis::PosX, 0),
    ("左中指１", Axis::PosX, 0),
    ("左中指２", Axis::PosX, 0),
    ("左中指３", Axis::PosX, 0),
    ("左薬指１", Axis::PosX, 0),
    ("左薬指２", Axis::PosX, 0),
    ("左薬指３", Axis::PosX, 0),
    ("左小指１", Axis::PosX, 0),
    ("左小指２", Axis::PosX, 0),
    ("左小指３", Axis::PosX, 0),
    ("右親指０", Axis::NegX, -90),
    ("右親指１", Axis::NegX, 0),
    ("右親指２", Axis::NegX, 0),
    ("右人指１", Axis::NegX, 180),
    ("右人指２", Axis::NegX, 0),
    ("右人指３", Axis::NegX, 0),
    ("右中指１", Axis::NegX, 180),
    ("右中指２", Axis::NegX, 0),
    ("右中指３", Axis::NegX, 0),
    ("右薬指１", Axis::NegX, 180),
    ("右薬指２", Axis::NegX, 0),
    ("右薬指３", Axis::NegX, 0),
    ("右小指１", Axis::NegX, 180),
    ("右小指２", Axis::NegX, 0),
    ("右小指３", Axis::NegX, 0),
];

/// The MMD standard-humanoid task table, in its authored order
pub fn mmd_standard() -> Vec<BoneTask> {
    MMD_STANDARD
        .iter()
        .map(|&(bone, axis, twist)| BoneTask::new(bone, axis, twist))
        .collect()
}
