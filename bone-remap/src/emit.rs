//! Mapping rows: per-bone quaternion pairs and their text rendering
//!
//! Row layout (one line per bone, in authored task order):
//!
//! ```text
//! ( x,  y,  z,  w), ( x,  y,  z,  w) <bone>
//! ```
//!
//! The `csharp` style writes `new Quaternion( x, y, z, w)` with bare commas,
//! ready to paste into C# bone tables.
//!
//! Each component is printed with fixed precision and an `f` suffix,
//! non-negative values get a leading space, and a value that rounds to
//! zero is never printed with a minus sign.

use glam::Quat;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::convert::coordinate_conversion;
use crate::skeleton::RigHost;

/// Digits after the decimal point in report rows
pub const DEFAULT_PRECISION: usize = 3;

/// Bones whose rest-pose correction is forced to identity (MMD eye bones)
pub const DEFAULT_EYE_BONES: [&str; 2] = ["左目", "右目"];

/// How each quaternion in a row is wrapped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStyle {
    /// `( x,  y,  z,  w)`
    #[default]
    Tuple,
    /// `new Quaternion( x, y, z, w)`, ready to paste into C# tables
    CSharp,
}

/// Output record for one bone
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoneMappingEntry {
    pub bone: String,
    pub rest_pose_correction: Quat,
    pub coordinate_conversion: Quat,
}

impl BoneMappingEntry {
    /// Fallback for bones the skeleton does not have
    pub fn identity(bone: impl Into<String>) -> Self {
        Self {
            bone: bone.into(),
            rest_pose_correction: Quat::IDENTITY,
            coordinate_conversion: Quat::IDENTITY,
        }
    }

    pub fn render(&self, style: RowStyle, precision: usize) -> String {
        format!(
            "{}, {} {}",
            format_quaternion(self.rest_pose_correction, style, precision),
            format_quaternion(self.coordinate_conversion, style, precision),
            self.bone
        )
    }
}

/// Format one quaternion component.
///
/// `-0.00001` at precision 3 renders as `" 0.000f"`, never `"-0.000f"`.
pub fn format_component(value: f32, precision: usize) -> String {
    let formatted = format!("{value:.precision$}f");
    let formatted = match formatted.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| matches!(b, b'0' | b'.' | b'f')) => {
            magnitude.to_string()
        }
        _ => formatted,
    };
    if formatted.starts_with('-') {
        formatted
    } else {
        format!(" {formatted}")
    }
}

/// Format a quaternion in `(x, y, z, w)` component order
pub fn format_quaternion(q: Quat, style: RowStyle, precision: usize) -> String {
    let components = [q.x, q.y, q.z, q.w].map(|c| format_component(c, precision));
    match style {
        RowStyle::Tuple => format!("({})", components.join(", ")),
        RowStyle::CSharp => format!("new Quaternion({})", components.join(",")),
    }
}

/// Build the mapping entry for `bone` from the host's current state.
///
/// Missing bones fall back to a pair of identity quaternions.
pub fn mapping_entry<H: RigHost + ?Sized>(
    host: &H,
    bone: &str,
    eye_bones: &[String],
) -> BoneMappingEntry {
    let Some(id) = host.find_bone(bone) else {
        tracing::warn!("Bone '{}' does not exist, emitting identity", bone);
        return BoneMappingEntry::identity(bone);
    };

    let rest_pose_correction = if eye_bones.iter().any(|eye| eye == bone) {
        Quat::IDENTITY
    } else {
        host.pose_rotation(id)
    };

    BoneMappingEntry {
        bone: bone.to_string(),
        rest_pose_correction,
        coordinate_conversion: coordinate_conversion(host.bind_rotation(id)),
    }
}

/// All mapping rows of a run, in authored task order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MappingReport {
    pub entries: Vec<BoneMappingEntry>,
    #[serde(skip)]
    pub style: RowStyle,
    /// Digits after the decimal point in text rows
    #[serde(skip)]
    pub precision: usize,
}

impl MappingReport {
    pub fn new(entries: Vec<BoneMappingEntry>, style: RowStyle) -> Self {
        Self {
            entries,
            style,
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Rendered rows, one per entry
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .map(|e| e.render(self.style, self.precision))
    }

    /// Entries as a pretty-printed JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

impl fmt::Display for MappingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
