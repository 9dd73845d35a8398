use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Arm variant. Selects joint count, wire field names, and limit arrays;
/// immutable for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmModel {
    /// 4-joint arm: base, shoulder, elbow, gripper.
    #[serde(rename = "roarm_m2")]
    M2,
    /// 6-joint arm: base, shoulder, elbow, wrist, roll, gripper.
    #[serde(rename = "roarm_m3")]
    M3,
}

/// Model identifier that maps to no known variant. Fatal at construction:
/// without a variant there is no limit table to validate against.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown arm model: {0}")]
pub struct UnknownModel(pub String);

impl FromStr for ArmModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roarm_m2" => Ok(ArmModel::M2),
            "roarm_m3" => Ok(ArmModel::M3),
            other => Err(UnknownModel(other.to_string())),
        }
    }
}

impl fmt::Display for ArmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmModel::M2 => write!(f, "roarm_m2"),
            ArmModel::M3 => write!(f, "roarm_m3"),
        }
    }
}

impl ArmModel {
    pub fn joint_count(self) -> usize {
        match self {
            ArmModel::M2 => 4,
            ArmModel::M3 => 6,
        }
    }

    /// 1-based id of the gripper joint (always the last one).
    pub fn gripper_joint(self) -> u8 {
        match self {
            ArmModel::M2 => 4,
            ArmModel::M3 => 6,
        }
    }

    /// Per-joint radians of the factory home pose.
    pub fn home_radians(self) -> &'static [f64] {
        match self {
            ArmModel::M2 => &[0.0, 0.0, 1.5708, 0.0],
            ArmModel::M3 => &[0.0, 0.0, 1.5708, 0.0, 0.0, 0.0],
        }
    }
}
