use crate::{ArmModel, Command, LimitClass};
use thiserror::Error;

/// Accepted range for the `speed` parameter (encoder counts).
pub const SPEED_RANGE: (i32, i32) = (0, 4096);
/// Accepted range for the `acc` parameter (encoder counts).
pub const ACC_RANGE: (i32, i32) = (0, 254);

/// How far inside the range an out-of-range speed/acc value lands.
const CLAMP_STEP: i32 = 10;

/// Parameter rejected before any bytes were sent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("the data supported by parameter {name} is {allowed:?}, but the received value is {got}")]
    UnsupportedValue {
        name: &'static str,
        allowed: &'static [u8],
        got: u8,
    },
    #[error("the joint id should be in {valid:?}, but received {got}")]
    UnknownJoint { valid: &'static [u8], got: u8 },
    #[error("{name} value not right, should be {min} ~ {max}, but received {got}")]
    OutOfRange {
        name: &'static str,
        min: f64,
        max: f64,
        got: f64,
    },
    #[error(
        "invalid {name} value at index {index}: received {got} but {name} should be {min} ~ {max}"
    )]
    IndexOutOfRange {
        name: &'static str,
        index: usize,
        min: f64,
        max: f64,
        got: f64,
    },
    #[error("the length of {name} must be {expected}, got {got}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },
}

/// Reject a value outside a small enumerated set (`cmd`, `mode`, `wifi_cmd`).
pub fn check_switch(
    name: &'static str,
    value: u8,
    allowed: &'static [u8],
) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedValue {
            name,
            allowed,
            got: value,
        })
    }
}

/// Reject a joint id that is not in the model's joint list.
pub fn check_joint(model: ArmModel, joint: u8) -> Result<(), ValidationError> {
    let valid = model.limits().joints;
    if valid.contains(&joint) {
        Ok(())
    } else {
        Err(ValidationError::UnknownJoint { valid, got: joint })
    }
}

/// Reject a scalar outside the bound slot the joint id maps to.
///
/// The slot is found by mapping the 1-based joint id through the model's
/// joint list; `check_joint` must have accepted the id first.
pub fn check_joint_bound(
    model: ArmModel,
    class: LimitClass,
    joint: u8,
    value: f64,
) -> Result<(), ValidationError> {
    let table = model.limits();
    let slot = usize::from(joint)
        .checked_sub(1)
        .and_then(|i| table.joints.get(i))
        .map(|&j| usize::from(j) - 1)
        .ok_or(ValidationError::UnknownJoint {
            valid: table.joints,
            got: joint,
        })?;
    let (min, max) = table.bounds(class);
    if value < min[slot] || value > max[slot] {
        return Err(ValidationError::OutOfRange {
            name: class.scalar_name(),
            min: min[slot],
            max: max[slot],
            got: value,
        });
    }
    Ok(())
}

/// Reject a per-joint vector with the wrong length or any element outside
/// its slot's bounds. The error names the offending index and both the
/// received and allowed values.
pub fn check_vector_bounds(
    model: ArmModel,
    class: LimitClass,
    values: &[f64],
) -> Result<(), ValidationError> {
    let expected = model.joint_count();
    if values.len() != expected {
        return Err(ValidationError::LengthMismatch {
            name: class.name(),
            expected,
            got: values.len(),
        });
    }
    let (min, max) = model.limits().bounds(class);
    for (index, &value) in values.iter().enumerate() {
        if value < min[index] || value > max[index] {
            return Err(ValidationError::IndexOutOfRange {
                name: class.name(),
                index,
                min: min[index],
                max: max[index],
                got: value,
            });
        }
    }
    Ok(())
}

/// Forgiving clamp for `speed`: out-of-range values are pulled inside the
/// range by [`CLAMP_STEP`] units instead of rejected.
pub fn clamp_speed(value: i32) -> i32 {
    clamp_inward("speed", value, SPEED_RANGE)
}

/// Forgiving clamp for `acc`, same policy as [`clamp_speed`].
pub fn clamp_acc(value: i32) -> i32 {
    clamp_inward("acc", value, ACC_RANGE)
}

fn clamp_inward(name: &'static str, value: i32, (min, max): (i32, i32)) -> i32 {
    if value < min {
        tracing::warn!(
            "{name} value not right, should be between {min} ~ {max}, but received {value}"
        );
        min + CLAMP_STEP
    } else if value > max {
        tracing::warn!(
            "{name} value not right, should be between {min} ~ {max}, but received {value}"
        );
        max - CLAMP_STEP
    } else {
        value
    }
}

/// Check every parameter of `cmd` in argument order and hand back the
/// command with the forgiving clamps applied.
///
/// A hard-reject violation aborts the whole command before any encoding
/// happens; only `speed`/`acc` are adjusted rather than rejected.
pub fn validate(model: ArmModel, cmd: Command) -> Result<Command, ValidationError> {
    match cmd {
        Command::EchoSet { cmd } => {
            check_switch("cmd", cmd, &[0, 1])?;
            Ok(Command::EchoSet { cmd })
        }
        Command::MiddleSet => Ok(Command::MiddleSet),
        Command::LedCtrl { led } => Ok(Command::LedCtrl { led }),
        Command::TorqueSet { cmd } => {
            check_switch("cmd", cmd, &[0, 1])?;
            Ok(Command::TorqueSet { cmd })
        }
        Command::DynamicAdaptationSet { mode, torques } => {
            check_switch("mode", mode, &[0, 1])?;
            let as_f64: Vec<f64> = torques.iter().map(|&t| f64::from(t)).collect();
            check_vector_bounds(model, LimitClass::Torques, &as_f64)?;
            Ok(Command::DynamicAdaptationSet { mode, torques })
        }
        Command::FeedbackGet => Ok(Command::FeedbackGet),
        Command::JointRadianCtrl {
            joint,
            radian,
            speed,
            acc,
        } => {
            check_joint(model, joint)?;
            check_joint_bound(model, LimitClass::Radians, joint, radian)?;
            Ok(Command::JointRadianCtrl {
                joint,
                radian,
                speed: clamp_speed(speed),
                acc: clamp_acc(acc),
            })
        }
        Command::JointsRadianCtrl {
            radians,
            speed,
            acc,
        } => {
            check_vector_bounds(model, LimitClass::Radians, &radians)?;
            Ok(Command::JointsRadianCtrl {
                radians,
                speed: clamp_speed(speed),
                acc: clamp_acc(acc),
            })
        }
        Command::JointAngleCtrl {
            joint,
            angle,
            speed,
            acc,
        } => {
            check_joint(model, joint)?;
            check_joint_bound(model, LimitClass::Angles, joint, angle)?;
            Ok(Command::JointAngleCtrl {
                joint,
                angle,
                speed: clamp_speed(speed),
                acc: clamp_acc(acc),
            })
        }
        Command::JointsAngleCtrl { angles, speed, acc } => {
            check_vector_bounds(model, LimitClass::Angles, &angles)?;
            Ok(Command::JointsAngleCtrl {
                angles,
                speed: clamp_speed(speed),
                acc: clamp_acc(acc),
            })
        }
        Command::GripperModeSet { mode } => {
            check_switch("mode", mode, &[0, 1])?;
            Ok(Command::GripperModeSet { mode })
        }
        Command::PoseCtrl { pose } => {
            check_vector_bounds(model, LimitClass::Positions, &pose)?;
            Ok(Command::PoseCtrl { pose })
        }
        Command::WifiOnBoot { wifi_cmd } => {
            check_switch("wifi_cmd", wifi_cmd, &[0, 1, 2, 3])?;
            Ok(Command::WifiOnBoot { wifi_cmd })
        }
        // Credentials are typed text; no length or charset rule applies.
        cmd @ (Command::ApSet { .. }
        | Command::StaSet { .. }
        | Command::ApStaSet { .. }
        | Command::WifiConfigCreateByStatus
        | Command::WifiConfigCreateByInput { .. }
        | Command::WifiStop) => Ok(cmd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_accepts_and_rejects() {
        assert!(check_switch("cmd", 0, &[0, 1]).is_ok());
        assert!(check_switch("cmd", 1, &[0, 1]).is_ok());
        let err = check_switch("cmd", 5, &[0, 1]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("cmd"));
        assert!(msg.contains('5'));
    }

    #[test]
    fn test_wifi_cmd_set() {
        for v in 0..=3 {
            assert!(check_switch("wifi_cmd", v, &[0, 1, 2, 3]).is_ok());
        }
        assert!(check_switch("wifi_cmd", 4, &[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_joint_membership() {
        assert!(check_joint(ArmModel::M2, 4).is_ok());
        assert!(check_joint(ArmModel::M2, 5).is_err());
        assert!(check_joint(ArmModel::M3, 6).is_ok());
        assert!(check_joint(ArmModel::M3, 0).is_err());
    }

    #[test]
    fn test_scalar_bound_edges() {
        // Joint 2 radians on M2: [-1.9, 1.9]; endpoints accepted.
        assert!(check_joint_bound(ArmModel::M2, LimitClass::Radians, 2, 1.9).is_ok());
        assert!(check_joint_bound(ArmModel::M2, LimitClass::Radians, 2, -1.9).is_ok());
        let err = check_joint_bound(ArmModel::M2, LimitClass::Radians, 2, 2.0).unwrap_err();
        match err {
            ValidationError::OutOfRange {
                name, min, max, got, ..
            } => {
                assert_eq!(name, "radian");
                assert_eq!(min, -1.9);
                assert_eq!(max, 1.9);
                assert_eq!(got, 2.0);
            }
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn test_vector_length_must_match() {
        let err =
            check_vector_bounds(ArmModel::M3, LimitClass::Radians, &[0.0; 4]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                name: "radians",
                expected: 6,
                got: 4,
            }
        );
    }

    #[test]
    fn test_vector_reports_offending_index() {
        let mut radians = vec![0.0; 4];
        radians[2] = 9.0;
        let err = check_vector_bounds(ArmModel::M2, LimitClass::Radians, &radians).unwrap_err();
        match err {
            ValidationError::IndexOutOfRange { index, got, .. } => {
                assert_eq!(index, 2);
                assert_eq!(got, 9.0);
            }
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn test_speed_clamps_never_reject() {
        assert_eq!(clamp_speed(5000), 4086);
        assert_eq!(clamp_speed(-50), 10);
        assert_eq!(clamp_speed(0), 0);
        assert_eq!(clamp_speed(4096), 4096);
    }

    #[test]
    fn test_acc_clamps_never_reject() {
        assert_eq!(clamp_acc(300), 244);
        assert_eq!(clamp_acc(-1), 10);
        assert_eq!(clamp_acc(254), 254);
    }

    #[test]
    fn test_validate_applies_clamp_to_command() {
        let cmd = Command::JointRadianCtrl {
            joint: 1,
            radian: 0.5,
            speed: 5000,
            acc: -50,
        };
        match validate(ArmModel::M2, cmd).unwrap() {
            Command::JointRadianCtrl { speed, acc, .. } => {
                assert_eq!(speed, 4086);
                assert_eq!(acc, 10);
            }
            other => panic!("wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_before_clamping_matters() {
        let cmd = Command::JointRadianCtrl {
            joint: 9,
            radian: 0.5,
            speed: 100,
            acc: 0,
        };
        assert!(matches!(
            validate(ArmModel::M2, cmd),
            Err(ValidationError::UnknownJoint { got: 9, .. })
        ));
    }

    #[test]
    fn test_validate_pose_uses_position_bounds() {
        let ok = Command::PoseCtrl {
            pose: vec![100.0, 0.0, 300.0, 45.0],
        };
        assert!(validate(ArmModel::M2, ok).is_ok());

        let bad = Command::PoseCtrl {
            pose: vec![100.0, 0.0, 700.0, 45.0],
        };
        let err = validate(ArmModel::M2, bad).unwrap_err();
        match err {
            ValidationError::IndexOutOfRange { name, index, .. } => {
                assert_eq!(name, "positions");
                assert_eq!(index, 2);
            }
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_torques() {
        let ok = Command::DynamicAdaptationSet {
            mode: 1,
            torques: vec![500, 500, 500, 500],
        };
        assert!(validate(ArmModel::M2, ok).is_ok());

        let bad = Command::DynamicAdaptationSet {
            mode: 1,
            torques: vec![500, 0, 500, 500],
        };
        assert!(matches!(
            validate(ArmModel::M2, bad),
            Err(ValidationError::IndexOutOfRange { index: 1, .. })
        ));
    }

    #[test]
    fn test_credentials_pass_through() {
        let cmd = Command::ApSet {
            ssid: "arm".to_string(),
            password: "12345678".to_string(),
        };
        assert_eq!(validate(ArmModel::M2, cmd.clone()).unwrap(), cmd);
    }
}
