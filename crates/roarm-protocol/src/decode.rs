use crate::{ArmModel, ProtocolError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Semantic snapshot of arm state, decoded from one feedback frame.
///
/// `joints` holds kinematic radians in mechanical order; the gripper slot is
/// already un-inverted, so callers never see the wire's mirrored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// End-effector position, mm.
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Base tilt in radians, reported by the 6-joint arm only.
    pub tilt: Option<f64>,
    /// Per-joint radians, gripper last.
    pub joints: Vec<f64>,
}

impl Feedback {
    /// Joint values converted to degrees.
    pub fn joint_degrees(&self) -> Vec<f64> {
        self.joints.iter().map(|r| r.to_degrees()).collect()
    }

    /// Kinematic radian of the gripper joint.
    pub fn gripper_radian(&self) -> Option<f64> {
        self.joints.last().copied()
    }
}

// The wire also carries per-joint torque telemetry (torB/torS/... on M2,
// tB/tS/... on M3); those fields are accepted and dropped here.
#[derive(Debug, Deserialize)]
struct M2Wire {
    x: f64,
    y: f64,
    z: f64,
    b: f64,
    s: f64,
    e: f64,
    t: f64,
}

#[derive(Debug, Deserialize)]
struct M3Wire {
    x: f64,
    y: f64,
    z: f64,
    tit: f64,
    b: f64,
    s: f64,
    e: f64,
    t: f64,
    r: f64,
    g: f64,
}

/// Decode one feedback frame into a [`Feedback`] snapshot.
///
/// The frame may still carry its `}\r\n` terminator. The gripper inversion
/// is undone here (`π − t` on M2, `π − g` on M3) so the caller always sees
/// the true kinematic angle.
pub fn decode(model: ArmModel, frame: &[u8]) -> Result<Feedback, ProtocolError> {
    match model {
        ArmModel::M2 => {
            let w: M2Wire = serde_json::from_slice(frame)?;
            Ok(Feedback {
                x: w.x,
                y: w.y,
                z: w.z,
                tilt: None,
                joints: vec![w.b, w.s, w.e, PI - w.t],
            })
        }
        ArmModel::M3 => {
            let w: M3Wire = serde_json::from_slice(frame)?;
            Ok(Feedback {
                x: w.x,
                y: w.y,
                z: w.z,
                tilt: Some(w.tit),
                joints: vec![w.b, w.s, w.e, w.t, w.r, PI - w.g],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode, Command};

    #[test]
    fn test_decode_m2_uninverts_gripper() {
        let frame = br#"{"T":1051,"x":120.5,"y":-3.0,"z":200.0,"b":0.1,"s":0.2,"e":1.5,"t":2.64,"torB":0,"torS":0,"torE":0,"torH":0}"#;
        let fb = decode(ArmModel::M2, frame).unwrap();
        assert_eq!(fb.x, 120.5);
        assert_eq!(fb.tilt, None);
        assert_eq!(fb.joints.len(), 4);
        assert_eq!(fb.joints[..3], [0.1, 0.2, 1.5]);
        assert!((fb.joints[3] - (PI - 2.64)).abs() < 1e-12);
    }

    #[test]
    fn test_decode_m3_carries_tilt() {
        let frame = br#"{"T":1051,"x":1.0,"y":2.0,"z":3.0,"tit":0.05,"b":0.1,"s":0.2,"e":0.3,"t":0.4,"r":0.5,"g":2.9,"tB":0,"tS":0,"tE":0,"tT":0,"tR":0,"tG":0}"#;
        let fb = decode(ArmModel::M3, frame).unwrap();
        assert_eq!(fb.tilt, Some(0.05));
        assert_eq!(fb.joints.len(), 6);
        assert_eq!(fb.joints[..5], [0.1, 0.2, 0.3, 0.4, 0.5]);
        assert!((fb.joints[5] - (PI - 2.9)).abs() < 1e-12);
    }

    #[test]
    fn test_decode_tolerates_frame_terminator() {
        let frame = b"{\"T\":1051,\"x\":0,\"y\":0,\"z\":0,\"b\":0,\"s\":0,\"e\":0,\"t\":0}\r\n";
        assert!(decode(ArmModel::M2, frame).is_ok());
    }

    #[test]
    fn test_decode_malformed_frame_errors() {
        let err = decode(ArmModel::M2, b"{\"T\":1051,\"x\":").unwrap_err();
        assert!(matches!(err, ProtocolError::Json(_)));

        // A frame for the wrong model is as malformed as truncated bytes.
        let m2_only = b"{\"T\":1051,\"x\":0,\"y\":0,\"z\":0,\"b\":0,\"s\":0,\"e\":0,\"t\":0}";
        assert!(decode(ArmModel::M3, m2_only).is_err());
    }

    #[test]
    fn test_gripper_inversion_is_self_inverse() {
        // Encoding mirrors the gripper radian; decoding mirrors it back.
        for (model, gripper) in [(ArmModel::M2, 4u8), (ArmModel::M3, 6u8)] {
            let sent = 0.75;
            let bytes = encode(
                model,
                &Command::JointRadianCtrl {
                    joint: gripper,
                    radian: sent,
                    speed: 100,
                    acc: 0,
                },
            )
            .unwrap();
            let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            let on_wire = v["rad"].as_f64().unwrap();

            let frame = match model {
                ArmModel::M2 => format!(
                    r#"{{"T":1051,"x":0,"y":0,"z":0,"b":0,"s":0,"e":0,"t":{on_wire}}}"#
                ),
                ArmModel::M3 => format!(
                    r#"{{"T":1051,"x":0,"y":0,"z":0,"tit":0,"b":0,"s":0,"e":0,"t":0,"r":0,"g":{on_wire}}}"#
                ),
            };
            let fb = decode(model, frame.as_bytes()).unwrap();
            let got = fb.gripper_radian().unwrap();
            assert!((got - sent).abs() < 1e-12, "{model}: {got} != {sent}");
        }
    }

    #[test]
    fn test_non_gripper_round_trip_is_exact() {
        let bytes = encode(
            ArmModel::M2,
            &Command::JointRadianCtrl {
                joint: 2,
                radian: -1.125,
                speed: 100,
                acc: 0,
            },
        )
        .unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["rad"].as_f64().unwrap(), -1.125);
    }
}
