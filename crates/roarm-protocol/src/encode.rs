use crate::{ArmModel, Command, ProtocolError};
use serde_json::{json, Value};
use std::f64::consts::PI;

/// Wire speed is expressed in degrees-per-unit of the 2048-count encoder.
const SPEED_WIRE_SCALE: f64 = 180.0 / 2048.0;
/// Wire acceleration runs on a 254-count scale with a x100 divisor.
const ACC_WIRE_SCALE: f64 = 180.0 / (254.0 * 100.0);

/// Encode a validated command into its wire form: one UTF-8 JSON object plus
/// a trailing newline.
///
/// All per-model unit conventions live here: the gripper joint's mechanical
/// inversion (`π − rad`, `180 − deg`), the angle-family encoder rescaling of
/// speed/acc, and the per-model field names. These run exactly once, after
/// validation.
pub fn encode(model: ArmModel, cmd: &Command) -> Result<Vec<u8>, ProtocolError> {
    let obj = wire_object(model, cmd)?;
    let mut bytes = serde_json::to_vec(&obj)?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn wire_object(model: ArmModel, cmd: &Command) -> Result<Value, ProtocolError> {
    let t = cmd.protocol_id();
    let obj = match cmd {
        Command::EchoSet { cmd } => json!({"T": t, "cmd": cmd}),
        Command::MiddleSet => json!({"T": t, "id": 254}),
        Command::LedCtrl { led } => json!({"T": t, "led": led}),
        Command::TorqueSet { cmd } => json!({"T": t, "cmd": cmd}),
        Command::DynamicAdaptationSet { mode, torques } => {
            expect_len(model, torques.len())?;
            match model {
                ArmModel::M2 => json!({
                    "T": t, "mode": mode,
                    "b": torques[0], "s": torques[1], "e": torques[2], "h": torques[3],
                }),
                ArmModel::M3 => json!({
                    "T": t, "mode": mode,
                    "b": torques[0], "s": torques[1], "e": torques[2],
                    "t": torques[3], "r": torques[4], "h": torques[5],
                }),
            }
        }
        Command::FeedbackGet => json!({"T": t}),
        Command::JointRadianCtrl {
            joint,
            radian,
            speed,
            acc,
        } => {
            let rad = if *joint == model.gripper_joint() {
                PI - radian
            } else {
                *radian
            };
            json!({"T": t, "joint": joint, "rad": rad, "spd": speed, "acc": acc})
        }
        Command::JointsRadianCtrl {
            radians,
            speed,
            acc,
        } => {
            expect_len(model, radians.len())?;
            let hand = PI - radians[model.joint_count() - 1];
            match model {
                ArmModel::M2 => json!({
                    "T": t,
                    "base": radians[0], "shoulder": radians[1], "elbow": radians[2],
                    "hand": hand,
                    "spd": speed, "acc": acc,
                }),
                ArmModel::M3 => json!({
                    "T": t,
                    "base": radians[0], "shoulder": radians[1], "elbow": radians[2],
                    "wrist": radians[3], "roll": radians[4],
                    "hand": hand,
                    "spd": speed, "acc": acc,
                }),
            }
        }
        Command::JointAngleCtrl {
            joint,
            angle,
            speed,
            acc,
        } => {
            let angle = if *joint == model.gripper_joint() {
                180.0 - angle
            } else {
                *angle
            };
            json!({
                "T": t, "joint": joint, "angle": angle,
                "spd": f64::from(*speed) * SPEED_WIRE_SCALE,
                "acc": f64::from(*acc) * ACC_WIRE_SCALE,
            })
        }
        Command::JointsAngleCtrl { angles, speed, acc } => {
            expect_len(model, angles.len())?;
            let hand = 180.0 - angles[model.joint_count() - 1];
            let spd = f64::from(*speed) * SPEED_WIRE_SCALE;
            let acc = f64::from(*acc) * ACC_WIRE_SCALE;
            match model {
                ArmModel::M2 => json!({
                    "T": t,
                    "b": angles[0], "s": angles[1], "e": angles[2], "h": hand,
                    "spd": spd, "acc": acc,
                }),
                ArmModel::M3 => json!({
                    "T": t,
                    "b": angles[0], "s": angles[1], "e": angles[2],
                    "t": angles[3], "r": angles[4], "h": hand,
                    "spd": spd, "acc": acc,
                }),
            }
        }
        Command::GripperModeSet { mode } => json!({
            "T": t,
            "name": "boot",
            "step": format!("{{\"T\":1,\"mode\":{mode}}}"),
        }),
        Command::PoseCtrl { pose } => {
            expect_len(model, pose.len())?;
            match model {
                ArmModel::M2 => json!({
                    "T": t,
                    "x": pose[0], "y": pose[1], "z": pose[2],
                    "t": PI - pose[3].to_radians(),
                }),
                ArmModel::M3 => json!({
                    "T": t,
                    "x": pose[0], "y": pose[1], "z": pose[2],
                    "t": pose[3].to_radians(),
                    "r": pose[4].to_radians(),
                    "g": PI - pose[5].to_radians(),
                }),
            }
        }
        Command::WifiOnBoot { wifi_cmd } => json!({"T": t, "mode": wifi_cmd}),
        Command::ApSet { ssid, password } | Command::StaSet { ssid, password } => {
            json!({"T": t, "ssid": ssid, "password": password})
        }
        Command::ApStaSet {
            ap_ssid,
            ap_password,
            sta_ssid,
            sta_password,
        }
        | Command::WifiConfigCreateByInput {
            ap_ssid,
            ap_password,
            sta_ssid,
            sta_password,
        } => json!({
            "T": t,
            "ap_ssid": ap_ssid, "ap_password": ap_password,
            "sta_ssid": sta_ssid, "sta_password": sta_password,
        }),
        Command::WifiConfigCreateByStatus | Command::WifiStop => json!({"T": t}),
    };
    Ok(obj)
}

fn expect_len(model: ArmModel, got: usize) -> Result<(), ProtocolError> {
    let expected = model.joint_count();
    if got == expected {
        Ok(())
    } else {
        Err(ProtocolError::BadArity { expected, got })
    }
}
