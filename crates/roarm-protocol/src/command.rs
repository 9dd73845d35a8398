use crate::ids;

/// A semantic command bound for the arm, one variant per wire operation.
///
/// Values carry already-typed arguments in device units (radians, degrees,
/// millimeters, encoder speed/acc counts). Construction is cheap; a command
/// is validated and consumed once by the codec.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Enable (1) or disable (0) command echo on the controller.
    EchoSet { cmd: u8 },
    /// Store the current pose as the neutral calibration.
    MiddleSet,
    /// LED brightness, 0 (dark) to 255 (full).
    LedCtrl { led: u8 },
    /// Enable (1) or disable (0) holding torque on all joints.
    TorqueSet { cmd: u8 },
    /// Dynamic external-force adaptation with per-joint torque setpoints.
    DynamicAdaptationSet { mode: u8, torques: Vec<i32> },
    /// Request one feedback frame.
    FeedbackGet,
    /// Drive one joint to a radian target.
    JointRadianCtrl {
        joint: u8,
        radian: f64,
        speed: i32,
        acc: i32,
    },
    /// Drive all joints to radian targets.
    JointsRadianCtrl {
        radians: Vec<f64>,
        speed: i32,
        acc: i32,
    },
    /// Drive one joint to a degree target.
    JointAngleCtrl {
        joint: u8,
        angle: f64,
        speed: i32,
        acc: i32,
    },
    /// Drive all joints to degree targets.
    JointsAngleCtrl {
        angles: Vec<f64>,
        speed: i32,
        acc: i32,
    },
    /// Select gripper (0) or wrist (1) behavior for the last joint.
    GripperModeSet { mode: u8 },
    /// Cartesian pose target: x/y/z in mm plus the angular tail in degrees.
    PoseCtrl { pose: Vec<f64> },
    /// Wifi mode applied on boot: 0 off, 1 AP, 2 STA, 3 AP+STA.
    WifiOnBoot { wifi_cmd: u8 },
    ApSet {
        ssid: String,
        password: String,
    },
    StaSet {
        ssid: String,
        password: String,
    },
    ApStaSet {
        ap_ssid: String,
        ap_password: String,
        sta_ssid: String,
        sta_password: String,
    },
    /// Persist the wifi config currently in effect.
    WifiConfigCreateByStatus,
    /// Persist an explicitly supplied wifi config.
    WifiConfigCreateByInput {
        ap_ssid: String,
        ap_password: String,
        sta_ssid: String,
        sta_password: String,
    },
    WifiStop,
}

impl Command {
    /// The numeric protocol id stamped into the wire object's `T` field.
    pub fn protocol_id(&self) -> u16 {
        match self {
            Command::EchoSet { .. } => ids::ECHO_SET,
            Command::MiddleSet => ids::MIDDLE_SET,
            Command::LedCtrl { .. } => ids::LED_CTRL,
            Command::TorqueSet { .. } => ids::TORQUE_SET,
            Command::DynamicAdaptationSet { .. } => ids::DYNAMIC_ADAPTATION_SET,
            Command::FeedbackGet => ids::FEEDBACK_GET,
            Command::JointRadianCtrl { .. } => ids::JOINT_RADIAN_CTRL,
            Command::JointsRadianCtrl { .. } => ids::JOINTS_RADIAN_CTRL,
            Command::JointAngleCtrl { .. } => ids::JOINT_ANGLE_CTRL,
            Command::JointsAngleCtrl { .. } => ids::JOINTS_ANGLE_CTRL,
            Command::GripperModeSet { .. } => ids::GRIPPER_MODE_SET,
            Command::PoseCtrl { .. } => ids::POSE_CTRL,
            Command::WifiOnBoot { .. } => ids::WIFI_ON_BOOT,
            Command::ApSet { .. } => ids::AP_SET,
            Command::StaSet { .. } => ids::STA_SET,
            Command::ApStaSet { .. } => ids::APSTA_SET,
            Command::WifiConfigCreateByStatus => ids::WIFI_CONFIG_CREATE_BY_STATUS,
            Command::WifiConfigCreateByInput { .. } => ids::WIFI_CONFIG_CREATE_BY_INPUT,
            Command::WifiStop => ids::WIFI_STOP,
        }
    }

    /// Whether the round trip for this command waits on a feedback frame.
    pub fn is_feedback_request(&self) -> bool {
        matches!(self, Command::FeedbackGet)
    }
}
