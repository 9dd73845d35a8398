//! Wire protocol id catalog: the integer `T` field of every frame.

pub const JOINT_RADIAN_CTRL: u16 = 101;
pub const JOINTS_RADIAN_CTRL: u16 = 102;
pub const FEEDBACK_GET: u16 = 105;
pub const DYNAMIC_ADAPTATION_SET: u16 = 112;
pub const LED_CTRL: u16 = 114;
pub const JOINT_ANGLE_CTRL: u16 = 121;
pub const JOINTS_ANGLE_CTRL: u16 = 122;
pub const TORQUE_SET: u16 = 210;
pub const GRIPPER_MODE_SET: u16 = 222;
pub const WIFI_ON_BOOT: u16 = 401;
pub const AP_SET: u16 = 402;
pub const STA_SET: u16 = 403;
pub const APSTA_SET: u16 = 404;
pub const WIFI_CONFIG_CREATE_BY_STATUS: u16 = 406;
pub const WIFI_CONFIG_CREATE_BY_INPUT: u16 = 407;
pub const WIFI_STOP: u16 = 408;
pub const MIDDLE_SET: u16 = 502;
pub const ECHO_SET: u16 = 605;
pub const POSE_CTRL: u16 = 1041;

/// Id carried by feedback frames coming back from the arm.
pub const FEEDBACK_DATA: u16 = 1051;
