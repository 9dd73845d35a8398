use crate::{ClientError, Response, RoarmConfig, TransportSession};
use roarm_protocol::{ArmModel, Command, Feedback};
use roarm_transport::Transport;
use std::sync::Mutex;
use std::time::Duration;

/// Thread-safe handle to one arm.
///
/// All operations funnel through a single [`TransportSession`] behind a
/// mutex, so concurrent callers serialize strictly: at most one round trip
/// is in flight system-wide, and two commands' bytes never interleave on
/// the channel. There is no timeout on the lock itself; a stalled holder
/// blocks everyone behind it.
pub struct RoarmClient {
    model: ArmModel,
    session: Mutex<TransportSession>,
}

impl RoarmClient {
    pub fn new(model: ArmModel, transport: Box<dyn Transport>) -> Self {
        Self {
            model,
            session: Mutex::new(TransportSession::new(model, transport)),
        }
    }

    pub fn with_session(session: TransportSession) -> Self {
        Self {
            model: session.model(),
            session: Mutex::new(session),
        }
    }

    /// Open a serial link to the arm (115200 8N1 unless configured
    /// otherwise).
    #[cfg(feature = "serial")]
    pub fn open_serial(
        model: ArmModel,
        port: &str,
        baud: u32,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let channel = roarm_transport::SerialChannel::open(port, baud, timeout)?;
        let transport = roarm_transport::LineTransport::with_read_timeout(channel, timeout);
        Ok(Self::new(model, Box::new(transport)))
    }

    /// Connect to the arm's HTTP bridge.
    #[cfg(feature = "http")]
    pub fn connect_http(model: ArmModel, host: &str) -> Result<Self, ClientError> {
        let transport = roarm_transport::HttpTransport::connect(host)?;
        Ok(Self::new(model, Box::new(transport)))
    }

    /// Build a client from a [`RoarmConfig`], honoring its timeout and
    /// retry budget.
    pub fn from_config(config: &RoarmConfig) -> Result<Self, ClientError> {
        let transport = config.open_transport()?;
        let session = TransportSession::new(config.model, transport)
            .with_retry_budget(config.retry_budget);
        Ok(Self::with_session(session))
    }

    pub fn model(&self) -> ArmModel {
        self.model
    }

    /// Run one command under the session lock.
    pub fn execute(&self, cmd: Command) -> Result<Response, ClientError> {
        let mut session = self.session.lock().map_err(|_| ClientError::LockPoisoned)?;
        session.execute(cmd)
    }

    fn ack(&self, cmd: Command) -> Result<Command, ClientError> {
        match self.execute(cmd)? {
            Response::Ack(echo) => Ok(echo),
            Response::Feedback(_) => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Enable (1) or disable (0) command echo.
    pub fn echo_set(&self, cmd: u8) -> Result<Command, ClientError> {
        self.ack(Command::EchoSet { cmd })
    }

    /// Store the current pose as the neutral calibration.
    pub fn middle_set(&self) -> Result<Command, ClientError> {
        self.ack(Command::MiddleSet)
    }

    /// Drive all joints to the factory home pose.
    pub fn move_init(&self) -> Result<Command, ClientError> {
        self.joints_radian_ctrl(self.model.home_radians().to_vec(), 100, 0)
    }

    /// LED brightness, 0 (dark) to 255 (full).
    pub fn led_ctrl(&self, led: u8) -> Result<Command, ClientError> {
        self.ack(Command::LedCtrl { led })
    }

    /// Ramp the LED up and back down over `duration`.
    pub fn breath_led(&self, duration: Duration, steps: u32) -> Result<(), ClientError> {
        if steps == 0 {
            return Ok(());
        }
        let pause = duration / (2 * steps);
        for i in 0..=steps {
            let led = (f64::from(i) / f64::from(steps) * 255.0) as u8;
            self.led_ctrl(led)?;
            std::thread::sleep(pause);
        }
        for i in 0..=steps {
            let led = ((1.0 - f64::from(i) / f64::from(steps)) * 255.0) as u8;
            self.led_ctrl(led)?;
            std::thread::sleep(pause);
        }
        Ok(())
    }

    /// Enable (1) or disable (0) holding torque on all joints.
    pub fn torque_set(&self, cmd: u8) -> Result<Command, ClientError> {
        self.ack(Command::TorqueSet { cmd })
    }

    /// Dynamic external-force adaptation with per-joint torque setpoints
    /// in [1, 1000].
    pub fn dynamic_adaptation_set(
        &self,
        mode: u8,
        torques: Vec<i32>,
    ) -> Result<Command, ClientError> {
        self.ack(Command::DynamicAdaptationSet { mode, torques })
    }

    /// Request one feedback frame and decode it.
    pub fn feedback_get(&self) -> Result<Feedback, ClientError> {
        match self.execute(Command::FeedbackGet)? {
            Response::Feedback(feedback) => Ok(feedback),
            Response::Ack(_) => Err(ClientError::UnexpectedResponse),
        }
    }

    pub fn joint_radian_ctrl(
        &self,
        joint: u8,
        radian: f64,
        speed: i32,
        acc: i32,
    ) -> Result<Command, ClientError> {
        self.ack(Command::JointRadianCtrl {
            joint,
            radian,
            speed,
            acc,
        })
    }

    pub fn joints_radian_ctrl(
        &self,
        radians: Vec<f64>,
        speed: i32,
        acc: i32,
    ) -> Result<Command, ClientError> {
        self.ack(Command::JointsRadianCtrl {
            radians,
            speed,
            acc,
        })
    }

    /// Current per-joint radians, gripper un-inverted.
    pub fn joints_radian_get(&self) -> Result<Vec<f64>, ClientError> {
        Ok(self.feedback_get()?.joints)
    }

    pub fn joint_angle_ctrl(
        &self,
        joint: u8,
        angle: f64,
        speed: i32,
        acc: i32,
    ) -> Result<Command, ClientError> {
        self.ack(Command::JointAngleCtrl {
            joint,
            angle,
            speed,
            acc,
        })
    }

    pub fn joints_angle_ctrl(
        &self,
        angles: Vec<f64>,
        speed: i32,
        acc: i32,
    ) -> Result<Command, ClientError> {
        self.ack(Command::JointsAngleCtrl { angles, speed, acc })
    }

    /// Current per-joint angles in degrees.
    pub fn joints_angle_get(&self) -> Result<Vec<f64>, ClientError> {
        Ok(self.feedback_get()?.joint_degrees())
    }

    /// Select gripper (0) or wrist (1) behavior for the last joint.
    pub fn gripper_mode_set(&self, mode: u8) -> Result<Command, ClientError> {
        self.ack(Command::GripperModeSet { mode })
    }

    /// Single-joint radian control addressed at the gripper.
    pub fn gripper_radian_ctrl(
        &self,
        radian: f64,
        speed: i32,
        acc: i32,
    ) -> Result<Command, ClientError> {
        self.joint_radian_ctrl(self.model.gripper_joint(), radian, speed, acc)
    }

    pub fn gripper_angle_ctrl(
        &self,
        angle: f64,
        speed: i32,
        acc: i32,
    ) -> Result<Command, ClientError> {
        self.joint_angle_ctrl(self.model.gripper_joint(), angle, speed, acc)
    }

    pub fn gripper_radian_get(&self) -> Result<f64, ClientError> {
        self.feedback_get()?
            .gripper_radian()
            .ok_or(ClientError::UnexpectedResponse)
    }

    pub fn gripper_angle_get(&self) -> Result<f64, ClientError> {
        Ok(self.gripper_radian_get()?.to_degrees())
    }

    /// Cartesian pose control: x/y/z in mm plus the angular tail in
    /// degrees (tool for M2; tilt/roll/gripper for M3).
    pub fn pose_ctrl(&self, pose: Vec<f64>) -> Result<Command, ClientError> {
        self.ack(Command::PoseCtrl { pose })
    }

    /// Current pose in base coordinates, angular components in degrees.
    pub fn pose_get(&self) -> Result<Vec<f64>, ClientError> {
        let fb = self.feedback_get()?;
        let pose = match self.model {
            ArmModel::M2 => vec![fb.x, fb.y, fb.z, fb.joints[3].to_degrees()],
            ArmModel::M3 => vec![
                fb.x,
                fb.y,
                fb.z,
                fb.tilt.unwrap_or(0.0).to_degrees(),
                fb.joints[4].to_degrees(),
                fb.joints[5].to_degrees(),
            ],
        };
        Ok(pose)
    }

    /// Wifi mode applied on boot: 0 off, 1 AP, 2 STA, 3 AP+STA.
    pub fn wifi_on_boot(&self, wifi_cmd: u8) -> Result<Command, ClientError> {
        self.ack(Command::WifiOnBoot { wifi_cmd })
    }

    pub fn ap_set(&self, ssid: &str, password: &str) -> Result<Command, ClientError> {
        self.ack(Command::ApSet {
            ssid: ssid.to_string(),
            password: password.to_string(),
        })
    }

    pub fn sta_set(&self, ssid: &str, password: &str) -> Result<Command, ClientError> {
        self.ack(Command::StaSet {
            ssid: ssid.to_string(),
            password: password.to_string(),
        })
    }

    pub fn apsta_set(
        &self,
        ap_ssid: &str,
        ap_password: &str,
        sta_ssid: &str,
        sta_password: &str,
    ) -> Result<Command, ClientError> {
        self.ack(Command::ApStaSet {
            ap_ssid: ap_ssid.to_string(),
            ap_password: ap_password.to_string(),
            sta_ssid: sta_ssid.to_string(),
            sta_password: sta_password.to_string(),
        })
    }

    pub fn wifi_config_create_by_status(&self) -> Result<Command, ClientError> {
        self.ack(Command::WifiConfigCreateByStatus)
    }

    pub fn wifi_config_create_by_input(
        &self,
        ap_ssid: &str,
        ap_password: &str,
        sta_ssid: &str,
        sta_password: &str,
    ) -> Result<Command, ClientError> {
        self.ack(Command::WifiConfigCreateByInput {
            ap_ssid: ap_ssid.to_string(),
            ap_password: ap_password.to_string(),
            sta_ssid: sta_ssid.to_string(),
            sta_password: sta_password.to_string(),
        })
    }

    pub fn wifi_stop(&self) -> Result<Command, ClientError> {
        self.ack(Command::WifiStop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScriptedTransport;
    use serde_json::Value;
    use std::f64::consts::PI;

    const M3_FEEDBACK: &[u8] = b"{\"T\":1051,\"x\":100.0,\"y\":0,\"z\":50.0,\"tit\":0.1,\"b\":0,\"s\":0,\"e\":0,\"t\":0.2,\"r\":0.3,\"g\":2.8}\r\n";

    fn parse(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_move_init_targets_home_pose() {
        let (transport, log) = ScriptedTransport::new();
        let client = RoarmClient::new(ArmModel::M2, Box::new(transport));
        client.move_init().unwrap();

        let sent = log.sent();
        let v = parse(&sent[0]);
        assert_eq!(v["T"], 102);
        assert_eq!(v["base"], 0.0);
        assert_eq!(v["elbow"], 1.5708);
        let hand = v["hand"].as_f64().unwrap();
        assert!((hand - PI).abs() < 1e-12);
        assert_eq!(v["spd"], 100);
    }

    #[test]
    fn test_gripper_ops_address_last_joint() {
        for (model, gripper) in [(ArmModel::M2, 4), (ArmModel::M3, 6)] {
            let (transport, log) = ScriptedTransport::new();
            let client = RoarmClient::new(model, Box::new(transport));
            client.gripper_radian_ctrl(0.5, 100, 0).unwrap();
            let v = parse(&log.sent()[0]);
            assert_eq!(v["T"], 101);
            assert_eq!(v["joint"], gripper);
        }
    }

    #[test]
    fn test_feedback_projections() {
        let (transport, _log) = ScriptedTransport::looping(M3_FEEDBACK);
        let client = RoarmClient::new(ArmModel::M3, Box::new(transport));

        let radians = client.joints_radian_get().unwrap();
        assert_eq!(radians.len(), 6);
        assert!((radians[5] - (PI - 2.8)).abs() < 1e-12);

        let angles = client.joints_angle_get().unwrap();
        assert!((angles[3] - 0.2f64.to_degrees()).abs() < 1e-9);

        let gripper = client.gripper_angle_get().unwrap();
        assert!((gripper - (PI - 2.8).to_degrees()).abs() < 1e-9);
    }

    #[test]
    fn test_pose_get_converts_angular_tail_to_degrees() {
        let (transport, _log) = ScriptedTransport::looping(M3_FEEDBACK);
        let client = RoarmClient::new(ArmModel::M3, Box::new(transport));
        let pose = client.pose_get().unwrap();
        assert_eq!(pose.len(), 6);
        assert_eq!(pose[..3], [100.0, 0.0, 50.0]);
        assert!((pose[3] - 0.1f64.to_degrees()).abs() < 1e-9);
        assert!((pose[4] - 0.3f64.to_degrees()).abs() < 1e-9);
        assert!((pose[5] - (PI - 2.8).to_degrees()).abs() < 1e-9);
    }

    #[test]
    fn test_breath_led_sweeps_brightness() {
        let (transport, log) = ScriptedTransport::new();
        let client = RoarmClient::new(ArmModel::M2, Box::new(transport));
        client
            .breath_led(Duration::from_millis(4), 2)
            .unwrap();

        // Each led_ctrl writes the command plus the implicit poll.
        let led_frames: Vec<Value> = log
            .sent()
            .iter()
            .map(|b| parse(b))
            .filter(|v| v["T"] == 114)
            .collect();
        assert_eq!(led_frames.len(), 6);
        assert_eq!(led_frames[0]["led"], 0);
        assert_eq!(led_frames[2]["led"], 255);
        assert_eq!(led_frames[5]["led"], 0);
    }

    #[test]
    fn test_concurrent_callers_never_interleave() {
        let (transport, log) = ScriptedTransport::new();
        let client = RoarmClient::new(ArmModel::M2, Box::new(transport));

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..8 {
                        client.torque_set(1).unwrap();
                    }
                });
            }
        });

        // Every command frame must be immediately followed by its own
        // feedback poll: proof that round trips never interleave.
        let sent = log.sent();
        assert_eq!(sent.len(), 2 * 4 * 8);
        for pair in sent.chunks(2) {
            assert_eq!(parse(&pair[0])["T"], 210);
            assert_eq!(parse(&pair[1])["T"], 105);
        }
    }
}
