use crate::ClientError;
use roarm_protocol::{decode, encode, validate, ArmModel, Command, Feedback};
use roarm_transport::Transport;

/// Round-trip attempts before a command is given up on.
pub const DEFAULT_RETRY_BUDGET: u32 = 10;

/// What a completed round trip hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The validated command, echoed for fire-and-forget kinds.
    Ack(Command),
    /// Decoded arm state, for feedback requests.
    Feedback(Feedback),
}

/// One logical channel to the arm: validate → encode → send → receive →
/// decode, with bounded retry.
///
/// The session owns the transport and its buffers outright. Exclusive
/// access is enforced one level up (see [`crate::RoarmClient`]); a session
/// itself is `&mut`-only and never shared.
pub struct TransportSession {
    model: ArmModel,
    transport: Box<dyn Transport>,
    retry_budget: u32,
}

impl TransportSession {
    pub fn new(model: ArmModel, transport: Box<dyn Transport>) -> Self {
        Self {
            model,
            transport,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }

    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget.max(1);
        self
    }

    pub fn model(&self) -> ArmModel {
        self.model
    }

    /// Run one command through the full round trip.
    ///
    /// Validation failures abort before any bytes move. Transport failures
    /// and empty/undecodable responses are retried up to the budget; after
    /// that the caller gets [`ClientError::NoResponse`], which is distinct
    /// from any well-formed response.
    pub fn execute(&mut self, cmd: Command) -> Result<Response, ClientError> {
        let cmd = validate(self.model, cmd)?;
        let frame = encode(self.model, &cmd)?;

        if cmd.is_feedback_request() {
            for attempt in 1..=self.retry_budget {
                if let Some(feedback) = self.feedback_round_trip(&frame, attempt) {
                    return Ok(Response::Feedback(feedback));
                }
            }
        } else {
            let poll = encode(self.model, &Command::FeedbackGet)?;
            for attempt in 1..=self.retry_budget {
                if self.fire_and_poll(&frame, &poll, attempt) {
                    return Ok(Response::Ack(cmd.clone()));
                }
            }
        }
        Err(ClientError::NoResponse(self.retry_budget))
    }

    fn feedback_round_trip(&mut self, frame: &[u8], attempt: u32) -> Option<Feedback> {
        if let Err(e) = self.transport.send(frame) {
            tracing::warn!(attempt, "send failed: {e}");
            return None;
        }
        let received = match self.transport.recv() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(attempt, "no frame before timeout");
                self.reset_link();
                return None;
            }
            Err(e) => {
                tracing::warn!(attempt, "receive failed: {e}");
                self.reset_link();
                return None;
            }
        };
        let decoded = decode(self.model, &received);
        // Flush link buffers after every decode attempt so a malformed
        // frame never contaminates the next read.
        self.reset_link();
        match decoded {
            Ok(feedback) => Some(feedback),
            Err(e) => {
                tracing::error!(attempt, "feedback decode failed: {e}");
                None
            }
        }
    }

    /// Write the command, then the implicit feedback poll that lets the
    /// controller's state be observed even for fire-and-forget kinds. The
    /// attempt counts as delivered once both writes land.
    fn fire_and_poll(&mut self, frame: &[u8], poll: &[u8], attempt: u32) -> bool {
        if let Err(e) = self.transport.send(frame) {
            tracing::warn!(attempt, "send failed: {e}");
            return false;
        }
        if let Err(e) = self.transport.send(poll) {
            tracing::warn!(attempt, "feedback poll failed: {e}");
            return false;
        }
        true
    }

    fn reset_link(&mut self) {
        if let Err(e) = self.transport.reset() {
            tracing::warn!("link reset failed: {e}");
        }
    }
}
