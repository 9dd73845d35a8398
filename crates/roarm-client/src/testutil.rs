//! Scripted transport doubles shared by the crate's tests.

use roarm_transport::{Result as TransportResult, Transport, TransportError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct LogInner {
    sent: Vec<Vec<u8>>,
    resets: usize,
    send_attempts: usize,
}

/// Shared view onto everything a [`ScriptedTransport`] did.
#[derive(Clone, Default)]
pub(crate) struct TransportLog(Arc<Mutex<LogInner>>);

impl TransportLog {
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.0.lock().unwrap().sent.clone()
    }

    pub fn resets(&self) -> usize {
        self.0.lock().unwrap().resets
    }

    pub fn send_attempts(&self) -> usize {
        self.0.lock().unwrap().send_attempts
    }
}

/// In-process [`Transport`] with scripted replies.
pub(crate) struct ScriptedTransport {
    log: TransportLog,
    replies: VecDeque<Vec<u8>>,
    looping_reply: Option<Vec<u8>>,
    fail_sends: bool,
}

impl ScriptedTransport {
    /// Records sends; `recv` yields queued replies, then nothing.
    pub fn new() -> (Self, TransportLog) {
        let log = TransportLog::default();
        (
            Self {
                log: log.clone(),
                replies: VecDeque::new(),
                looping_reply: None,
                fail_sends: false,
            },
            log.clone(),
        )
    }

    /// Serves the same reply on every `recv`, forever.
    pub fn looping(reply: &[u8]) -> (Self, TransportLog) {
        let (mut t, log) = Self::new();
        t.looping_reply = Some(reply.to_vec());
        (t, log)
    }

    /// Every send fails with an I/O error.
    pub fn failing() -> (Self, TransportLog) {
        let (mut t, log) = Self::new();
        t.fail_sends = true;
        (t, log)
    }

    pub fn push_reply(&mut self, reply: &[u8]) {
        self.replies.push_back(reply.to_vec());
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, frame: &[u8]) -> TransportResult<()> {
        let mut log = self.log.0.lock().unwrap();
        log.send_attempts += 1;
        if self.fail_sends {
            return Err(TransportError::Io("scripted send failure".to_string()));
        }
        log.sent.push(frame.to_vec());
        Ok(())
    }

    fn recv(&mut self) -> TransportResult<Option<Vec<u8>>> {
        if let Some(reply) = self.replies.pop_front() {
            return Ok(Some(reply));
        }
        Ok(self.looping_reply.clone())
    }

    fn reset(&mut self) -> TransportResult<()> {
        self.log.0.lock().unwrap().resets += 1;
        Ok(())
    }
}
