use crate::{ByteChannel, Result};
use std::collections::VecDeque;

/// A simple in-process byte channel standing in for a serial link.
///
/// Incoming bytes are scripted two ways: `feed` queues a chunk that becomes
/// readable on its own (one chunk per poll, to exercise partial delivery),
/// and `reply_with` queues a chunk that becomes readable only after the next
/// write, the way a device answers a request. Every write is captured for
/// assertions.
#[derive(Default)]
pub struct MockChannel {
    feed: VecDeque<Vec<u8>>,
    replies: VecDeque<Vec<u8>>,
    rx: Vec<u8>,
    writes: Vec<Vec<u8>>,
    input_clears: usize,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chunk the channel will deliver on a later poll.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.feed.push_back(chunk.to_vec());
    }

    /// Queue a chunk delivered only after the next write.
    pub fn reply_with(&mut self, chunk: &[u8]) {
        self.replies.push_back(chunk.to_vec());
    }

    /// Every buffer written so far, in write order.
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    /// How many times the input queue was flushed.
    pub fn input_clears(&self) -> usize {
        self.input_clears
    }

    fn promote_feed(&mut self) {
        if self.rx.is_empty() {
            if let Some(chunk) = self.feed.pop_front() {
                self.rx.extend_from_slice(&chunk);
            }
        }
    }
}

impl ByteChannel for MockChannel {
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.writes.push(buf.to_vec());
        if let Some(reply) = self.replies.pop_front() {
            self.rx.extend_from_slice(&reply);
        }
        Ok(())
    }

    fn read_some(&mut self, max: usize) -> Result<Vec<u8>> {
        self.promote_feed();
        let n = max.min(self.rx.len());
        Ok(self.rx.drain(..n).collect())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        self.promote_feed();
        Ok(self.rx.len())
    }

    fn clear_input(&mut self) -> Result<()> {
        self.rx.clear();
        self.feed.clear();
        self.input_clears += 1;
        Ok(())
    }
}
