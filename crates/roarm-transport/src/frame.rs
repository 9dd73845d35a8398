use crate::{ByteChannel, Result};
use std::time::{Duration, Instant};

/// Byte that opens a wire frame.
pub const FRAME_START: u8 = b'{';
/// Byte sequence that closes a wire frame.
pub const FRAME_END: &[u8] = b"}\r\n";
/// Upper bound on a single frame, and on a single read.
pub const MAX_FRAME_LEN: usize = 512;

/// Recovers discrete `{...}\r\n` frames from a byte stream that arrives in
/// arbitrary-sized chunks.
///
/// The reader keeps a private accumulation buffer across calls. A frame is
/// located by finding the right-most end marker, then the right-most start
/// marker before it; anything before the start marker is unparseable
/// leftover and gets discarded with the frame. The buffer survives a timeout
/// intact, so a partially-delivered frame completes on the next call.
pub struct FrameReader {
    buf: Vec<u8>,
    timeout: Duration,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(100))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            buf: Vec::new(),
            timeout,
        }
    }

    /// Poll `channel` until one complete frame is buffered or the timeout
    /// elapses. Returns the frame including its `}\r\n` terminator.
    pub fn read_frame(&mut self, channel: &mut dyn ByteChannel) -> Result<Option<Vec<u8>>> {
        let started = Instant::now();
        loop {
            let avail = channel.bytes_available()?;
            let want = avail.clamp(1, MAX_FRAME_LEN);
            let chunk = channel.read_some(want)?;
            if !chunk.is_empty() {
                self.buf.extend_from_slice(&chunk);
            }

            if let Some(end) = rfind(&self.buf, FRAME_END) {
                if let Some(start) = self.buf[..end].iter().rposition(|&b| b == FRAME_START) {
                    if start > 0 {
                        tracing::warn!(discarded = start, "dropping bytes before frame start");
                    }
                    let frame = self.buf[start..end + FRAME_END.len()].to_vec();
                    self.buf.drain(..end + FRAME_END.len());
                    return Ok(Some(frame));
                }
                // End marker with no start before it: keep accumulating.
            }

            if started.elapsed() > self.timeout {
                return Ok(None);
            }
        }
    }

    /// Empty the accumulation buffer and flush the channel's input queue.
    ///
    /// Invoked after every decode attempt, successful or not, so a malformed
    /// frame never contaminates the next read.
    pub fn clear(&mut self, channel: &mut dyn ByteChannel) -> Result<()> {
        self.buf.clear();
        channel.clear_input()
    }

    /// Bytes currently held in the accumulation buffer.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}

impl Default for FrameReader {
    fn default() -> Self {
        Self::new()
    }
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
