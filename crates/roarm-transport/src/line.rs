use crate::{ByteChannel, FrameReader, Result, Transport};
use std::time::Duration;

/// [`Transport`] over any byte channel, framing input with a [`FrameReader`].
///
/// A send flushes the input queue first so a stale frame never answers a new
/// request, then writes the whole buffer and pushes it onto the wire.
pub struct LineTransport<C> {
    channel: C,
    reader: FrameReader,
}

impl<C: ByteChannel> LineTransport<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            reader: FrameReader::new(),
        }
    }

    pub fn with_read_timeout(channel: C, timeout: Duration) -> Self {
        Self {
            channel,
            reader: FrameReader::with_timeout(timeout),
        }
    }

    /// The underlying channel, mostly for inspection in tests.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}

impl<C: ByteChannel> Transport for LineTransport<C> {
    fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.channel.clear_input()?;
        self.channel.write_all(frame)?;
        self.channel.flush()?;
        tracing::debug!(len = frame.len(), "frame written");
        Ok(())
    }

    fn recv(&mut self) -> Result<Option<Vec<u8>>> {
        let frame = self.reader.read_frame(&mut self.channel)?;
        if let Some(f) = &frame {
            tracing::debug!(len = f.len(), "frame received");
        }
        Ok(frame)
    }

    fn reset(&mut self) -> Result<()> {
        self.reader.clear(&mut self.channel)
    }
}
