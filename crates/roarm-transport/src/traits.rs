use crate::Result;

/// A minimal blocking duplex byte channel (serial-like).
///
/// Reads are allowed to return fewer bytes than requested, or none at all
/// once the channel's own read timeout elapses; callers that need whole
/// frames layer a [`crate::FrameReader`] on top.
pub trait ByteChannel: Send {
    /// Write the whole buffer to the channel.
    fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    /// Read up to `max` bytes; an empty vec means nothing arrived in time.
    fn read_some(&mut self, max: usize) -> Result<Vec<u8>>;

    /// Number of bytes already queued on the input side.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Drop everything queued on the input side.
    fn clear_input(&mut self) -> Result<()>;

    /// Push any buffered output onto the wire.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One logical hop to the arm: transmit an encoded frame, optionally pull
/// one frame back.
///
/// Implementations own whatever buffering the link needs; `reset` must leave
/// the link with no stale input so a malformed frame never contaminates the
/// next round trip.
pub trait Transport: Send {
    /// Transmit one encoded frame.
    fn send(&mut self, frame: &[u8]) -> Result<()>;

    /// Receive one complete frame, `None` when nothing arrived in time.
    fn recv(&mut self) -> Result<Option<Vec<u8>>>;

    /// Discard buffered input on both sides of the link.
    fn reset(&mut self) -> Result<()>;
}
