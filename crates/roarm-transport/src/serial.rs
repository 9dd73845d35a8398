use crate::{ByteChannel, Result, TransportError};
use serialport::SerialPort;
use std::io::{Read, Write};
use std::time::Duration;

/// Serial byte channel (the arm's USB UART, 115200 8N1 by default).
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
}

impl SerialChannel {
    /// Open `path` at `baud` with the given per-read timeout.
    ///
    /// RTS is deasserted: the arm's controller resets when RTS toggles on
    /// open.
    pub fn open(path: &str, baud: u32, timeout: Duration) -> Result<Self> {
        let mut port = serialport::new(path, baud)
            .timeout(timeout)
            .open()
            .map_err(|e| match e.kind {
                serialport::ErrorKind::NoDevice => TransportError::PortNotFound(path.to_string()),
                _ => TransportError::Io(e.to_string()),
            })?;
        port.write_request_to_send(false)
            .map_err(|e| TransportError::Io(e.to_string()))?;
        Ok(Self { port })
    }
}

impl ByteChannel for SerialChannel {
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.port
            .write_all(buf)
            .map_err(|e| TransportError::Io(e.to_string()))
    }

    fn read_some(&mut self, max: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; max];
        match self.port.read(&mut buf) {
            Ok(n) => {
                buf.truncate(n);
                Ok(buf)
            }
            // A quiet bus is not a failure; framing owns the overall wait.
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(Vec::new()),
            Err(e) => Err(TransportError::Io(e.to_string())),
        }
    }

    fn bytes_available(&mut self) -> Result<usize> {
        self.port
            .bytes_to_read()
            .map(|n| n as usize)
            .map_err(|e| TransportError::Io(e.to_string()))
    }

    fn clear_input(&mut self) -> Result<()> {
        self.port
            .clear(serialport::ClearBuffer::Input)
            .map_err(|e| TransportError::Io(e.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        self.port
            .flush()
            .map_err(|e| TransportError::Io(e.to_string()))
    }
}
