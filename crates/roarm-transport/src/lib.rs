//! roarm-transport: link-level plumbing for RoArm arms
//!
//! This crate turns a noisy, partially-buffered byte link into a stream of
//! complete JSON frames. It provides traits for byte channels and
//! request/response transports, with feature-gated backends. The default
//! build enables a `mock` backend so that tests and binaries can compile on
//! any host without hardware attached.

mod error;
pub use error::{Result, TransportError};

mod traits;
pub use traits::{ByteChannel, Transport};

mod frame;
pub use frame::{FrameReader, FRAME_END, FRAME_START, MAX_FRAME_LEN};

mod line;
pub use line::LineTransport;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::MockChannel;

#[cfg(feature = "serial")]
mod serial;

#[cfg(feature = "serial")]
pub use serial::SerialChannel;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpTransport;
