//! roarm-client: the caller-facing driver for RoArm arms
//!
//! Wraps one physical link (serial or the HTTP bridge) in a
//! [`TransportSession`] that validates, encodes, sends, and decodes under an
//! exclusive lock with a bounded retry budget, and exposes one typed
//! operation per wire command on [`RoarmClient`]. Callers never see raw wire
//! bytes: an operation returns a decoded [`roarm_protocol::Feedback`], the
//! validated command echo, or the no-response failure.

mod error;
pub use error::ClientError;

mod session;
pub use session::{Response, TransportSession, DEFAULT_RETRY_BUDGET};

mod client;
pub use client::RoarmClient;

mod config;
pub use config::{ConfigError, RoarmConfig, TransportConfig};

mod trajectory;
pub use trajectory::{
    record_trajectory, replay_trajectory, BlobStore, MemoryBlobStore, TrajectorySample,
};

#[cfg(test)]
pub(crate) mod testutil;
