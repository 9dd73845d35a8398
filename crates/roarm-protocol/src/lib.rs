//! roarm-protocol: semantic command model and wire codec for RoArm arms
//!
//! The arms speak newline-terminated JSON objects tagged with an integer `T`
//! protocol id. Two incompatible variants exist: the 4-joint M2 and the
//! 6-joint M3, with different field names, joint counts, and physical
//! limits. This crate keeps all of that behind one closed [`ArmModel`]
//! variant: validation against the per-model [`LimitTable`], encoding of
//! typed [`Command`] values to wire bytes, and decoding of feedback frames
//! back to a semantic [`Feedback`] snapshot.

mod model;
pub use model::{ArmModel, UnknownModel};

mod limits;
pub use limits::{LimitClass, LimitTable};

pub mod ids;

mod command;
pub use command::Command;

mod error;
pub use error::ProtocolError;

mod validate;
pub use validate::{validate, ValidationError, ACC_RANGE, SPEED_RANGE};

mod encode;
pub use encode::encode;

mod decode;
pub use decode::{decode, Feedback};
