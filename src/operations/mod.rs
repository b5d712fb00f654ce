//! Operations module for rebuilding extracted installers
//!
//! This module provides high-level operations that coordinate:
//! - RebuildOperation: parse → classify → bucket → rebuild over an extraction
//! - InspectOperation: parse and classify a script without touching files
//! - UnpackOperation: stage an installer and run innounp on it
//!
//! Commands in [`crate::commands`] wrap these with argument handling and
//! console output.

pub mod inspect;
pub mod rebuild;
pub mod unpack;

pub use inspect::{InspectOperation, InspectReport};
pub use rebuild::{RebuildOperation, RebuildOptions};
pub use unpack::UnpackOperation;
