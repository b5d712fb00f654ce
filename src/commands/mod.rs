//! Command implementations for innorebuild CLI

pub mod completions;
pub mod helpers;
pub mod inspect;
pub mod rebuild;
pub mod unpack;
pub mod version;
