#![deny(missing_docs)]
#![doc = "Core types shared by the LCSk++ ratio experiment crates."]

pub mod errors;

pub use errors::{ErrorInfo, LcskError};
