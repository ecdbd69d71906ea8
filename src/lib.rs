// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod common;
pub mod driver;

// Re-export key types for convenience
pub use common::{Concentration, Mode, RawFrame, Ze15Error};
pub use driver::{Config, Ze15};
