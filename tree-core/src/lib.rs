//! # tree-core
//!
//! Core traits and error types shared by the ordered-set engines and the
//! benchmark driver.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod traits;

#[cfg(feature = "std")]
pub use error::{BenchError, Result};
pub use traits::*;
