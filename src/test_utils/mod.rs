//! Test utilities:
//! - factories for valid entity fixtures with closure overrides
//! - an in-memory identity-service mock with failure injection and call
//!   counters for asserting re-fetch and short-circuit behavior

mod factories;
mod identity_mocks;

pub use factories::*;
pub use identity_mocks::*;
