//! Password verification.

mod digest;

pub use digest::*;
