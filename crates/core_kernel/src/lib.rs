//! Core Kernel - Foundational types for the motor insurance quote system
//!
//! This crate provides the building blocks shared by the domain and the
//! command-line front end:
//! - Money types with precise decimal arithmetic
//! - Percentage rates
//! - The kernel error type

pub mod money;
pub mod error;

pub use money::{Money, MoneyError, Rate};
pub use error::CoreError;
