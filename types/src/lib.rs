//! Fundamental types for the Quorum governance engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identities, native and token amounts, logical timestamps, and the
//! organization parameters fixed at initialization.

pub mod amount;
pub mod error;
pub mod identity;
pub mod params;
pub mod time;

pub use amount::{NativeAmount, TokenAmount};
pub use error::ParamsError;
pub use identity::Identity;
pub use params::OrganizationParams;
pub use time::{Clock, Timestamp};
