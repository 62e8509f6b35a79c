//! Utility modules for the pricing pipeline
//!
//! - **error**: error taxonomy and the crate `Result` alias
//! - **logging**: tracing-subscriber initialization helpers

pub mod error;
pub mod logging;

pub use error::{PricingError, Result};
