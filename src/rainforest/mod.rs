// Rainforest API module.
// Provides the product lookup client and the response schema it decodes into.

pub mod client;
pub mod types;

pub use client::{IdKind, ProductFetcher, RainforestClient};
pub use types::*;
