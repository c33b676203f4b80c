//! Dealer gamma exposure analysis
//!
//! Four-stage pipeline over one option chain snapshot:
//! 1. **Normalization**: decode vendor symbols into typed contracts (all or nothing)
//! 2. **Exposure**: signed dollar gamma per contract, calls positive, puts negative
//! 3. **Aggregation**: sum by strike, by expiration, and by both, within display limits
//! 4. **Surface**: pivot the joint view into a zero-filled strike × expiration grid

mod aggregate;
mod config;
mod exposure;
mod grid;
mod normalize;
mod pipeline;

pub use aggregate::*;
pub use config::*;
pub use exposure::*;
pub use grid::*;
pub use normalize::*;
pub use pipeline::*;
