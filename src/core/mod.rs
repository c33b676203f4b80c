//! Core data types for GEX analysis
//!
//! Defines fundamental types:
//! - RawContract / FeedSnapshot: vendor rows as delivered
//! - DecodedContract / ContractGex: typed contracts and their exposure
//! - AggregateView: grouped exposure by strike, expiration, or both
//! - SurfaceGrid: dense strike × expiration grid

pub mod error;
pub mod option;
pub mod quote;
pub mod surface;
pub mod symbol;
pub mod view;

pub use error::*;
pub use option::*;
pub use quote::*;
pub use surface::*;
pub use symbol::*;
pub use view::*;
