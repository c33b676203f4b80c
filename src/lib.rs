//! # GEX Surface - Dealer Gamma Exposure Analysis
//!
//! Computes the notional gamma exposure (GEX) options dealers carry on one
//! underlying and lays it out three ways: by strike, by expiration, and as a
//! strike × expiration surface.
//!
//! ## Overview
//!
//! Each contract contributes `S · Γ · OI · 100 · S · 0.01` dollars, the delta
//! change dealers see for a 1% move in spot. Calls count positive and puts
//! negative, the usual assumption that dealers are long calls and short puts.
//!
//! ## Key Components
//!
//! - **Data Fetching**: CBOE delayed quotes, saved chain files, local cache
//! - **Symbol Decoding**: OCC-style identifiers into type, strike and expiry
//! - **Exposure**: signed dollar gamma per contract
//! - **Aggregation**: views within a strike band and an expiration horizon
//! - **Surface**: dense zero-filled grid for heatmaps
//! - **Rendering**: text tables or a JSON document
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gex_surface::prelude::*;
//!
//! // Fetch SPY from CBOE, cached for a day under ./data/cache
//! let feed = CachedFeed::new(CboeClient::new(CboeConfig::default())?, CacheConfig::default())?;
//! let snapshot = feed.fetch("SPY")?;
//!
//! // Analyze with the default ±15% band and 365-day horizon
//! let report = GexAnalyzer::new().analyze_today(&snapshot)?;
//! println!("Total notional GEX: ${:.4} Bn", report.total_gex_bn);
//!
//! // Print tables
//! TextSink::new(std::io::stdout()).render(&report)?;
//! # Ok::<(), gex_surface::GexError>(())
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Compute gamma itself (the vendor's gamma is taken as is)
//! - Know actual dealer positioning
//! - Draw charts (sinks receive the data, drawing is theirs)

pub mod analysis;
pub mod core;
pub mod data;
pub mod logging;
pub mod render;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        decode_symbol, format_symbol, ContractGex, DecodeError, DecodedContract, DecodedSymbol,
        ExpirationView, FeedSnapshot, GexError, GexResult, JointView, NormalizationError,
        OptionType, RawContract, Scale, StrikeView, SurfaceGrid, SymbolDecoder,
    };

    // Analysis
    pub use crate::analysis::{
        analyze_snapshot, build_surface, compute_gex, expiration_view, joint_view,
        normalize_contracts, strike_view, AnalysisConfig, GexAnalyzer, GexReport, Horizon,
        StrikeBand, CONTRACT_MULTIPLIER,
    };

    // Data fetching
    pub use crate::data::{
        fetch_spy_chain, CacheConfig, CachedFeed, CboeClient, CboeConfig, DataCache,
        FeedProvider, JsonFileFeed,
    };

    // Rendering
    pub use crate::render::{JsonSink, PresentationSink, TextSink};

    pub use crate::logging::{init_logging, LogFormat};
}

// Re-export main types at crate root
pub use crate::analysis::{AnalysisConfig, GexAnalyzer, GexReport};
pub use crate::core::{GexError, GexResult};
