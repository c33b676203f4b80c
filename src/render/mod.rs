//! Presentation of analysis results
//!
//! Sinks receive the total and the three views one at a time; how they are
//! drawn (tables, JSON, charts) is entirely up to the sink.

mod json;
mod text;

pub use json::*;
pub use text::*;

use crate::analysis::GexReport;
use crate::core::{ExpirationView, GexResult, StrikeView, SurfaceGrid};

/// Consumer of GEX views
pub trait PresentationSink {
    /// Total notional GEX (Bn$)
    fn total(&mut self, ticker: &str, total_gex_bn: f64) -> GexResult<()>;

    /// GEX by strike, with the label spacing to use
    fn strike_view(&mut self, ticker: &str, view: &StrikeView, tick_step: usize) -> GexResult<()>;

    /// GEX by expiration
    fn expiration_view(&mut self, ticker: &str, view: &ExpirationView) -> GexResult<()>;

    /// Strike × expiration surface, with the target label count per axis
    fn surface(&mut self, ticker: &str, grid: &SurfaceGrid, tick_target: usize) -> GexResult<()>;

    /// Called once after the last view
    fn finish(&mut self) -> GexResult<()> {
        Ok(())
    }

    /// Send a whole report through the sink
    fn render(&mut self, report: &GexReport) -> GexResult<()> {
        let ticker = report.ticker.as_str();
        self.total(ticker, report.total_gex_bn)?;
        self.strike_view(ticker, &report.by_strike, report.strike_tick_step)?;
        self.expiration_view(ticker, &report.by_expiration)?;
        self.surface(ticker, &report.surface, report.surface_tick_target)?;
        self.finish()
    }
}
