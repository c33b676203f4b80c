//! JSON output

use std::io::Write;

use serde_json::{json, Map, Value};

use crate::core::{ExpirationView, GexResult, StrikeView, SurfaceGrid};

use super::PresentationSink;

/// Collects the views into one JSON document, written on `finish`
pub struct JsonSink<W: Write> {
    out: W,
    doc: Map<String, Value>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            doc: Map::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn set_ticker(&mut self, ticker: &str) {
        self.doc
            .entry("ticker")
            .or_insert_with(|| Value::String(ticker.to_string()));
    }
}

impl<W: Write> PresentationSink for JsonSink<W> {
    fn total(&mut self, ticker: &str, total_gex_bn: f64) -> GexResult<()> {
        self.set_ticker(ticker);
        self.doc.insert("total_gex_bn".into(), json!(total_gex_bn));
        Ok(())
    }

    fn strike_view(&mut self, ticker: &str, view: &StrikeView, tick_step: usize) -> GexResult<()> {
        self.set_ticker(ticker);
        let ticks: Vec<u32> = view.keys().step_by(tick_step.max(1)).collect();
        self.doc.insert(
            "by_strike".into(),
            json!({
                "unit": format!("{}$", view.scale().label()),
                "entries": view.entries(),
                "ticks": ticks,
            }),
        );
        Ok(())
    }

    fn expiration_view(&mut self, ticker: &str, view: &ExpirationView) -> GexResult<()> {
        self.set_ticker(ticker);
        self.doc.insert(
            "by_expiration".into(),
            json!({
                "unit": format!("{}$", view.scale().label()),
                "entries": view.entries(),
            }),
        );
        Ok(())
    }

    fn surface(&mut self, ticker: &str, grid: &SurfaceGrid, tick_target: usize) -> GexResult<()> {
        self.set_ticker(ticker);
        let rows: Vec<Vec<f64>> = grid.values.rows().into_iter().map(|r| r.to_vec()).collect();
        let range = grid.range().map(|(lo, hi)| json!({ "min": lo, "max": hi }));

        self.doc.insert(
            "surface".into(),
            json!({
                "unit": format!("{}$", grid.scale.label()),
                "strikes": grid.strikes,
                "expirations": grid.expiration_labels(),
                "values": rows,
                "range": range,
                "strike_ticks": grid.strike_ticks(tick_target),
                "expiration_ticks": grid.expiration_ticks(tick_target),
            }),
        );
        Ok(())
    }

    fn finish(&mut self) -> GexResult<()> {
        let doc = Value::Object(std::mem::take(&mut self.doc));
        serde_json::to_writer_pretty(&mut self.out, &doc)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::GexAnalyzer;
    use crate::core::{format_symbol, FeedSnapshot, OptionType, RawContract};
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_render_report() {
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let expiry = as_of + Duration::days(30);
        let snapshot = FeedSnapshot::new(
            "TEST",
            100.0,
            vec![
                RawContract::new(format_symbol("TEST", OptionType::Call, 105.0, expiry), 0.05, 1000.0),
                RawContract::new(format_symbol("TEST", OptionType::Put, 95.0, expiry), 0.04, 800.0),
            ],
        );
        let report = GexAnalyzer::new().analyze(&snapshot, as_of).unwrap();

        let mut sink = JsonSink::new(Vec::new());
        sink.render(&report).unwrap();
        let doc: Value = serde_json::from_slice(&sink.into_inner()).unwrap();

        assert_eq!(doc["ticker"], "TEST");
        assert_eq!(doc["by_strike"]["unit"], "Bn$");
        assert_eq!(doc["by_strike"]["entries"][1][0], 105);
        assert_eq!(doc["by_expiration"]["entries"][0][0], "2025-02-05");
        assert_eq!(doc["surface"]["strikes"], json!([95, 105]));
        assert_eq!(doc["surface"]["values"][1][0], 0.5);
        assert_eq!(doc["surface"]["expiration_ticks"], json!(["2025-02-05"]));
    }

    #[test]
    fn test_empty_surface_has_null_range() {
        let mut sink = JsonSink::new(Vec::new());
        sink.surface("SPY", &SurfaceGrid::empty(crate::core::Scale::Millions), 10)
            .unwrap();
        sink.finish().unwrap();
        let doc: Value = serde_json::from_slice(&sink.into_inner()).unwrap();

        assert!(doc["surface"]["range"].is_null());
        assert_eq!(doc["surface"]["values"], json!([]));
    }
}
