//! Plain-text tables

use std::io::Write;

use crate::analysis::round4;
use crate::core::{ExpirationView, GexResult, StrikeView, SurfaceGrid};

use super::PresentationSink;

/// Widest bar in characters
const BAR_WIDTH: usize = 40;

/// Writes views as ASCII tables with horizontal bars
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bar(value: f64, max_abs: f64) -> String {
        if max_abs <= 0.0 {
            return String::new();
        }
        let len = ((value.abs() / max_abs) * BAR_WIDTH as f64).round() as usize;
        let ch = if value < 0.0 { '-' } else { '+' };
        std::iter::repeat(ch).take(len).collect()
    }

    fn no_data(&mut self, title: &str) -> GexResult<()> {
        writeln!(self.out, "{}\n  (no data in range)\n", title)?;
        Ok(())
    }
}

fn max_abs(values: impl Iterator<Item = f64>) -> f64 {
    values.map(f64::abs).fold(0.0, f64::max)
}

impl<W: Write> PresentationSink for TextSink<W> {
    fn total(&mut self, ticker: &str, total_gex_bn: f64) -> GexResult<()> {
        writeln!(self.out, "{} Total notional GEX: ${} Bn\n", ticker, round4(total_gex_bn))?;
        Ok(())
    }

    fn strike_view(&mut self, ticker: &str, view: &StrikeView, _tick_step: usize) -> GexResult<()> {
        let title = format!("{} GEX by Strike ({}$)", ticker, view.scale().label());
        if view.is_empty() {
            return self.no_data(&title);
        }

        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "  Strike |      GEX")?;
        writeln!(self.out, "---------+----------")?;

        let scale = max_abs(view.values());
        for (strike, value) in view.iter() {
            writeln!(
                self.out,
                "  {:>6} | {:>8.4}  {}",
                strike,
                value,
                Self::bar(value, scale)
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn expiration_view(&mut self, ticker: &str, view: &ExpirationView) -> GexResult<()> {
        let title = format!("{} GEX by Expiration ({}$)", ticker, view.scale().label());
        if view.is_empty() {
            return self.no_data(&title);
        }

        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "  Expiration   |      GEX")?;
        writeln!(self.out, "---------------+----------")?;

        let scale = max_abs(view.values());
        for (expiration, value) in view.iter() {
            writeln!(
                self.out,
                "  {}   | {:>8.4}  {}",
                expiration.format("%b %d, %Y"),
                value,
                Self::bar(value, scale)
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn surface(&mut self, ticker: &str, grid: &SurfaceGrid, tick_target: usize) -> GexResult<()> {
        let title = format!("{} Gamma Exposure Surface ({}$)", ticker, grid.scale.label());
        if grid.is_empty() {
            return self.no_data(&title);
        }

        let step = crate::core::tick_step(grid.expirations.len(), tick_target);
        let columns: Vec<usize> = (0..grid.expirations.len()).step_by(step).collect();

        writeln!(self.out, "{}", title)?;
        if let Some((lo, hi)) = grid.range() {
            writeln!(self.out, "  range {:.2} .. {:.2}", lo, hi)?;
        }

        write!(self.out, "  Strike\\Exp |")?;
        for &col in &columns {
            write!(self.out, " {:>10}", grid.expirations[col].format("%Y-%m-%d"))?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "-------------+{}", "-".repeat(columns.len() * 11))?;

        for (row, strike) in grid.strikes.iter().enumerate() {
            write!(self.out, "  {:>10} |", strike)?;
            for &col in &columns {
                write!(self.out, " {:>10.2}", grid.values[[row, col]])?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> GexResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{build_surface, group_by_expiration_and_strike, group_by_strike};
    use crate::core::{ContractGex, DecodedContract, OptionType, Scale};
    use chrono::NaiveDate;

    fn book() -> Vec<ContractGex> {
        let expiration = NaiveDate::from_ymd_opt(2025, 2, 7).unwrap();
        [(OptionType::Call, 105, 5_000_000.0), (OptionType::Put, 95, -3_200_000.0)]
            .into_iter()
            .map(|(option_type, strike, gex)| ContractGex {
                contract: DecodedContract {
                    symbol: String::new(),
                    option_type,
                    strike,
                    expiration,
                    gamma: 0.0,
                    open_interest: 0,
                },
                gex,
            })
            .collect()
    }

    fn render(f: impl FnOnce(&mut TextSink<Vec<u8>>) -> GexResult<()>) -> String {
        let mut sink = TextSink::new(Vec::new());
        f(&mut sink).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_total_line() {
        let out = render(|s| s.total("SPY", 0.00184));
        assert_eq!(out, "SPY Total notional GEX: $0.0018 Bn\n\n");
    }

    #[test]
    fn test_strike_table() {
        let view = group_by_strike(&book(), Scale::Billions);
        let out = render(|s| s.strike_view("SPY", &view, 1));

        assert!(out.starts_with("SPY GEX by Strike (Bn$)"));
        assert!(out.contains("    95 |  -0.0032"));
        assert!(out.contains(&format!("   105 |   0.0050  {}", "+".repeat(BAR_WIDTH))));
    }

    #[test]
    fn test_surface_table() {
        let grid = build_surface(&group_by_expiration_and_strike(&book(), Scale::Millions));
        let out = render(|s| s.surface("SPY", &grid, 10));

        assert!(out.contains("2025-02-07"));
        assert!(out.contains("         105 |       5.00"));
        assert!(out.contains("range -3.20 .. 5.00"));
    }

    #[test]
    fn test_empty_views_say_no_data() {
        let out = render(|s| {
            s.strike_view("SPY", &StrikeView::empty(Scale::Billions), 1)?;
            s.surface("SPY", &SurfaceGrid::empty(Scale::Millions), 10)
        });

        assert_eq!(out.matches("(no data in range)").count(), 2);
    }
}
