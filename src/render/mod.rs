//! Console and HTML views over a [`MarketState`].
//!
//! Both views share the per-cell decision in [`cell`]: the `Real-Time` row
//! shows the rounded spot price, every other row shows the change with a `%`
//! suffix and a tone taken from its sign. Missing values are the literal `NA`
//! with no tone.

pub mod console;
pub mod html;

use crate::state::{MarketState, Reading};
use crate::window::Window;

pub const NA: &str = "NA";

/// Sign of a percentage change, used to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            Tone::Positive
        } else if change < 0.0 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Option<Tone>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
        }
    }
}

pub fn cell(state: &MarketState, symbol: &str, window: Window) -> Cell {
    match (window, state.cell(symbol, window)) {
        (_, Reading::Unavailable) => Cell::plain(NA),
        (Window::RealTime, Reading::Available(price)) => Cell::plain(format_number(price)),
        (_, Reading::Available(change)) => Cell {
            text: format!("{}%", format_number(change)),
            tone: Some(Tone::of(change)),
        },
    }
}

/// Shortest round-trip form with at least one fractional digit. Magnitudes
/// from 1e16 up switch to exponent form, e.g. `1e+16`.
pub fn format_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    if value.is_finite() && value.abs() >= 1e16 {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp:0>2}"),
            _ => text,
        };
    }
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PriceSnapshot;

    #[test]
    fn numbers_keep_one_fractional_digit() {
        assert_eq!(format_number(50000.0), "50000.0");
        assert_eq!(format_number(2.04), "2.04");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(-0.0), "0.0");
    }

    #[test]
    fn huge_numbers_use_exponent_form() {
        assert_eq!(format_number(9999999999999998.0), "9999999999999998.0");
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(-2.5e17), "-2.5e+17");
        assert_eq!(format_number(1.2345e21), "1.2345e+21");
    }

    #[test]
    fn tone_follows_sign() {
        assert_eq!(Tone::of(2.04), Tone::Positive);
        assert_eq!(Tone::of(-0.01), Tone::Negative);
        assert_eq!(Tone::of(0.0), Tone::Neutral);
    }

    #[test]
    fn cells_for_price_change_and_missing_values() {
        let mut snapshot = PriceSnapshot::unavailable();
        snapshot.prices.insert(Window::RealTime, Reading::Available(50000.0));
        snapshot.prices.insert(Window::OneDay, Reading::Available(49000.0));
        snapshot.prices.insert(Window::ThreeDays, Reading::Available(50000.0));
        let mut state = MarketState::new();
        state.record("BTC", &snapshot);

        assert_eq!(cell(&state, "BTC", Window::RealTime), Cell::plain("50000.0"));
        assert_eq!(
            cell(&state, "BTC", Window::OneDay),
            Cell {
                text: "2.04%".into(),
                tone: Some(Tone::Positive)
            }
        );
        assert_eq!(
            cell(&state, "BTC", Window::ThreeDays),
            Cell {
                text: "0.0%".into(),
                tone: Some(Tone::Neutral)
            }
        );
        assert_eq!(cell(&state, "BTC", Window::OneYear), Cell::plain(NA));
        assert_eq!(cell(&state, "ETH", Window::RealTime), Cell::plain(NA));
    }
}
