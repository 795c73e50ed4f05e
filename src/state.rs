use std::collections::{BTreeMap, HashMap};

use crate::change::{percent_change, round2};
use crate::window::Window;

/// A value that may be missing because a fetch or a computation failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Available(f64),
    Unavailable,
}

/// Raw prices for one symbol, keyed by window. `RealTime` holds the spot price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub prices: BTreeMap<Window, Reading>,
}

impl PriceSnapshot {
    pub fn unavailable() -> Self {
        Self {
            prices: Window::ALL
                .into_iter()
                .map(|w| (w, Reading::Unavailable))
                .collect(),
        }
    }

    pub fn real_time(&self) -> Reading {
        self.get(Window::RealTime)
    }

    pub fn get(&self, window: Window) -> Reading {
        self.prices
            .get(&window)
            .copied()
            .unwrap_or(Reading::Unavailable)
    }
}

/// Percentage changes for one symbol over every historical window.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    pub changes: BTreeMap<Window, Reading>,
}

impl ChangeSet {
    pub fn from_snapshot(snapshot: &PriceSnapshot) -> Self {
        let current = snapshot.real_time();
        let changes = Window::historical()
            .map(|w| (w, percent_change(current, snapshot.get(w))))
            .collect();

        Self { changes }
    }

    pub fn get(&self, window: Window) -> Reading {
        self.changes
            .get(&window)
            .copied()
            .unwrap_or(Reading::Unavailable)
    }
}

/// Latest rounded spot prices and change sets, keyed by symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketState {
    prices: HashMap<String, Reading>,
    changes: HashMap<String, ChangeSet>,
}

impl MarketState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything held for `symbol` with values derived from `snapshot`.
    pub fn record(&mut self, symbol: &str, snapshot: &PriceSnapshot) {
        let price = match snapshot.real_time() {
            Reading::Available(p) if p.is_finite() => Reading::Available(round2(p)),
            _ => Reading::Unavailable,
        };

        self.prices.insert(symbol.to_string(), price);
        self.changes
            .insert(symbol.to_string(), ChangeSet::from_snapshot(snapshot));
    }

    pub fn price(&self, symbol: &str) -> Reading {
        self.prices
            .get(symbol)
            .copied()
            .unwrap_or(Reading::Unavailable)
    }

    pub fn change(&self, symbol: &str, window: Window) -> Reading {
        self.changes
            .get(symbol)
            .map_or(Reading::Unavailable, |set| set.get(window))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol) && self.changes.contains_key(symbol)
    }

    /// Price cell for `RealTime`, change cell otherwise.
    pub fn cell(&self, symbol: &str, window: Window) -> Reading {
        match window {
            Window::RealTime => self.price(symbol),
            _ => self.change(symbol, window),
        }
    }
}
