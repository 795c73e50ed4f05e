use tracing::warn;

use crate::client::SpotPriceSource;
use crate::state::{MarketState, PriceSnapshot, Reading};
use crate::window::{LookbackDates, Window};

/// Fetches the live price and every historical price for `symbol`, one
/// request at a time. Failed requests become `Reading::Unavailable`.
pub async fn fetch_snapshot<S>(source: &S, symbol: &str, dates: &LookbackDates) -> PriceSnapshot
where
    S: SpotPriceSource + ?Sized,
{
    let mut snapshot = PriceSnapshot::unavailable();

    let real_time = fetch_reading(source, symbol, Window::RealTime, None).await;
    snapshot.prices.insert(Window::RealTime, real_time);

    for (window, date) in dates.iter() {
        let price = fetch_reading(source, symbol, window, Some(date)).await;
        snapshot.prices.insert(window, price);
    }

    snapshot
}

/// Fetches every symbol in order and returns a fresh state.
pub async fn fetch_all<S>(source: &S, symbols: &[String], dates: &LookbackDates) -> MarketState
where
    S: SpotPriceSource + ?Sized,
{
    let mut state = MarketState::new();
    for symbol in symbols {
        let snapshot = fetch_snapshot(source, symbol, dates).await;
        state.record(symbol, &snapshot);
    }
    state
}

async fn fetch_reading<S>(
    source: &S,
    symbol: &str,
    window: Window,
    date: Option<chrono::NaiveDate>,
) -> Reading
where
    S: SpotPriceSource + ?Sized,
{
    match source.spot_price(symbol, date).await {
        Ok(price) => Reading::Available(price),
        Err(e) => {
            warn!(symbol, window = window.key(), error = %e, "price unavailable");
            Reading::Unavailable
        }
    }
}
