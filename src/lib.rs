pub mod change;
pub mod client;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod logger;
pub mod monitor;
pub mod render;
pub mod state;
pub mod window;

pub use client::{PriceClient, SpotPriceSource};
pub use config::MonitorConfig;
pub use monitor::Monitor;
pub use state::{ChangeSet, MarketState, PriceSnapshot, Reading};
pub use window::{LookbackDates, Window};
