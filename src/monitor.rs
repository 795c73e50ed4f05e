use std::future::Future;
use std::io::{self, Write};
use std::time::Instant;

use color_eyre::eyre::{Result, WrapErr};
use tracing::{debug, info, info_span, Instrument};

use crate::client::SpotPriceSource;
use crate::config::MonitorConfig;
use crate::fetcher::fetch_all;
use crate::render::{console, html};
use crate::state::MarketState;
use crate::window::LookbackDates;

/// Fetch, render and sleep, until Ctrl-C.
pub struct Monitor<S> {
    source: S,
    config: MonitorConfig,
}

impl<S: SpotPriceSource> Monitor<S> {
    pub fn new(source: S, config: MonitorConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// One fetch pass over every configured symbol.
    pub async fn fetch(&self, dates: &LookbackDates) -> MarketState {
        let started = Instant::now();
        let state = fetch_all(&self.source, &self.config.symbols, dates)
            .instrument(info_span!("fetch", today = %dates.today()))
            .await;

        debug!(
            symbols = self.config.symbols.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetch pass finished"
        );
        state
    }

    /// Redraws the console table on `out` and rewrites the HTML file.
    pub fn render<W: Write>(&self, state: &MarketState, out: &mut W) -> Result<()> {
        let table = console::render_table(&self.config.symbols, state);
        write!(out, "{}{}", console::CLEAR_SCREEN, table).wrap_err("failed to print table")?;
        out.flush().wrap_err("failed to print table")?;

        let doc = html::render_document(&self.config.symbols, state);
        html::write_document(&self.config.output_html_file, &doc)
    }

    pub async fn run(&self) -> Result<()> {
        let tz = self.config.timezone;
        self.run_until(
            tokio::signal::ctrl_c(),
            || LookbackDates::now_in(tz),
            &mut io::stdout(),
        )
        .await
    }

    /// Runs cycles until `shutdown` resolves. `next_dates` is called at the
    /// start of every cycle.
    pub async fn run_until<F, D, W>(
        &self,
        shutdown: F,
        mut next_dates: D,
        out: &mut W,
    ) -> Result<()>
    where
        F: Future<Output = io::Result<()>>,
        D: FnMut() -> LookbackDates,
        W: Write,
    {
        info!(
            symbols = ?self.config.symbols,
            output = %self.config.output_html_file.display(),
            every_s = self.config.refresh_interval.as_secs(),
            "price monitor started"
        );

        write!(out, "{}", console::CLEAR_SCREEN).wrap_err("failed to clear screen")?;

        tokio::pin!(shutdown);

        loop {
            // Recomputed every cycle so long runs keep comparing against the right days.
            let dates = next_dates();

            let state = tokio::select! {
                state = self.fetch(&dates) => state,
                res = &mut shutdown => return stopped(res),
            };
            self.render(&state, out)?;

            tokio::select! {
                _ = tokio::time::sleep(self.config.refresh_interval) => {}
                res = &mut shutdown => return stopped(res),
            }
        }
    }
}

fn stopped(signal: io::Result<()>) -> Result<()> {
    signal.wrap_err("failed to listen for ctrl-c")?;
    info!("shutdown signal received");
    Ok(())
}
