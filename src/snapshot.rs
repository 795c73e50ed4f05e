use color_eyre::eyre::Result;

use dotenv::dotenv;

use crypto_price_monitor::logger::init_tracing;
use crypto_price_monitor::render::console;
use crypto_price_monitor::{LookbackDates, Monitor, MonitorConfig, PriceClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = MonitorConfig::from_env()?;
    init_tracing(config.json_logs);

    let client = PriceClient::new(
        config.api_url.clone(),
        config.quote_currency.clone(),
        config.request_timeout,
    )?;
    let dates = LookbackDates::now_in(config.timezone);
    let monitor = Monitor::new(client, config);

    let state = monitor.fetch(&dates).await;
    print!("{}", console::render_table(&monitor.config().symbols, &state));

    Ok(())
}
