use color_eyre::Result;
use home_dashboard::dashboard::{start_snapshot_log_loop, Dashboard};
use home_dashboard::settings::read_settings;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    pretty_env_logger::formatted_builder()
        .parse_filters(
            &std::env::var("RUST_LOG").unwrap_or_else(|_| "home_dashboard=info".to_string()),
        )
        .init();

    let settings = read_settings()?;
    let dashboard = Dashboard::start(&settings)?;

    start_snapshot_log_loop(dashboard.store());

    tokio::signal::ctrl_c().await?;

    info!("Shutting down");
    dashboard.shutdown().await;

    Ok(())
}
