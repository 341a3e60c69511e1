use std::path::PathBuf;

use charge_field::app;
use charge_field::init_config::DemoConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn log_level() -> Level {
    match std::env::var("CHARGE_FIELD_LOG")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level())
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => DemoConfig::load_from_file(path)?,
        None => DemoConfig::load_default()?,
    };

    app::run(&config)?;
    Ok(())
}
