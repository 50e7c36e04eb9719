use clap::Parser;
use relcheck::{
    app::App,
    cli::Cli,
    config::Settings,
    logging::{default_log_path, init_logging},
    Result,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    let settings = match cli.export_dir.clone() {
        Some(dir) => settings.with_export_dir(dir),
        None => settings,
    };

    let log_path = match cli.log_file.clone() {
        Some(path) => path,
        None => default_log_path()?,
    };
    init_logging(cli.verbosity(), &log_path)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting relcheck");

    let mut app = App::new(&settings)?;
    app.init()?;
    let outcome = app.run().await;
    app.restore()?;

    if let Err(e) = &outcome {
        error!(error = %e, "application error");
        eprintln!("Application error: {}", e);
    }
    outcome
}
