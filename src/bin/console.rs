use admin_console::cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so CONSOLE_API_BASE_URL and friends are picked up
    let _ = dotenvy::dotenv();

    let default_filter = if admin_console::is_development!() {
        "admin_console=debug,warn"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = admin_console::cli::OutputFormat::from_cli(&cli);

    if let Err(e) = admin_console::cli::run(cli).await {
        let code = e
            .downcast_ref::<admin_console::error::ConsoleError>()
            .map(|err| err.error_code());
        let message = match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => format!("{e:?}"),
            _ => format!("{e}"),
        };
        admin_console::cli::utils::output_error(&output_format, &message, code)?;
        std::process::exit(1);
    }

    Ok(())
}
