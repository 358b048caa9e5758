use clap::Parser;
use dotenvy::dotenv;
use keto_journey::{
    cli::{self, Cli, CliContext, Command, Terminal},
    config::{self, content, database},
    core::App,
    errors::Result,
};
use std::{io, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // 1. Initialize tracing; warn by default so command output stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Open the database
    let db = database::create_connection(&database::get_database_url())
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Load the plan content and every stored slice
    let catalog = content::load_content(app_config.content_path.as_deref())?;
    let app = App::load(db, catalog, app_config.prefers_dark).await?;

    // 6. Run the requested command
    let mut ctx = CliContext::new(app, Duration::from_millis(app_config.analysis_tick_ms));
    let mut term = Terminal::new(io::stdin().lock(), io::stdout().lock(), args.yes);
    let command = args.command.unwrap_or(Command::Dashboard);

    cli::run(&mut ctx, command, &mut term).await
}
