use clap::Parser;
use poem::{Server, listener::TcpListener};
use std::sync::Arc;

use bank_backend::AppData;
use bank_backend::api::build_app;
use bank_backend::cli::{self, Cli, Commands};
use bank_backend::config::{AppConfig, connect_database, init_logging, migrate_database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();

    // Missing or short secrets stop startup here
    let config = AppConfig::from_env()?;

    let db = connect_database(&config.bootstrap).await?;
    migrate_database(&db).await?;

    let command = cli.command.unwrap_or(Commands::Serve);
    if command == Commands::Migrate {
        tracing::info!("Migrations completed");
        return Ok(());
    }

    let app_data = Arc::new(AppData::init(db, &config));

    if command != Commands::Serve {
        return cli::execute_command(command, app_data).await;
    }

    let server_address = config.bootstrap.server_address();
    let app = build_app(app_data, &format!("http://{}/api", server_address));

    tracing::info!("Starting server on http://{}", server_address);
    tracing::info!("Swagger UI available at http://{}/swagger", server_address);

    Server::new(TcpListener::bind(server_address)).run(app).await?;

    Ok(())
}
