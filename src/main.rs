use crate::app::AppState;
use crate::config::Config;
use crate::db::{init_db, Database};
use crate::responses::html_error_response;
use crate::router::handle;
use astra::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cli;
mod config;
mod db;
mod errors;
mod geo;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Opened once here; every component gets a clone of this handle.
    let db = match Database::open(&config.database_path).and_then(|db| {
        init_db(&db)?;
        Ok(db)
    }) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("database initialization failed: {e}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        None | Some("serve") => serve(&config, db.clone()),
        Some("import") => {
            let path = args
                .get(1)
                .map(PathBuf::from)
                .unwrap_or_else(|| config.listings_file.clone());
            cli::import_listings(&db, &path).map(|_| ())
        }
        Some("export") => {
            let out_dir = args.get(1).map(PathBuf::from).unwrap_or_else(|| ".".into());
            AppState::from_config(&config, db.clone())
                .map_err(cli::CliError::from)
                .and_then(|state| cli::export_layers(&state, &out_dir))
        }
        Some(other) => Err(cli::CliError::UnknownCommand(other.to_string())),
    };

    let status = match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{e}");
            1
        }
    };

    if let Err(e) = db.close() {
        tracing::warn!("{e}");
    }
    std::process::exit(status);
}

fn serve(config: &Config, db: Database) -> Result<(), cli::CliError> {
    let state = AppState::from_config(config, db)?;

    tracing::info!(
        addr = %config.bind_addr,
        listings = %state.listing_source_label,
        "starting server"
    );

    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!("server ended with error: {e}");
    }

    tracing::info!("server shut down cleanly");
    Ok(())
}
