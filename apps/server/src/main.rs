#![warn(clippy::all, clippy::pedantic)]

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use clap::Parser;
use service_status::database::initialize_database;
use service_status::pool::{LibsqlPool, connect_pool};
use service_status::{Config, LibsqlTargetStore, TargetStore};
use tracing::info;

mod cli;
mod context;
mod error;
mod routes;
#[cfg(test)]
mod test_support;

use cli::Cli;
use context::AppContext;
use error::AppError;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_config(cli.config.as_ref())?;
    cli.apply(&mut config);

    logger::init(&config.logging.level, &config.logging.format);
    info!("{}", config);

    let pool = open_database(&config).await?;
    let store: Arc<dyn TargetStore> = Arc::new(LibsqlTargetStore::new_from_pool(pool.clone()));
    let context = web::Data::new(AppContext::new(config, store));

    let addr = context.bind_addr()?;
    let reconciler = context.reconciler().spawn();

    let served = run_server(addr, context).await;

    // The loop must be fully stopped before the pool goes away.
    info!("HTTP server stopped, shutting down reconciliation loop");
    reconciler.shutdown().await;
    pool.close();
    info!("Shutdown complete");

    served
}

/// Connect the pool and bring the schema up to date
async fn open_database(config: &Config) -> anyhow::Result<LibsqlPool> {
    let pool = connect_pool(&config.database).await?;
    let conn = pool.get().await.context("failed to get a database connection")?;
    initialize_database(&conn).await.context("failed to run database migrations")?;

    Ok(pool)
}

async fn run_server(addr: SocketAddr, context: web::Data<AppContext>) -> Result<(), AppError> {
    info!("Listening on http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(context.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::routes)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
