use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use tasktrack::auth::{PasswordHasher, TokenService};
use tasktrack::config::Config;
use tasktrack::routes;
use tasktrack::store::{postgres::run_migrations, PgTaskStore, PgUserStore};
use tasktrack::AppContext;

fn startup_error<E: std::fmt::Display>(context: &str, error: E) -> io::Error {
    log::error!("{}: {}", context, error);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, error))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| startup_error("failed to connect to database", e))?;

    run_migrations(&pool)
        .await
        .map_err(|e| startup_error("failed to run migrations", e))?;

    let hasher = PasswordHasher::new(config.bcrypt_cost)
        .map_err(|e| startup_error("failed to initialise password hasher", e))?;

    let ctx = web::Data::new(AppContext::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgTaskStore::new(pool)),
        hasher,
        TokenService::new(&config.jwt_secret),
    ));

    log::info!("Starting TaskTrack server at {}", config.server_url());

    let cors_origin = config.cors_allowed_origin.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(ctx.clone())
            .wrap(routes::cors(&cors_origin))
            .wrap(Logger::default())
            .configure(routes::configure_app)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
