use backend::{build_rocket, config::ServerConfig, routes::AppState};
use shuttle_runtime::CustomError;
use sqlx::PgPool;
use tracing::info;

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secret_store: shuttle_runtime::SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    info!("🚀 Starting CRUD server");

    let config = ServerConfig::from_secrets(&secret_store);
    info!("🌐 CORS origins: {}", config.allowed_origins.join(", "));

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(CustomError::new)?;

    info!("📋 Migrations complete");

    let rocket = build_rocket(config).manage(AppState::new(pool));

    Ok(rocket.into())
}
