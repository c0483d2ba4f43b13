use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Fresh in-memory database with the schema applied. One connection only:
/// every sqlite in-memory connection is its own database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    crate::db::init_schema(&pool).await.expect("schema");
    pool
}

/// Builds the full `/api` service over the given pool with the built-in
/// pricing table.
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new(
                    crate::model::pricing::PricingTable::builtin(),
                ))
                .configure(|cfg| crate::routes::configure(cfg, "/api")),
        )
        .await
    };
}

pub(crate) use test_app;
