use axum::{Router, middleware};
use axum_helpers::{attach_permissions, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{
    Group, GroupRepository, InMemoryUserRepository, PgUserRepository, UserRepository, UserService,
};
use migration::Migrator;
use database::postgres::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use web_admin::{AdminState, AdminViews, DataGateway, HttpGateway, ServiceGateway};

mod config;
mod openapi;
mod pages;
mod state;

use config::Config;

/// Store used without a database, holding the same groups the seed migration inserts.
fn in_memory_repository() -> InMemoryUserRepository {
    InMemoryUserRepository::with_groups(
        migration::seed::GROUPS.map(|seeded| Group::with_id(seeded.id, seeded.name)),
    )
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    match config.database.clone() {
        Some(db_config) => {
            let db = database::postgres::connect_from_config_with_retry(db_config, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

            let repository = PgUserRepository::new(db.clone());
            serve(config, repository, Some(db)).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            let repository = in_memory_repository();
            serve(config, repository, None).await
        }
    }
}

async fn serve<R>(config: Config, repository: R, db: Option<DatabaseConnection>) -> eyre::Result<()>
where
    R: UserRepository + GroupRepository + 'static,
{
    let service = UserService::new(repository);

    let gateway: Arc<dyn DataGateway> = match &config.admin.gateway_url {
        Some(url) => {
            info!(url = %url, "Admin pages call the API over HTTP");
            Arc::new(HttpGateway::from_url(url.as_str(), config.admin.gateway_timeout)?)
        }
        None => {
            info!("Admin pages call the user service in-process");
            Arc::new(ServiceGateway::new(service.clone()))
        }
    };

    let permissions = Arc::new(config.permissions.source()?);
    let admin_pages = web_admin::router(AdminState {
        gateway,
        views: Arc::new(AdminViews::new()?),
        policy: config.admin.loading_policy,
    })
    .layer(middleware::from_fn_with_state(permissions, attach_permissions));

    let page_routes = Router::new()
        .nest("/admin", admin_pages)
        .merge(pages::router()?);
    let api_routes = domain_users::handlers::router(service);

    let router = create_router::<openapi::ApiDoc>(api_routes, page_routes, &config.server)?;

    // - /health: liveness with app name/version
    // - /ready: database ping when Postgres is configured
    let app = router
        .merge(health_router(config.app))
        .merge(state::ready_router(db.clone()));

    info!(
        loading_policy = ?config.admin.loading_policy,
        "Starting SIP admin with graceful shutdown (30s timeout)"
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        if let Some(db) = db {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("SIP admin shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_groups_match_the_seed_migration() {
        let groups = in_memory_repository().list_groups().await.unwrap();
        let listed: Vec<_> = groups.iter().map(|g| (g.id, g.name.as_str())).collect();
        let seeded: Vec<_> = migration::seed::GROUPS
            .iter()
            .map(|g| (g.id, g.name))
            .collect();
        assert_eq!(listed, seeded);
    }
}
