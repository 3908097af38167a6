use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use transaction_hub::{
    api,
    config::{self, database},
    core::Resolver,
    errors::Result,
    store::DatabaseStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_app_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Connect and make sure the tables exist
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Wire the resolver to its stores and serve
    let store = Arc::new(DatabaseStore::new(db));
    let resolver = Resolver::new(Arc::clone(&store) as _, store);

    api::serve(resolver, &app_config.bind_address()).await
}
