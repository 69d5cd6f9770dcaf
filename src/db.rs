use sqlx::AnyPool;
use sqlx::any::{self, AnyPoolOptions};
use std::sync::Once;

static INSTALL_DRIVERS: Once = Once::new();

/// Build the connection pool for `database_url`. The URL scheme picks the
/// backend (`mysql://...`, `sqlite://...`).
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<AnyPool, sqlx::Error> {
    INSTALL_DRIVERS.call_once(any::install_default_drivers);

    AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
