use dotenvy::dotenv;
use tracing::info;

mod config;
mod db;
mod error;
mod markup;
mod model;
mod store;

use config::Config;
use db::init_db;
use model::customer::Customer;
use model::department::Department;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_level(true)
        .init();

    let config = Config::from_env();
    let pool = init_db(&config.database_url, config.max_connections).await?;

    // Schema setup and teardown belong to the caller; the gateway only
    // touches rows.
    sqlx::query(store::CREATE_SCHEMA_SQL).execute(&pool).await?;

    let mut customer = Customer::new("customer", 1);
    customer.departments.push(
        Department::new("sales")
            .child(Department::new("retail"))
            .child(Department::new("wholesale")),
    );
    customer.departments.push(
        Department::new("engineering").child(Department::new("platform")),
    );

    let id = customer.insert(&pool).await?;
    info!(id, "inserted {:?}", customer);

    let loaded = Customer::load(id, &pool).await?;
    let round_trip_intact = loaded.departments == customer.departments;
    info!(round_trip_intact, "loaded {:?}", loaded);

    sqlx::query(store::DROP_SCHEMA_SQL).execute(&pool).await?;
    Ok(())
}
