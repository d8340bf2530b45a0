use std::error::Error;

use custdb::{
    domain::{customer::CustomerRepository, Entity},
    infrastructure::{ConnectionProvider, PostgresCustomerRepository},
    CustdbConfig,
};
use tracing::{error, info, Level};

#[tokio::main]
async fn main() {
    match CustdbConfig::load() {
        Ok(config) => {
            tracing_subscriber::fmt()
                .with_max_level(Level::from(&config.logger.level))
                .init();
            if let Err(error) = list(&config).await {
                error!("アプリケーションエラー: {}", error);
            }
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("アプリケーションエラー: {}", error)
        }
    }
}

async fn list(config: &CustdbConfig) -> Result<(), Box<dyn Error>> {
    let repository = PostgresCustomerRepository::new(ConnectionProvider::from(&config.database));
    repository.ensure_schema().await?;
    let customers = repository.list_all().await?;
    info!("顧客数: {}", customers.len());
    for customer in customers {
        info!("顧客: {} {}", customer.id(), customer.name());
    }
    Ok(())
}
