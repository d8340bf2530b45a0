use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, info};

use crate::domain::customer::{Customer, CustomerId, CustomerRepository};
use crate::domain::{DataAccessError, Entity};
use crate::infrastructure::{schema_error, ConnectionProvider};

#[derive(Clone)]
pub struct PostgresCustomerRepository {
    provider: ConnectionProvider,
}

impl PostgresCustomerRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    /// リポジトリを生成し、テーブルが存在することを保証する
    pub async fn connect(provider: ConnectionProvider) -> Result<Self, DataAccessError> {
        let repository = Self::new(provider);
        repository.ensure_schema().await?;
        Ok(repository)
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn ensure_schema(&self) -> Result<(), DataAccessError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (id BIGINT NOT NULL PRIMARY KEY, name VARCHAR NOT NULL)",
            Customer::ENTITY_NAME
        );
        let mut conn = self.provider.get_connection().await?;
        debug!("{}", sql);
        let result = sqlx::query(&sql).execute(&mut conn).await;
        self.provider.release(conn).await;
        match result {
            Ok(_) => {
                info!("テーブル作成確認: {}", Customer::ENTITY_NAME);
                Ok(())
            }
            Err(e) => Err(schema_error(e)),
        }
    }

    async fn create(&self, entity: &Customer) -> Result<(), DataAccessError> {
        let sql = format!(
            "INSERT INTO {} (id, name) VALUES ($1, $2)",
            Customer::ENTITY_NAME
        );
        let mut conn = self.provider.get_connection().await?;
        debug!("{} [{}, {}]", sql, entity.id(), entity.name());
        let result = sqlx::query(&sql)
            .bind(*entity.id())
            .bind(entity.name())
            .execute(&mut conn)
            .await;
        self.provider.release(conn).await;
        result?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Customer>, DataAccessError> {
        let sql = format!("SELECT id, name FROM {}", Customer::ENTITY_NAME);
        let mut conn = self.provider.get_connection().await?;
        debug!("{}", sql);
        let result = sqlx::query(&sql).fetch_all(&mut conn).await;
        self.provider.release(conn).await;
        result?.iter().map(Customer::try_from).collect()
    }
}

impl TryFrom<&PgRow> for Customer {
    type Error = DataAccessError;

    fn try_from(value: &PgRow) -> Result<Self, Self::Error> {
        let id: i64 = value.try_get("id")?;
        let name: String = value.try_get("name")?;
        Ok(Customer::create(CustomerId::from(id), name)?)
    }
}
