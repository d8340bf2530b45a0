use async_trait::async_trait;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::domain::{DataAccessError, Entity, Id};

/// 顧客リポジトリ
#[async_trait]
pub trait CustomerRepository {
    /// 顧客テーブルが無ければ作成する
    async fn ensure_schema(&self) -> Result<(), DataAccessError>;
    /// 顧客を登録する
    async fn create(&self, entity: &Customer) -> Result<(), DataAccessError>;
    /// 全ての顧客を取得する (順序は保証しない)
    async fn list_all(&self) -> Result<Vec<Customer>, DataAccessError>;
}

/// 顧客ID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref,
)]
pub struct CustomerId(i64);

impl Id for CustomerId {
    type Inner = i64;
}

/// 顧客エンティティ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
}

impl Customer {
    pub fn create(id: CustomerId, name: String) -> Result<Self, CustomerError> {
        Self::validate_name(&name)?;
        Ok(Self { id, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn validate_name(name: &str) -> Result<(), CustomerError> {
        match name.is_empty() {
            true => Err(CustomerError::NameIsEmpty),
            false => Ok(()),
        }
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    const ENTITY_NAME: &'static str = "customers";

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// 顧客エラー
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum CustomerError {
    /// 名前が空です
    #[display(fmt = "Name cannot be empty")]
    NameIsEmpty,
}
