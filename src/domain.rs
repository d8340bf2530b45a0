pub mod customer;

use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
};
use thiserror::Error;

pub trait Id:
    Copy
    + Eq
    + Deref<Target = Self::Inner>
    + From<Self::Inner>
    + Display
    + Debug
    + Serialize
    + for<'de> Deserialize<'de>
{
    type Inner: FromStr;
}

pub trait Entity: Debug + Clone {
    type Id: Id;

    /// 永続化先の名前
    const ENTITY_NAME: &'static str;

    fn id(&self) -> Self::Id;
}

pub type BoxedError = Box<dyn Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("Database connection error: {0}")]
    ConnectionError(BoxedError),
    #[error("Schema definition error: {0}")]
    SchemaError(BoxedError),
    #[error("Duplicate key error: {0}")]
    DuplicateKeyError(BoxedError),
    #[error("Data read error: {0}")]
    ReadError(BoxedError),
    #[error("Database query error: {0}")]
    QueryError(BoxedError),
}

impl DataAccessError {
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }

    pub fn is_duplicate_key_error(&self) -> bool {
        matches!(self, Self::DuplicateKeyError(_))
    }
}
