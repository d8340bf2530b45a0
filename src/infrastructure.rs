mod customer;
mod provider;

use crate::domain::{customer::CustomerError, DataAccessError};

pub use self::customer::*;
pub use self::provider::*;

impl From<sqlx::Error> for DataAccessError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::Database(ref e) if e.is_unique_violation() => {
                Self::DuplicateKeyError(Box::new(value))
            }
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::ConnectionError(Box::new(value)),
            sqlx::Error::RowNotFound
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_) => Self::ReadError(Box::new(value)),
            _ => Self::QueryError(Box::new(value)),
        }
    }
}

impl From<CustomerError> for DataAccessError {
    fn from(value: CustomerError) -> Self {
        DataAccessError::ReadError(Box::new(value))
    }
}

/// DDL の失敗を分類する。接続エラー以外は全て `SchemaError` とする
pub(crate) fn schema_error(value: sqlx::Error) -> DataAccessError {
    match DataAccessError::from(value) {
        e @ DataAccessError::ConnectionError(_) => e,
        DataAccessError::SchemaError(e)
        | DataAccessError::DuplicateKeyError(e)
        | DataAccessError::ReadError(e)
        | DataAccessError::QueryError(e) => DataAccessError::SchemaError(e),
    }
}

#[cfg(test)]
pub(crate) mod test {
    use testcontainers::{
        core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage, Image, ImageExt,
        TestcontainersError,
    };

    use super::ConnectionProvider;

    pub async fn run_postgres() -> Result<ContainerAsync<impl Image>, TestcontainersError> {
        GenericImage::new("postgres", "16-alpine")
            // initdb の一時サーバはソケットのみで待ち受けるため、ポート番号の出力で起動完了を判定する
            .with_wait_for(WaitFor::message_on_stderr("port 5432"))
            .with_env_var("POSTGRES_USER", "postgres")
            .with_env_var("POSTGRES_PASSWORD", "postgres")
            .with_env_var("POSTGRES_DB", "postgres")
            .start()
            .await
    }

    pub async fn connection_provider<I: Image>(
        container: &ContainerAsync<I>,
    ) -> Result<ConnectionProvider, TestcontainersError> {
        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        Ok(ConnectionProvider::new(format!(
            "postgres://postgres:postgres@{host}:{port}/postgres"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::schema_error;
    use crate::domain::{customer::CustomerError, DataAccessError};

    #[test]
    fn test_connection_errors() {
        let error = sqlx::Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert!(DataAccessError::from(error).is_connection_error());
        assert!(DataAccessError::from(sqlx::Error::PoolTimedOut).is_connection_error());
        let error = sqlx::Error::Configuration("bad url".into());
        assert!(DataAccessError::from(error).is_connection_error());
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(
            DataAccessError::from(sqlx::Error::RowNotFound),
            DataAccessError::ReadError(_)
        ));
        assert!(matches!(
            DataAccessError::from(sqlx::Error::ColumnNotFound("name".to_owned())),
            DataAccessError::ReadError(_)
        ));
        assert!(matches!(
            DataAccessError::from(CustomerError::NameIsEmpty),
            DataAccessError::ReadError(_)
        ));
    }

    #[test]
    fn test_schema_errors() {
        assert!(matches!(
            schema_error(sqlx::Error::Protocol("unexpected message".to_owned())),
            DataAccessError::ConnectionError(_)
        ));
        let error = sqlx::Error::Io(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
        assert!(schema_error(error).is_connection_error());
        assert!(matches!(
            schema_error(sqlx::Error::RowNotFound),
            DataAccessError::SchemaError(_)
        ));
        assert!(matches!(
            schema_error(sqlx::Error::ColumnNotFound("id".to_owned())),
            DataAccessError::SchemaError(_)
        ));
    }
}
