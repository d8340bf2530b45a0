use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, warn};

use crate::domain::DataAccessError;
use crate::Database;

/// 接続文字列から都度新しいコネクションを生成する
#[derive(Clone, Debug)]
pub struct ConnectionProvider {
    url: String,
}

impl ConnectionProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// 新しいコネクションを開く
    ///
    /// 接続文字列が不正な場合、接続または認証できない場合は `ConnectionError` を返す。
    pub async fn get_connection(&self) -> Result<PgConnection, DataAccessError> {
        let options = PgConnectOptions::from_str(&self.url)
            .map_err(|e| DataAccessError::ConnectionError(Box::new(e)))?;
        debug!(
            "コネクション取得: {}:{}/{}",
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or_default()
        );
        options
            .connect()
            .await
            .map_err(|e| DataAccessError::ConnectionError(Box::new(e)))
    }

    /// コネクションを閉じる
    pub async fn release(&self, conn: PgConnection) {
        if let Err(e) = conn.close().await {
            warn!("コネクション切断エラー: {}", e);
        }
    }
}

impl From<&Database> for ConnectionProvider {
    fn from(value: &Database) -> Self {
        Self::new(value.url.clone())
    }
}
