//! Open connection handles
//!
//! A handle is exclusively owned by the caller that requested it, typically
//! for the duration of one repository operation, and must be closed on every
//! exit path before the operation returns. Handles are never cached or shared
//! across operations.

use tokio::task::JoinHandle;

use super::error::Result;

/// An opened native database connection
pub enum ConnectionHandle {
    Postgres {
        client: tokio_postgres::Client,
        /// Task driving the wire protocol; finishes once the client is dropped
        driver: JoinHandle<()>,
    },
    MySql(mysql_async::Conn),
}

impl ConnectionHandle {
    /// Provider name for diagnostics
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::MySql(_) => "mysql",
        }
    }

    /// Release the connection
    pub async fn close(self) -> Result<()> {
        match self {
            Self::Postgres { client, driver } => {
                drop(client);
                // The driver task exits once the client side hangs up
                let _ = driver.await;
                Ok(())
            }
            Self::MySql(conn) => {
                conn.disconnect().await?;
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("provider", &self.provider())
            .finish()
    }
}
