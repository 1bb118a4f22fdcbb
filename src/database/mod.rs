use std::sync::Once;
use std::time::Duration;

use sqlx::any::AnyPoolOptions;

mod query;
mod score;
mod store_error;

pub use query::{fetch_scores, ScoreOrder, ScoreQuery};
pub use score::{RecordId, ScoreRecord, ScoreValue};
pub use store_error::StoreError;

pub type DatabasePool = sqlx::AnyPool;
pub type DatabaseConnection = sqlx::pool::PoolConnection<sqlx::Any>;

/// Upper bound on waiting for a request's connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

static INSTALL_DRIVERS: Once = Once::new();

/// Registers the sqlx `Any` drivers, once per process.
pub(crate) fn install_drivers() {
    INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);
}

/// Creates the pool without connecting: a store that is down at boot only
/// surfaces once a page asks for a connection.
pub fn create_pool(database_url: &str) -> Result<DatabasePool, sqlx::Error> {
    install_drivers();
    AnyPoolOptions::new()
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(database_url)
}

/// Opens this request's connection to the score store. The handle returns to
/// the pool when dropped, on every exit path.
pub async fn connect(database: &DatabasePool) -> Result<DatabaseConnection, StoreError> {
    database
        .acquire()
        .await
        .map_err(|error| StoreError::connection(error.to_string()))
}
