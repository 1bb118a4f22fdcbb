use std::time::Duration;

use chrono::NaiveDateTime;
use sqlx::any::AnyRow;
use sqlx::Row;
use tokio::time::timeout;

use super::{RecordId, ScoreRecord, ScoreValue, StoreError};

/// Upper bound on a single statement; a hung store turns into a query error.
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Format of `created_at` once selected as text.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which rows of `highscores` a query wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreFilter {
    /// Game results: `score > 0`.
    GameScores,
    /// Camera captures and drawings: `score = 0`.
    Photos,
}

/// How the rows come back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreOrder {
    /// Best score first, newer game first among ties.
    TopScores,
    /// Newest insertion first.
    Newest,
}

/// A read against the `highscores` table: filter, order, optional row cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreQuery {
    pub filter: ScoreFilter,
    pub order: ScoreOrder,
    pub limit: Option<u32>,
}

impl ScoreQuery {
    /// Top 3 game scores for the podium.
    pub fn podium() -> Self {
        Self {
            filter: ScoreFilter::GameScores,
            order: ScoreOrder::TopScores,
            limit: Some(3),
        }
    }

    /// Latest camera photos and drawings, capped at 50.
    pub fn gallery() -> Self {
        Self {
            filter: ScoreFilter::Photos,
            order: ScoreOrder::Newest,
            limit: Some(50),
        }
    }

    /// Every game score, in the given order.
    pub fn ranking(order: ScoreOrder) -> Self {
        Self {
            filter: ScoreFilter::GameScores,
            order,
            limit: None,
        }
    }

    /// Assembles the SELECT statement. `created_at` is cast to text so the
    /// `Any` driver decodes it on MySQL and SQLite alike.
    fn sql(&self) -> String {
        let mut sql = String::from(
            "SELECT id, score, image_path, CAST(created_at AS CHAR(19)) AS created_at \
             FROM highscores WHERE ",
        );
        sql.push_str(match self.filter {
            ScoreFilter::GameScores => "score > 0",
            ScoreFilter::Photos => "score = 0",
        });
        sql.push_str(" ORDER BY ");
        sql.push_str(match self.order {
            ScoreOrder::TopScores => "score DESC, id DESC",
            ScoreOrder::Newest => "id DESC",
        });
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        sql
    }
}

/// Runs `query` on an open connection and materializes the rows in query
/// order. Zero rows is an empty vector, not an error. Does not retry.
pub async fn fetch_scores(
    connection: &mut sqlx::AnyConnection,
    query: &ScoreQuery,
) -> Result<Vec<ScoreRecord>, StoreError> {
    let sql = query.sql();
    let rows = timeout(QUERY_TIMEOUT, sqlx::query(&sql).fetch_all(&mut *connection))
        .await
        .map_err(|_| StoreError::query(format!("timed out after {:?}", QUERY_TIMEOUT)))?
        .map_err(|error| StoreError::query(error.to_string()))?;

    rows.iter().map(record_from_row).collect()
}

fn record_from_row(row: &AnyRow) -> Result<ScoreRecord, StoreError> {
    let id = row.try_get::<RecordId, _>(0).map_err(decode_error)?;
    let score = row.try_get::<ScoreValue, _>(1).map_err(decode_error)?;
    let image_path = row.try_get::<String, _>(2).map_err(decode_error)?;
    let created_at = row
        .try_get::<Option<String>, _>(3)
        .map_err(decode_error)?
        .and_then(|text| NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT).ok());

    Ok(ScoreRecord::new(id, score, image_path, created_at))
}

fn decode_error(error: sqlx::Error) -> StoreError {
    StoreError::query(error.to_string())
}
