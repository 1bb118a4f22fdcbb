/// A failure in the score store, split by phase so the logs can tell an
/// unreachable server from a bad query. Pages show the same generic banner
/// for both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    Connection { message: String },
    Query { message: String },
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl std::error::Error for StoreError {}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection { message } => {
                write!(f, "database connection failed: {}", message)
            }
            Self::Query { message } => write!(f, "database query failed: {}", message),
        }
    }
}
