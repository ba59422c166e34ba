#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Database(String),
    Precondition(String),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Io(err)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Serialization(err)
    }
}

impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::Database(err.to_string())
    }
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(e) => write!(f, "IO error: {}", e),
            ImportError::Serialization(e) => write!(f, "Serialization error: {}", e),
            ImportError::Database(e) => write!(f, "Database error: {}", e),
            ImportError::Precondition(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ImportError {}
