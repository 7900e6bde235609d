#[derive(Debug)]
pub enum CatalogError {
    NotFound(String),
    Conflict(String),
    Database(sqlx::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CatalogError::NotFound(m) => write!(f, "{}", m),
            CatalogError::Conflict(m) => write!(f, "{}", m),
            CatalogError::Database(e) => write!(f, "Database error: {}", e),
            CatalogError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        CatalogError::Database(e)
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}
