use thiserror::Error;

/// Failure modes of a catalog fetch
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog responded with status {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
