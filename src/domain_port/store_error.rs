#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transient fault; the adapter already retried before surfacing it.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
    #[error("corrupt row: {0}")]
    Corrupt(String),
    #[error("store error: {0}")]
    Other(String),
}
