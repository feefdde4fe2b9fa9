use async_trait::async_trait;

/// Boundary to the external text-completion provider. The prompt is a fully
/// rendered string; generation parameters are fixed by the implementation.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Provider unreachable or returned a non-success status.
    #[error("completion provider unavailable: {0}")]
    Unavailable(String),
    /// Provider succeeded but returned no usable text. Recoverable: the
    /// caller substitutes a generic apology and treats the turn as spent.
    #[error("provider returned no completion text")]
    Empty,
    /// Provider credentials missing.
    #[error("completion provider credentials not configured")]
    Configuration,
}
