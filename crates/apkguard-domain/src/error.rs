use thiserror::Error;

/// Aborts analysis of a whole manifest.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("expected a <manifest> root element, found <{found}>")]
    UnexpectedRoot { found: String },

    #[error("attribute namespace prefix must not be empty")]
    EmptyNamespace,

    #[error("failed to build verification worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
