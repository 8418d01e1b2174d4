//! Error types for the universities search client.

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("universities request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("universities search returned HTTP {status}")]
    Status { status: u16 },
    #[error("universities search returned a malformed payload")]
    Malformed {
        #[source]
        source: anyhow::Error,
    },
}

impl LookupError {
    /// Whether the upstream answered with a body we could not interpret.
    ///
    /// Transport and status failures are not malformed; the widen-retry only
    /// applies to this case.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
