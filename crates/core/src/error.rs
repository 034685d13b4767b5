/// Faults raised by the core and its collaborators.
///
/// Expected workflow failures (disabled plugin, unknown ids, already in the
/// requested state) are *not* errors: they are reported through the
/// operation outcome types. Only rejected credentials and integration
/// failures end up here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap any displayable collaborator failure as a [`CoreError::Backend`].
    pub fn backend(err: impl std::fmt::Display) -> Self {
        CoreError::Backend(err.to_string())
    }
}
