use thiserror::Error;

/// Conditions under which a drawing operation is skipped.
///
/// All of these are expected while the host is mounting or tearing down the
/// canvas, so the controller turns them into a [`ScratchOutcome::NoChange`](crate::ScratchOutcome).
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScratchError {
    #[error("Drawing surface is not mounted")]
    MissingSurface,
    #[error("Container is not mounted")]
    MissingContainer,
    #[error("2D drawing context is unavailable")]
    ContextUnavailable,
    #[error("Could not read back pixel data")]
    PixelReadFailed,
}

pub type Result<T> = core::result::Result<T, ScratchError>;
