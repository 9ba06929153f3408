use thiserror::Error;

/// The three ways a public operation can fail.
///
/// `Fatal` means the engine hit an internal consistency violation (e.g. an
/// SPQR tree failed to build over a block that should have been biconnected);
/// per the design, the engine must be discarded afterwards rather than reused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanarError {
    #[error("vertex or edge index {index} is out of range (bound {bound})")]
    OutOfRange { index: usize, bound: usize },

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("internal consistency violation: {0}")]
    Fatal(String),
}
