/// Failures the enhancement layer recovers from.
///
/// None of them is fatal: each one degrades a single feature and the base page
/// stays usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Reading or writing the persisted preference failed.
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An element the host is expected to render never showed up.
    #[error("host element `{0}` not found")]
    MissingHostElement(String),

    /// The asynchronous clipboard API rejected the write.
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
