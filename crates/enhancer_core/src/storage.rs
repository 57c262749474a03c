//! The single persisted user preference.

use crate::dom::PreferenceStorage;
use crate::error::Result;
use crate::theme::Theme;

/// Reads and writes the theme preference, isolating storage failures.
#[derive(Debug)]
pub struct PreferenceStore<S> {
    storage: S,
    key: String,
}

impl<S: PreferenceStorage> PreferenceStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Returns the explicitly chosen theme, if any.
    ///
    /// Unreadable storage and unknown values both count as "no preference".
    pub fn load(&self) -> Option<Theme> {
        match self.storage.get_item(&self.key) {
            Ok(Some(value)) => match value.parse() {
                Ok(theme) => Some(theme),
                Err(()) => {
                    tracing::debug!(key = %self.key, %value, "Ignoring unknown stored theme");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read theme preference");
                None
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        self.storage.set_item(&self.key, theme.as_str())
    }
}
