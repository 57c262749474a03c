//! The components the layer is made of, one per file.

mod content;
mod diagnostics;
mod progress;
mod search;
mod smooth_scroll;
mod theme;
mod usage;

pub use self::content::ContentComponent;
pub use self::diagnostics::DiagnosticsComponent;
pub use self::progress::ProgressComponent;
pub use self::search::SearchComponent;
pub use self::smooth_scroll::SmoothScrollComponent;
pub use self::theme::{color_scheme_query, ThemeComponent};
pub use self::usage::UsageComponent;
