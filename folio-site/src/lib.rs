//! Static site emission for folio pages.
//!
//! Turns the live builder page into a standalone `index.html`, `style.css`
//! and `script.js`. Editor-only markup (control bars, edit markers,
//! live-editing attributes) is stripped from a copy of the page; field text
//! and structure are kept as they are.

pub mod assets;
mod bundle;
pub mod strip;

pub use bundle::{INDEX_HTML, SCRIPT_JS, STYLE_CSS, SiteBundle};
pub use strip::strip_editor_markup;

/// Result type for site emission.
pub type SiteResult<T> = Result<T, SiteError>;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("page error: {0}")]
    Dom(#[from] folio_dom::DomError),
}
