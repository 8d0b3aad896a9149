//! Synchronization engine for the folio portfolio builder.
//!
//! A [`BuilderSession`] owns the [`folio_model::ConfigurationStore`] and the
//! rendered [`Page`] and is the only code that writes either. Every
//! operation (add, edit, delete, duplicate, move, section edits, reload)
//! updates both in the same step, so the two stay reconciled: each record
//! has exactly one rendered instance and each instance one record.
//!
//! UI events arrive either as direct method calls or through the
//! delegation entry point [`BuilderSession::dispatch_click`], which maps a
//! control button's `data-action` onto the [`Action`] table.

mod action;
mod error;
mod import;
pub mod markup;
mod page;
mod session;

pub use action::{Action, EditForm, FormField, Notification, NotificationLevel, Outcome, Target};
pub use error::{EngineError, EngineResult, Mismatch};
pub use import::{ImportSlot, ImportTicket};
pub use page::Page;
pub use session::{BuilderSession, COPY_MARKER};
