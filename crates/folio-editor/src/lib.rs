//! Editing sessions for folio documents.
//!
//! An [`Editor`] owns one document, a [`Selection`] over its flattened
//! positions and the subscribers to its changes. Edits are [`Step`]s batched
//! in a [`Transaction`]; each commit is atomic and produces at most one
//! [`Update`]. The word limit from [`EditorConfig`] is enforced after every
//! commit and on paste.
//!
//! # Example
//!
//! ```
//! use folio_editor::{Editor, EditorConfig};
//! use folio_media::{Alignment, MediaAttrsPatch, WrapStyle};
//!
//! let mut editor = Editor::new(EditorConfig::new().with_initial_content("<p>Intro</p>"));
//! editor.set_selection(7, 7);
//! editor
//!     .transaction()
//!     .insert_media("photo.png", MediaAttrsPatch::default())
//!     .set_alignment(Alignment::Left)
//!     .set_wrap_style(WrapStyle::Tight)
//!     .commit();
//! assert!(editor.get_content().contains(r#"data-align="left""#));
//! ```

mod config;
mod editor;
mod events;
mod flat;
mod selection;
mod sync;
mod transaction;

pub use config::{ConfigError, DEFAULT_PLACEHOLDER, EditorConfig};
pub use editor::Editor;
pub use events::{LimitWarning, Update};
pub use flat::AppliedMark;
pub use selection::Selection;
pub use sync::SyncState;
pub use transaction::{BlockType, CommitOutcome, Step, StepResult, Transaction};
