//! # Folio Editor
//!
//! Live editing state for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ canvas / palette: produce Layout edits      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorSession                       │
//! │  - Apply component edits                    │
//! │  - Snapshot every edit into EditHistory     │
//! │  - Undo / redo by moving a cursor           │
//! └─────────────────────────────────────────────┘
//!                     ↓  explicit save
//! ┌─────────────────────────────────────────────┐
//! │ store: PageService::create_version          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots, not diffs**: every edit stores a full `Layout`; undo is a
//!    cursor move and can never drift from what the user saw
//! 2. **Ephemeral**: nothing here is persisted; the session dies with the tab
//! 3. **Owned state**: a session is a plain value, so tests and parallel
//!    editors never share anything
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{EditorSession, Position};
//! use folio_layout::{ComponentType, Layout};
//!
//! let mut session = EditorSession::new(Layout::default());
//! let id = session.add_component(
//!     ComponentType::new("hero", "Hero", "sections"),
//!     Position::new(0.0, 0.0),
//! );
//! session.undo();
//! assert!(session.layout().find_component(&id).is_none());
//!
//! // Hand the working layout to the version store on save
//! service.create_version(&page_id, session.layout().clone(), metadata).await?;
//! ```

mod errors;
mod history;
mod session;

pub use errors::EditorError;
pub use history::{EditHistory, DEFAULT_MAX_LEVELS};
pub use session::{ComponentUpdate, EditorSession, Position};
