//! # Folio Diff
//!
//! Structural differences between two [`Layout`](folio_layout::Layout) states.
//!
//! ## Pipeline
//!
//! ```text
//! Layout ──to_value──→ Value ──diff_values──→ [Change] ──apply──→ Value ──from_value──→ Layout
//! ```
//!
//! ## Semantics
//!
//! - Keyed lists (`components`, `children`) are diffed as sets keyed by id:
//!   removed ids yield `remove`, new ids yield `add`, shared ids recurse.
//! - Maps recurse key by key.
//! - Anything else that differs yields one `modify` at its path.
//! - A reordering of surviving list items cannot be expressed as keyed
//!   changes and is recorded as one `modify` of the whole list.
//!
//! Every change is addressed by a dot-joined path of map keys and item ids,
//! e.g. `components.hero.styles.layout.width`.
//!
//! ## Guarantees
//!
//! - `apply_diff(a, generate_diff(a, b)) == b`
//! - `apply_diff(apply_diff(a, d), revert_diff(d)) == a`
//! - applying the same diff twice equals applying it once
//!
//! Applying a diff to a layout other than the one it was computed from is
//! not checked; later changes simply overwrite whatever is there.

mod change;
mod differ;
mod error;
mod patch;
pub mod path;

pub use change::{Change, ChangeKind, DiffSummary, PageDiff};
pub use differ::{diff_values, generate_diff};
pub use error::DiffError;
pub use patch::{apply_changes, apply_diff, merge_diffs, revert_diff};
