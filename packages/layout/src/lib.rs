//! # Folio Layout
//!
//! The versioned data shape of a landing page.
//!
//! A [`Layout`] is an ordered collection of [`Component`]s plus the grid,
//! breakpoint and spacing configuration the builder canvas renders against.
//! Layouts are plain values: two layouts are compared by content, never by
//! identity.
//!
//! ## Two views of the same data
//!
//! ```text
//! ┌──────────────────────────────┐        ┌──────────────────────────────┐
//! │ Layout (typed)               │ ─────→ │ Value (tagged tree)          │
//! │  - what the editor mutates   │ ←───── │  - what the diff engine walks│
//! └──────────────────────────────┘        └──────────────────────────────┘
//! ```
//!
//! The [`Value`] tree has a closed set of shapes (scalar, anonymous sequence,
//! keyed list, map). Collections of identity-bearing items such as
//! `components` and `children` become keyed lists addressed by `id`, and maps
//! keep their keys sorted so equality never depends on insertion order.

mod component;
mod error;
mod layout;
mod styles;
mod value;

pub use component::{Component, ComponentConstraints, ComponentType};
pub use error::LayoutError;
pub use layout::{BreakpointConfig, GridConfiguration, Layout, SpacingSystem, SpacingUnit};
pub use styles::{
    Breakpoint, ColorStyles, Dimension, EffectStyles, LayoutStyles, StyleOverrides,
    StyleProperties, TypographyStyles,
};
pub use value::{KeyedList, Scalar, Value, ID_KEY};
