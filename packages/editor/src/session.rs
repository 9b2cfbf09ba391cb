//! # Editor Session
//!
//! The working copy of one page while it is open in the builder.
//!
//! Every edit produces a new layout which is committed to the
//! [`EditHistory`]; the session never keeps a second copy, so the layout
//! shown is always `history.current()`. Selection and the preview
//! breakpoint are view state and are not part of undo.

use crate::errors::EditorError;
use crate::history::EditHistory;
use folio_layout::{
    Breakpoint, Component, ComponentConstraints, ComponentType, Layout, StyleProperties,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Canvas coordinates a component is dropped at
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Partial update for a component; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ComponentUpdate {
    pub component_type: Option<ComponentType>,
    pub props: Option<BTreeMap<String, serde_json::Value>>,
    pub styles: Option<StyleProperties>,
    pub children: Option<Vec<Component>>,
    pub constraints: Option<ComponentConstraints>,
}

impl ComponentUpdate {
    pub fn props(props: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            props: Some(props),
            ..Self::default()
        }
    }

    pub fn styles(styles: StyleProperties) -> Self {
        Self {
            styles: Some(styles),
            ..Self::default()
        }
    }

    fn apply_to(self, component: &mut Component) {
        if let Some(component_type) = self.component_type {
            component.component_type = component_type;
        }
        if let Some(props) = self.props {
            component.props = props;
        }
        if let Some(styles) = self.styles {
            component.styles = styles;
        }
        if let Some(children) = self.children {
            component.children = Some(children);
        }
        if let Some(constraints) = self.constraints {
            component.constraints = Some(constraints);
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    history: EditHistory,
    selected: Option<String>,
    breakpoint: Breakpoint,
}

impl EditorSession {
    pub fn new(layout: Layout) -> Self {
        Self::from_history(EditHistory::new(layout))
    }

    pub fn with_history_limit(layout: Layout, max_levels: usize) -> Self {
        Self::from_history(EditHistory::with_max_levels(layout, max_levels))
    }

    fn from_history(history: EditHistory) -> Self {
        Self {
            history,
            selected: None,
            breakpoint: Breakpoint::Desktop,
        }
    }

    pub fn layout(&self) -> &Layout {
        self.history.current()
    }

    pub fn into_layout(self) -> Layout {
        self.history.current().clone()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Replace the whole layout as one undoable step
    pub fn update_layout(&mut self, layout: Layout) -> Result<(), EditorError> {
        layout.validate()?;
        self.history.commit(layout);
        Ok(())
    }

    /// Drop a new component of `component_type` at `position` and return its id
    pub fn add_component(&mut self, component_type: ComponentType, position: Position) -> String {
        let id = Uuid::now_v7().to_string();
        let component = Component::new(id.clone(), component_type)
            .with_styles(StyleProperties::placed(position.x, position.y));

        let mut next = self.layout().clone();
        next.components.push(component);
        self.history.commit(next);
        id
    }

    /// Append an already built component at the top level
    pub fn insert_component(&mut self, component: Component) -> Result<(), EditorError> {
        let mut next = self.layout().clone();
        next.components.push(component);
        self.update_layout(next)
    }

    pub fn remove_component(&mut self, id: &str) -> Result<Component, EditorError> {
        let mut next = self.layout().clone();
        let removed = next
            .remove_component(id)
            .ok_or_else(|| EditorError::ComponentNotFound(id.to_string()))?;

        // A removed parent takes its selected child with it
        let selection_removed = self
            .selected
            .as_deref()
            .map_or(false, |selected| removed.find(selected).is_some());
        if selection_removed {
            self.selected = None;
        }

        self.history.commit(next);
        Ok(removed)
    }

    pub fn update_component(&mut self, id: &str, update: ComponentUpdate) -> Result<(), EditorError> {
        let mut next = self.layout().clone();
        let component = next
            .find_component_mut(id)
            .ok_or_else(|| EditorError::ComponentNotFound(id.to_string()))?;
        update.apply_to(component);
        self.update_layout(next)
    }

    /// Select a component, or clear the selection with `None`
    pub fn select(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        match id {
            Some(id) if self.layout().find_component(id).is_none() => {
                Err(EditorError::ComponentNotFound(id.to_string()))
            }
            _ => {
                self.selected = id.map(str::to_string);
                Ok(())
            }
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_component(&self) -> Option<&Component> {
        self.selected
            .as_deref()
            .and_then(|id| self.layout().find_component(id))
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.breakpoint = breakpoint;
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Returns false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo().is_some();
        if moved {
            self.drop_stale_selection();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo().is_some();
        if moved {
            self.drop_stale_selection();
        }
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn drop_stale_selection(&mut self) {
        if self.selected_component().is_none() {
            self.selected = None;
        }
    }
}
