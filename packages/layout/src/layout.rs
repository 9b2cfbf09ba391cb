use crate::{Breakpoint, Component, LayoutError, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfiguration {
    pub columns: u32,
    pub row_height: u32,
    pub gap: u32,
    pub snap_to_grid: bool,
}

impl Default for GridConfiguration {
    fn default() -> Self {
        Self {
            columns: 12,
            row_height: 40,
            gap: 16,
            snap_to_grid: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointConfig {
    pub min_width: u32,
    pub columns: u32,
    pub gap: u32,
}

impl BreakpointConfig {
    pub fn new(min_width: u32, columns: u32, gap: u32) -> Self {
        Self { min_width, columns, gap }
    }

    /// Builder defaults for each viewport class
    pub fn default_for(breakpoint: Breakpoint) -> Self {
        match breakpoint {
            Breakpoint::Mobile => Self::new(0, 4, 8),
            Breakpoint::Tablet => Self::new(768, 8, 12),
            Breakpoint::Desktop => Self::new(1024, 12, 16),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingUnit {
    Px,
    Rem,
    Em,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingSystem {
    pub base: f64,
    pub scale: f64,
    pub units: SpacingUnit,
}

impl Default for SpacingSystem {
    fn default() -> Self {
        Self {
            base: 4.0,
            scale: 1.25,
            units: SpacingUnit::Rem,
        }
    }
}

/// The versioned page state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub components: Vec<Component>,
    pub grid: GridConfiguration,
    pub breakpoints: BTreeMap<Breakpoint, BreakpointConfig>,
    pub spacing: SpacingSystem,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            grid: GridConfiguration::default(),
            breakpoints: Breakpoint::ALL
                .iter()
                .map(|bp| (*bp, BreakpointConfig::default_for(*bp)))
                .collect(),
            spacing: SpacingSystem::default(),
        }
    }
}

impl Layout {
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Check that every component id (nested children included) is unique
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();
        for id in self.component_ids() {
            if !seen.insert(id) {
                return Err(LayoutError::DuplicateComponentId(id.to_string()));
            }
        }
        Ok(())
    }

    /// All component ids, depth-first in document order
    pub fn component_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for component in &self.components {
            component.collect_ids(&mut ids);
        }
        ids
    }

    pub fn find_component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find_map(|c| c.find(id))
    }

    pub fn find_component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Remove a component at any depth
    pub fn remove_component(&mut self, id: &str) -> Option<Component> {
        if let Some(pos) = self.components.iter().position(|c| c.id == id) {
            return Some(self.components.remove(pos));
        }
        self.components
            .iter_mut()
            .find_map(|c| c.remove_descendant(id))
    }

    /// Convert to the tagged tree the diff engine operates on
    pub fn to_value(&self) -> Result<Value, LayoutError> {
        serde_json::to_value(self)
            .map(Value::from)
            .map_err(LayoutError::Encode)
    }

    pub fn from_value(value: Value) -> Result<Self, LayoutError> {
        serde_json::from_value(serde_json::Value::from(value)).map_err(LayoutError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentType;

    fn component(id: &str) -> Component {
        Component::new(id, ComponentType::new("text", "Text", "basic"))
    }

    #[test]
    fn test_default_layout_matches_builder_defaults() {
        let layout = Layout::default();
        assert_eq!(layout.grid.columns, 12);
        assert_eq!(layout.grid.row_height, 40);
        assert_eq!(layout.breakpoints[&Breakpoint::Tablet].min_width, 768);
        assert_eq!(layout.breakpoints[&Breakpoint::Desktop].columns, 12);
        assert_eq!(layout.spacing.units, SpacingUnit::Rem);
        assert!(layout.components.is_empty());
    }

    #[test]
    fn test_validate_rejects_duplicate_nested_id() {
        let layout = Layout::default()
            .with_component(component("a").with_child(component("b")))
            .with_component(component("b"));

        match layout.validate() {
            Err(LayoutError::DuplicateComponentId(id)) => assert_eq!(id, "b"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_value_roundtrip_preserves_layout() {
        let layout = Layout::default()
            .with_component(component("a").with_prop("text", "Hello"))
            .with_component(component("b").with_child(component("c")));

        let value = layout.to_value().unwrap();
        assert_eq!(Layout::from_value(value).unwrap(), layout);
    }

    #[test]
    fn test_components_become_keyed_list() {
        let layout = Layout::default()
            .with_component(component("a"))
            .with_component(component("b"));

        let value = layout.to_value().unwrap();
        let components = match value.get("components") {
            Some(Value::List(list)) => list,
            other => panic!("expected keyed list, got {:?}", other),
        };
        assert_eq!(components.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_nested_component() {
        let mut layout = Layout::default().with_component(component("a").with_child(component("b")));
        assert!(layout.remove_component("b").is_some());
        assert!(layout.find_component("b").is_none());
        assert!(layout.find_component("a").is_some());
    }
}
