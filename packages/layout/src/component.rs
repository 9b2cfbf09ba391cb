use crate::StyleProperties;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Palette entry a component was created from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentType {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ComponentType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            icon: None,
        }
    }
}

/// Placement limits the canvas enforces while dragging and nesting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_children: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_children: Option<usize>,
}

/// A single placed element of a page
///
/// `id` is the component's identity across versions: the diff engine pairs
/// components by id, not by position or content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,

    #[serde(rename = "type")]
    pub component_type: ComponentType,

    /// Opaque content values (copy, image urls, AI suggestions, ...)
    #[serde(default)]
    pub props: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub styles: StyleProperties,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ComponentConstraints>,
}

impl Component {
    pub fn new(id: impl Into<String>, component_type: ComponentType) -> Self {
        Self {
            id: id.into(),
            component_type,
            props: BTreeMap::new(),
            styles: StyleProperties::default(),
            children: None,
            constraints: None,
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_styles(mut self, styles: StyleProperties) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_child(mut self, child: Component) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn children(&self) -> &[Component] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Depth-first search of this component and its descendants
    pub fn find(&self, id: &str) -> Option<&Component> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Component> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .as_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Remove a descendant with the given id, returning it
    pub(crate) fn remove_descendant(&mut self, id: &str) -> Option<Component> {
        let children = self.children.as_mut()?;
        if let Some(pos) = children.iter().position(|c| c.id == id) {
            return Some(children.remove(pos));
        }
        children.iter_mut().find_map(|child| child.remove_descendant(id))
    }

    pub(crate) fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.id);
        for child in self.children() {
            child.collect_ids(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Component {
        Component::new("hero", ComponentType::new("hero", "Hero", "sections"))
            .with_prop("title", "Ship faster")
            .with_child(Component::new("cta", ComponentType::new("button", "Button", "basic")))
    }

    #[test]
    fn test_find_nested_child() {
        let hero = hero();
        assert_eq!(hero.find("cta").map(|c| c.id.as_str()), Some("cta"));
        assert!(hero.find("missing").is_none());
    }

    #[test]
    fn test_type_field_renamed() {
        let json = serde_json::to_value(hero()).unwrap();
        assert_eq!(json["type"]["name"], "Hero");
        assert_eq!(json["props"]["title"], "Ship faster");
        assert!(json.get("constraints").is_none());
    }

    #[test]
    fn test_remove_descendant() {
        let mut hero = hero();
        let removed = hero.remove_descendant("cta").unwrap();
        assert_eq!(removed.id, "cta");
        assert!(hero.children().is_empty());
    }
}
