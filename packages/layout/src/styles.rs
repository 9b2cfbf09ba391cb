use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Viewport class the builder previews and overrides styles for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A size entered either as a bare number or as a CSS string ("100%", "2rem")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(f64),
    Text(String),
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Dimension::Number(value)
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        Dimension::Text(value.to_string())
    }
}

impl From<String> for Dimension {
    fn from(value: String) -> Self {
        Dimension::Text(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

/// Partial style groups applied on top of the base styles at one breakpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutStyles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyStyles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorStyles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectStyles>,
}

/// Full style payload of a component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleProperties {
    #[serde(default)]
    pub layout: LayoutStyles,
    #[serde(default)]
    pub typography: TypographyStyles,
    #[serde(default)]
    pub colors: ColorStyles,
    #[serde(default)]
    pub effects: EffectStyles,
    #[serde(default)]
    pub responsive: BTreeMap<Breakpoint, StyleOverrides>,
}

impl StyleProperties {
    /// Styles a freshly dropped component starts with: relative, full width,
    /// and an empty override slot for every breakpoint.
    pub fn placed(x: f64, y: f64) -> Self {
        Self {
            layout: LayoutStyles {
                position: Some("relative".to_string()),
                width: Some(Dimension::from("100%")),
                x: Some(x),
                y: Some(y),
                ..LayoutStyles::default()
            },
            responsive: Breakpoint::ALL
                .iter()
                .map(|bp| (*bp, StyleOverrides::default()))
                .collect(),
            ..Self::default()
        }
    }
}
