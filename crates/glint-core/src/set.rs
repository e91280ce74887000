//! Widget set record types.
//!
//! These are the strongly-shaped in-memory records the codec rehydrates from
//! the persisted tree. `PlacedWidget` and `WidgetSet` carry a runtime-only
//! uuid for UI diffing; it is never persisted, so equality (the basis for
//! all manager matching) is structural and ignores it.

use crate::color;
use crate::kind::WidgetKind;
use peniko::Color;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A single widget placed inside a widget set.
#[derive(Debug, Clone)]
pub struct PlacedWidget {
    /// Runtime-only identity, regenerated on every decode.
    pub id: Uuid,
    /// What the widget displays.
    pub kind: WidgetKind,
    /// Kind-specific settings. Opaque to the core: unrecognized keys
    /// round-trip through save/load untouched.
    pub config: Map<String, Value>,
    /// Transient UI dirty flag, not persisted.
    pub modified: bool,
}

impl PlacedWidget {
    /// Create a widget with a fresh id.
    pub fn new(kind: WidgetKind, config: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            config,
            modified: false,
        }
    }
}

impl PartialEq for PlacedWidget {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.config == other.config
    }
}

/// Background blur and translucency styling for a widget set.
#[derive(Debug, Clone, PartialEq)]
pub struct BlurStyle {
    pub has_blur: bool,
    /// Persisted as an integer; held as a float for interpolation.
    pub corner_radius: f64,
    pub style_dark: bool,
    pub alpha: f64,
}

impl Default for BlurStyle {
    fn default() -> Self {
        Self {
            has_blur: false,
            corner_radius: 4.0,
            style_dark: true,
            alpha: 1.0,
        }
    }
}

/// Text color styling for a widget set.
#[derive(Debug, Clone)]
pub struct ColorStyle {
    pub uses_custom_color: bool,
    pub color: Color,
    pub dynamic_color: bool,
}

impl Default for ColorStyle {
    fn default() -> Self {
        Self {
            uses_custom_color: false,
            color: color::default_color(),
            dynamic_color: true,
        }
    }
}

impl PartialEq for ColorStyle {
    fn eq(&self, other: &Self) -> bool {
        // Colors compare at persistence granularity (RGBA8).
        let a = self.color.to_rgba8();
        let b = other.color.to_rgba8();
        self.uses_custom_color == other.uses_custom_color
            && self.dynamic_color == other.dynamic_color
            && (a.r, a.g, a.b, a.a) == (b.r, b.g, b.b, b.a)
    }
}

/// A named group of placed widgets with its layout and appearance settings.
///
/// Widget order is significant (stacking/reading order) and is preserved
/// across save/load.
#[derive(Debug, Clone)]
pub struct WidgetSet {
    /// Runtime-only identity, regenerated on every decode. Persisted sets
    /// have no stable cross-save identity.
    pub id: Uuid,
    pub title: String,

    /// Horizontal corner/edge selector.
    pub anchor: i64,
    /// Vertical selector.
    pub anchor_y: i64,
    pub offset_x: f64,
    pub offset_y: f64,

    pub auto_resizes: bool,
    pub scale: f64,
    pub scale_y: f64,

    /// Placed widgets, back to front.
    pub widgets: Vec<PlacedWidget>,

    pub blur: BlurStyle,
    pub color: ColorStyle,

    pub text_bold: bool,
    pub text_alignment: i64,
    pub font_size: f64,
    pub text_alpha: f64,
}

impl WidgetSet {
    /// Create an empty set with the default bundle.
    ///
    /// A centered anchor (`anchor == 1`) starts flush (`offset_x == 0.0`);
    /// edge anchors start inset by 10.
    pub fn new(title: impl Into<String>, anchor: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),

            anchor,
            anchor_y: 0,
            offset_x: if anchor == 1 { 0.0 } else { 10.0 },
            offset_y: 0.0,

            auto_resizes: true,
            scale: 100.0,
            scale_y: 12.0,

            widgets: Vec::new(),

            blur: BlurStyle::default(),
            color: ColorStyle::default(),

            text_bold: false,
            text_alignment: 1,
            font_size: 10.0,
            text_alpha: 1.0,
        }
    }
}

impl PartialEq for WidgetSet {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.anchor == other.anchor
            && self.anchor_y == other.anchor_y
            && self.offset_x == other.offset_x
            && self.offset_y == other.offset_y
            && self.auto_resizes == other.auto_resizes
            && self.scale == other.scale
            && self.scale_y == other.scale_y
            && self.widgets == other.widgets
            && self.blur == other.blur
            && self.color == other.color
            && self.text_bold == other.text_bold
            && self.text_alignment == other.text_alignment
            && self.font_size == other.font_size
            && self.text_alpha == other.text_alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_widget_equality_ignores_id() {
        let a = PlacedWidget::new(WidgetKind::Time, Map::new());
        let b = PlacedWidget::new(WidgetKind::Time, Map::new());
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_widget_equality_compares_config() {
        let mut config = Map::new();
        config.insert("dateFormat".to_string(), json!("EEE MMM d"));
        let a = PlacedWidget::new(WidgetKind::Date, config);
        let b = PlacedWidget::new(WidgetKind::Date, Map::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_equality_ignores_id() {
        let a = WidgetSet::new("Status", 0);
        let b = WidgetSet::new("Status", 0);
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_equality_is_structural() {
        let a = WidgetSet::new("Status", 0);
        let mut b = WidgetSet::new("Status", 0);
        b.font_size = 12.0;
        assert_ne!(a, b);
    }

    #[test]
    fn test_anchor_dependent_offset() {
        assert_eq!(WidgetSet::new("X", 1).offset_x, 0.0);
        assert_eq!(WidgetSet::new("X", 0).offset_x, 10.0);
        assert_eq!(WidgetSet::new("X", 2).offset_x, 10.0);
    }

    #[test]
    fn test_default_bundle() {
        let set = WidgetSet::new("Status", 0);
        assert!(set.auto_resizes);
        assert_eq!(set.scale, 100.0);
        assert_eq!(set.scale_y, 12.0);
        assert_eq!(set.blur, BlurStyle::default());
        assert_eq!(set.color, ColorStyle::default());
        assert_eq!(set.text_alignment, 1);
        assert_eq!(set.font_size, 10.0);
        assert!(set.widgets.is_empty());
    }
}
