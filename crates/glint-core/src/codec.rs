//! Conversion between the persisted tree and widget set records.
//!
//! The persisted form is a loosely-typed, version-tolerant JSON-like tree:
//! an array of set objects, each with a `widgetIDs` array, a `blurDetails`
//! object and a `colorDetails` object. Decoding is total: a missing or
//! type-mismatched field resolves to its default, and a widget entry whose
//! tag matches no shipped [`WidgetKind`] is dropped so persisted data from
//! newer builds still loads.

use crate::color;
use crate::kind::WidgetKind;
use crate::set::{BlurStyle, ColorStyle, PlacedWidget, WidgetSet};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Decode the persisted `widgetProperties` tree.
///
/// Always returns a (possibly empty) sequence, never an error.
pub fn decode_sets(tree: Option<&Value>) -> Vec<WidgetSet> {
    let entries = match tree.and_then(|t| t.as_array()) {
        Some(entries) => entries,
        None => return Vec::new(),
    };
    entries.iter().filter_map(decode_set).collect()
}

/// Encode widget sets back into the persisted tree, field for field.
pub fn encode_sets(sets: &[WidgetSet]) -> Value {
    Value::Array(sets.iter().map(encode_set).collect())
}

fn decode_set(entry: &Value) -> Option<WidgetSet> {
    // Entries that are not mappings are dropped, not defaulted.
    let s = entry.as_object()?;

    let mut widgets = Vec::new();
    if let Some(ids) = s.get("widgetIDs").and_then(|v| v.as_array()) {
        for w in ids {
            let w = match w.as_object() {
                Some(w) => w,
                None => continue,
            };
            let mut tag: i64 = 0;
            let mut config = Map::new();
            for (k, v) in w {
                if k == "widgetID" {
                    tag = v.as_i64().unwrap_or(0);
                } else {
                    config.insert(k.clone(), v.clone());
                }
            }
            match WidgetKind::from_tag(tag) {
                Some(kind) => widgets.push(PlacedWidget::new(kind, config)),
                None => log::debug!("dropping widget with unknown tag {}", tag),
            }
        }
    }

    let blur = s.get("blurDetails").and_then(|v| v.as_object());
    let blur = BlurStyle {
        has_blur: blur
            .and_then(|b| b.get("hasBlur"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        corner_radius: blur
            .and_then(|b| b.get("cornerRadius"))
            .and_then(|v| v.as_f64())
            .unwrap_or(4.0),
        style_dark: blur
            .and_then(|b| b.get("styleDark"))
            .and_then(|v| v.as_bool())
            .unwrap_or(true),
        alpha: blur
            .and_then(|b| b.get("alpha"))
            .and_then(|v| v.as_f64())
            .unwrap_or(1.0),
    };

    let color_details = s.get("colorDetails").and_then(|v| v.as_object());
    let color = ColorStyle {
        uses_custom_color: color_details
            .and_then(|c| c.get("usesCustomColor"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        color: color_details
            .and_then(|c| c.get("color"))
            .and_then(|v| v.as_str())
            .and_then(|data| BASE64.decode(data).ok())
            .and_then(|bytes| color::from_data(&bytes))
            .unwrap_or_else(color::default_color),
        dynamic_color: color_details
            .and_then(|c| c.get("dynamicColor"))
            .and_then(|v| v.as_bool())
            .unwrap_or(true),
    };

    Some(WidgetSet {
        id: Uuid::new_v4(),
        title: s
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("Untitled")
            .to_string(),

        anchor: s.get("anchor").and_then(|v| v.as_i64()).unwrap_or(0),
        anchor_y: s.get("anchorY").and_then(|v| v.as_i64()).unwrap_or(0),
        offset_x: s.get("offsetX").and_then(|v| v.as_f64()).unwrap_or(10.0),
        offset_y: s.get("offsetY").and_then(|v| v.as_f64()).unwrap_or(0.0),

        auto_resizes: s
            .get("autoResizes")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        scale: s.get("scale").and_then(|v| v.as_f64()).unwrap_or(100.0),
        scale_y: s.get("scaleY").and_then(|v| v.as_f64()).unwrap_or(12.0),

        widgets,

        blur,
        color,

        text_bold: s
            .get("textBold")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        text_alignment: s
            .get("textAlignment")
            .and_then(|v| v.as_i64())
            .unwrap_or(1),
        font_size: s.get("fontSize").and_then(|v| v.as_f64()).unwrap_or(10.0),
        text_alpha: s.get("textAlpha").and_then(|v| v.as_f64()).unwrap_or(1.0),
    })
}

fn encode_set(set: &WidgetSet) -> Value {
    let mut s = Map::new();
    s.insert("title".to_string(), Value::from(set.title.clone()));

    s.insert("anchor".to_string(), Value::from(set.anchor));
    s.insert("anchorY".to_string(), Value::from(set.anchor_y));
    s.insert("offsetX".to_string(), Value::from(set.offset_x));
    s.insert("offsetY".to_string(), Value::from(set.offset_y));

    s.insert("autoResizes".to_string(), Value::from(set.auto_resizes));
    s.insert("scale".to_string(), Value::from(set.scale));
    s.insert("scaleY".to_string(), Value::from(set.scale_y));

    let widget_ids: Vec<Value> = set
        .widgets
        .iter()
        .map(|w| {
            let mut widget = Map::new();
            widget.insert("widgetID".to_string(), Value::from(w.kind.tag()));
            for (k, v) in &w.config {
                widget.insert(k.clone(), v.clone());
            }
            Value::Object(widget)
        })
        .collect();
    s.insert("widgetIDs".to_string(), Value::Array(widget_ids));

    let mut blur = Map::new();
    blur.insert("hasBlur".to_string(), Value::from(set.blur.has_blur));
    // Persisted coarse as an integer; the runtime float is for interpolation.
    blur.insert(
        "cornerRadius".to_string(),
        Value::from(set.blur.corner_radius as i64),
    );
    blur.insert("styleDark".to_string(), Value::from(set.blur.style_dark));
    blur.insert("alpha".to_string(), Value::from(set.blur.alpha));
    s.insert("blurDetails".to_string(), Value::Object(blur));

    let mut color_details = Map::new();
    color_details.insert(
        "usesCustomColor".to_string(),
        Value::from(set.color.uses_custom_color),
    );
    // An unencodable color is omitted; decode falls back to the default.
    if let Some(data) = color::to_data(set.color.color) {
        color_details.insert("color".to_string(), Value::from(BASE64.encode(data)));
    }
    color_details.insert(
        "dynamicColor".to_string(),
        Value::from(set.color.dynamic_color),
    );
    s.insert("colorDetails".to_string(), Value::Object(color_details));

    s.insert("textBold".to_string(), Value::from(set.text_bold));
    s.insert("textAlignment".to_string(), Value::from(set.text_alignment));
    s.insert("fontSize".to_string(), Value::from(set.font_size));
    s.insert("textAlpha".to_string(), Value::from(set.text_alpha));
    Value::Object(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::Color;
    use serde_json::json;

    #[test]
    fn test_decode_absent() {
        assert!(decode_sets(None).is_empty());
        assert!(decode_sets(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_sets(Some(&json!([]))).is_empty());
    }

    #[test]
    fn test_decode_fills_defaults() {
        let sets = decode_sets(Some(&json!([{}])));
        assert_eq!(sets.len(), 1);
        let set = &sets[0];
        assert_eq!(set.title, "Untitled");
        assert_eq!(set.anchor, 0);
        assert_eq!(set.anchor_y, 0);
        assert_eq!(set.offset_x, 10.0);
        assert_eq!(set.offset_y, 0.0);
        assert!(!set.auto_resizes);
        assert_eq!(set.scale, 100.0);
        assert_eq!(set.scale_y, 12.0);
        assert!(set.widgets.is_empty());
        assert_eq!(set.blur, BlurStyle::default());
        assert_eq!(set.color, ColorStyle::default());
        assert!(!set.text_bold);
        assert_eq!(set.text_alignment, 1);
        assert_eq!(set.font_size, 10.0);
        assert_eq!(set.text_alpha, 1.0);
    }

    #[test]
    fn test_decode_type_mismatch_falls_back() {
        let sets = decode_sets(Some(&json!([{
            "title": 42,
            "anchor": "left",
            "scale": true,
            "blurDetails": {"hasBlur": "yes", "cornerRadius": 8},
        }])));
        assert_eq!(sets.len(), 1);
        let set = &sets[0];
        assert_eq!(set.title, "Untitled");
        assert_eq!(set.anchor, 0);
        assert_eq!(set.scale, 100.0);
        assert!(!set.blur.has_blur);
        assert_eq!(set.blur.corner_radius, 8.0);
    }

    #[test]
    fn test_decode_drops_unknown_kind() {
        let sets = decode_sets(Some(&json!([{
            "widgetIDs": [
                {"widgetID": 99, "future": "setting"},
                {"widgetID": 5},
            ],
        }])));
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].widgets.len(), 1);
        assert_eq!(sets[0].widgets[0].kind, WidgetKind::Time);
    }

    #[test]
    fn test_decode_drops_non_object_entries() {
        let sets = decode_sets(Some(&json!([{"title": "A"}, 7, "junk"])));
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].title, "A");
    }

    #[test]
    fn test_opaque_config_round_trip() {
        let tree = json!([{
            "widgetIDs": [
                {"widgetID": 6, "text": "hello", "weight": 2, "tint": null},
            ],
        }]);
        let sets = decode_sets(Some(&tree));
        let widget = &sets[0].widgets[0];
        assert_eq!(widget.kind, WidgetKind::Text);
        assert_eq!(widget.config.get("text"), Some(&json!("hello")));
        assert_eq!(widget.config.get("weight"), Some(&json!(2)));
        assert_eq!(widget.config.get("tint"), Some(&Value::Null));
        assert!(widget.config.get("widgetID").is_none());

        let encoded = encode_sets(&sets);
        let ids = encoded[0]["widgetIDs"].as_array().unwrap();
        assert_eq!(ids[0]["widgetID"], json!(6));
        assert_eq!(ids[0]["text"], json!("hello"));
        assert_eq!(ids[0]["weight"], json!(2));
        assert_eq!(ids[0]["tint"], Value::Null);
    }

    #[test]
    fn test_widget_order_preserved() {
        let tree = json!([{
            "widgetIDs": [{"widgetID": 5}, {"widgetID": 1}, {"widgetID": 4}],
        }]);
        let sets = decode_sets(Some(&tree));
        let kinds: Vec<WidgetKind> = sets[0].widgets.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WidgetKind::Time, WidgetKind::Date, WidgetKind::Battery]
        );

        let round = decode_sets(Some(&encode_sets(&sets)));
        assert_eq!(round, sets);
    }

    #[test]
    fn test_round_trip() {
        let mut set = WidgetSet::new("Status Bar", 2);
        set.anchor_y = 1;
        set.offset_y = -4.0;
        set.scale = 80.0;
        set.blur = BlurStyle {
            has_blur: true,
            corner_radius: 6.0,
            style_dark: false,
            alpha: 0.5,
        };
        set.color = ColorStyle {
            uses_custom_color: true,
            color: Color::from_rgba8(10, 20, 30, 255),
            dynamic_color: false,
        };
        set.text_bold = true;
        set.font_size = 14.0;
        let mut config = Map::new();
        config.insert("text".to_string(), json!("label"));
        set.widgets.push(PlacedWidget::new(WidgetKind::Text, config));
        set.widgets
            .push(PlacedWidget::new(WidgetKind::Network, Map::new()));

        let sets = vec![set, WidgetSet::new("Second", 1)];
        let decoded = decode_sets(Some(&encode_sets(&sets)));
        assert_eq!(decoded, sets);
        // Fresh runtime identity on every decode.
        assert_ne!(decoded[0].id, sets[0].id);
        assert_ne!(decoded[0].widgets[0].id, sets[0].widgets[0].id);
    }

    #[test]
    fn test_corner_radius_truncated_on_encode() {
        let mut set = WidgetSet::new("X", 0);
        set.blur.corner_radius = 6.7;
        let decoded = decode_sets(Some(&encode_sets(&[set])));
        assert_eq!(decoded[0].blur.corner_radius, 6.0);
    }

    #[test]
    fn test_color_survives_round_trip() {
        let mut set = WidgetSet::new("X", 0);
        set.color.uses_custom_color = true;
        set.color.color = Color::from_rgba8(200, 100, 50, 220);
        let decoded = decode_sets(Some(&encode_sets(&[set])));
        let rgba = decoded[0].color.color.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (200, 100, 50, 220));
    }

    #[test]
    fn test_malformed_color_falls_back() {
        let sets = decode_sets(Some(&json!([{
            "colorDetails": {"usesCustomColor": true, "color": "not base64!"},
        }])));
        assert!(sets[0].color.uses_custom_color);
        let rgba = sets[0].color.color.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 255, 255, 255));
    }
}
