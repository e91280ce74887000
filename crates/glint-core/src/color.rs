//! Color byte codec.
//!
//! Custom text colors persist as a 4-byte RGBA8 blob. Both directions are
//! fallible by contract: decode rejects malformed blobs and the caller falls
//! back to [`default_color`].

use peniko::Color;

/// The neutral color used when a set has no stored custom color.
pub fn default_color() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

/// Encode a color to its persisted byte form.
pub fn to_data(color: Color) -> Option<Vec<u8>> {
    let rgba = color.to_rgba8();
    Some(vec![rgba.r, rgba.g, rgba.b, rgba.a])
}

/// Decode a color from its persisted byte form.
///
/// Returns `None` for blobs shorter than 4 bytes; extra trailing bytes are
/// ignored.
pub fn from_data(data: &[u8]) -> Option<Color> {
    match data {
        [r, g, b, a, ..] => Some(Color::from_rgba8(*r, *g, *b, *a)),
        _ => None,
    }
}
