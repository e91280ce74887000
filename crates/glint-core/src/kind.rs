//! Widget kind registry.

/// The closed set of widget kinds Glint can place in a set.
///
/// The discriminant is the stable persisted tag. Tags are never reused or
/// reordered once shipped; an unrecognized tag in persisted data means the
/// widget came from a newer build and is dropped on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Current date.
    Date = 1,
    /// Network throughput.
    Network = 2,
    /// Device temperature.
    Temperature = 3,
    /// Battery wattage details.
    Battery = 4,
    /// Current time.
    Time = 5,
    /// Free-form text label.
    Text = 6,
    /// Battery charge percentage.
    CurrentCapacity = 7,
    /// Charging indicator symbol.
    ChargeSymbol = 8,
}

impl WidgetKind {
    /// Get all widget kinds.
    pub fn all() -> &'static [WidgetKind] {
        &[
            WidgetKind::Date,
            WidgetKind::Network,
            WidgetKind::Temperature,
            WidgetKind::Battery,
            WidgetKind::Time,
            WidgetKind::Text,
            WidgetKind::CurrentCapacity,
            WidgetKind::ChargeSymbol,
        ]
    }

    /// The stable tag this kind is persisted under.
    pub fn tag(self) -> i64 {
        self as i64
    }

    /// Look up a kind by its persisted tag.
    ///
    /// Returns `None` for tags no shipped kind carries.
    pub fn from_tag(tag: i64) -> Option<WidgetKind> {
        WidgetKind::all().iter().copied().find(|k| k.tag() == tag)
    }

    /// Get the display name and example preview string for this kind.
    pub fn details(self) -> (&'static str, &'static str) {
        match self {
            WidgetKind::Date => ("Date", "Mon Oct 16"),
            WidgetKind::Network => ("Network", "▲ 0 KB/s"),
            WidgetKind::Temperature => ("Device Temperature", "29.34ºC"),
            WidgetKind::Battery => ("Battery Details", "25 W"),
            WidgetKind::Time => ("Time", "14:57:05"),
            WidgetKind::Text => ("Text Label", "Example"),
            WidgetKind::CurrentCapacity => ("Battery Capacity", "50%"),
            WidgetKind::ChargeSymbol => ("Charging Symbol", "⚡"),
        }
    }

    /// Get the display name for UI.
    pub fn name(self) -> &'static str {
        self.details().0
    }

    /// Get the example preview string for UI.
    pub fn example(self) -> &'static str {
        self.details().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for &kind in WidgetKind::all() {
            assert_eq!(WidgetKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_tags_are_unique() {
        let mut tags: Vec<i64> = WidgetKind::all().iter().map(|k| k.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), WidgetKind::all().len());
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(WidgetKind::from_tag(0), None);
        assert_eq!(WidgetKind::from_tag(9), None);
        assert_eq!(WidgetKind::from_tag(-1), None);
    }

    #[test]
    fn test_details() {
        assert_eq!(WidgetKind::Date.name(), "Date");
        assert_eq!(WidgetKind::Network.example(), "▲ 0 KB/s");
        for &kind in WidgetKind::all() {
            assert!(!kind.name().is_empty());
            assert!(!kind.example().is_empty());
        }
    }
}
