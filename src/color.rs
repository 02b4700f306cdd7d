//! Route type to display color resolution.

/// Color used for any route type without a mapping.
pub const DEFAULT_ROUTE_COLOR: &str = "orange";

/// Fixed mapping of route types to colors, with a shared default.
///
/// Lookups trim and lowercase the type, so `" Bus "` and `"bus"` resolve the
/// same. Resolution never fails and never yields an empty color.
///
/// ```
/// use map_composer::ColorPalette;
///
/// let palette = ColorPalette::default();
/// assert_eq!(palette.resolve("Bus"), "red");
/// assert_eq!(palette.resolve("ferry"), "orange");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    entries: Vec<(String, String)>,
    default_color: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(
            [("tram", "blue"), ("bus", "red"), ("walk", "green"), ("bike", "purple")],
            DEFAULT_ROUTE_COLOR,
        )
    }
}

impl ColorPalette {
    /// Build a palette. Keys are normalized; entries with a blank key or
    /// color are skipped, and a blank default falls back to
    /// [`DEFAULT_ROUTE_COLOR`].
    pub fn new<K, C>(entries: impl IntoIterator<Item = (K, C)>, default_color: &str) -> Self
    where
        K: AsRef<str>,
        C: AsRef<str>,
    {
        let mut palette = Self {
            entries: Vec::new(),
            default_color: match default_color.trim() {
                "" => DEFAULT_ROUTE_COLOR.to_string(),
                c => c.to_string(),
            },
        };
        for (key, color) in entries {
            palette.insert(key.as_ref(), color.as_ref());
        }
        palette
    }

    /// Add or replace a mapping.
    pub fn insert(&mut self, route_type: &str, color: &str) {
        let key = normalize(route_type);
        let color = color.trim();
        if key.is_empty() || color.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = color.to_string(),
            None => self.entries.push((key, color.to_string())),
        }
    }

    pub fn resolve(&self, route_type: &str) -> &str {
        let key = normalize(route_type);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| c.as_str())
            .unwrap_or(&self.default_color)
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }
}

/// Trim and lowercase a route type for lookup and display.
pub fn normalize(route_type: &str) -> String {
    route_type.trim().to_lowercase()
}
