//! Build modes: which optional layers a build composes.

use std::fmt;

use log::warn;

/// Fixed set of build modes.
///
/// `Base` composes no optional layer, `Routes`/`Landmarks`/`Heatmap` compose
/// exactly their own, and `Full` composes all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildMode {
    #[default]
    Base,
    Routes,
    Landmarks,
    Heatmap,
    Full,
}

impl BuildMode {
    pub const ALL: [BuildMode; 5] = [
        BuildMode::Base,
        BuildMode::Routes,
        BuildMode::Landmarks,
        BuildMode::Heatmap,
        BuildMode::Full,
    ];

    /// Strict parse of a mode name (case-insensitive, trimmed).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "base" => Some(BuildMode::Base),
            "routes" => Some(BuildMode::Routes),
            "landmarks" => Some(BuildMode::Landmarks),
            "heatmap" => Some(BuildMode::Heatmap),
            "full" => Some(BuildMode::Full),
            _ => None,
        }
    }

    /// Resolve the command line mode argument.
    ///
    /// No argument selects `Base`; an unrecognized value is coerced to
    /// `Full` rather than rejected.
    ///
    /// ```
    /// use map_composer::BuildMode;
    ///
    /// assert_eq!(BuildMode::from_arg(None), BuildMode::Base);
    /// assert_eq!(BuildMode::from_arg(Some("Routes")), BuildMode::Routes);
    /// assert_eq!(BuildMode::from_arg(Some("xyz")), BuildMode::Full);
    /// ```
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => BuildMode::Base,
            Some(value) => BuildMode::parse(value).unwrap_or_else(|| {
                warn!("[mode] unknown mode {:?}, using full", value);
                BuildMode::Full
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Base => "base",
            BuildMode::Routes => "routes",
            BuildMode::Landmarks => "landmarks",
            BuildMode::Heatmap => "heatmap",
            BuildMode::Full => "full",
        }
    }

    pub fn includes_routes(&self) -> bool {
        matches!(self, BuildMode::Routes | BuildMode::Full)
    }

    pub fn includes_landmarks(&self) -> bool {
        matches!(self, BuildMode::Landmarks | BuildMode::Full)
    }

    pub fn includes_heatmap(&self) -> bool {
        matches!(self, BuildMode::Heatmap | BuildMode::Full)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for mode in BuildMode::ALL {
            assert_eq!(BuildMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(BuildMode::parse(" HEATMAP "), Some(BuildMode::Heatmap));
        assert_eq!(BuildMode::parse("xyz"), None);
    }

    #[test]
    fn test_absent_argument_is_base() {
        assert_eq!(BuildMode::from_arg(None), BuildMode::Base);
    }

    #[test]
    fn test_unknown_argument_is_full() {
        assert_eq!(BuildMode::from_arg(Some("xyz")), BuildMode::Full);
        assert_eq!(BuildMode::from_arg(Some("")), BuildMode::Full);
    }

    #[test]
    fn test_layer_selection() {
        let base = BuildMode::Base;
        assert!(!base.includes_routes() && !base.includes_landmarks() && !base.includes_heatmap());

        assert!(BuildMode::Routes.includes_routes());
        assert!(!BuildMode::Routes.includes_landmarks());
        assert!(!BuildMode::Routes.includes_heatmap());

        assert!(BuildMode::Landmarks.includes_landmarks());
        assert!(!BuildMode::Landmarks.includes_heatmap());

        assert!(BuildMode::Heatmap.includes_heatmap());
        assert!(!BuildMode::Heatmap.includes_routes());

        let full = BuildMode::Full;
        assert!(full.includes_routes() && full.includes_landmarks() && full.includes_heatmap());
    }

    #[test]
    fn test_display() {
        assert_eq!(BuildMode::Landmarks.to_string(), "landmarks");
    }
}
