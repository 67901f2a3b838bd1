//! Status to bar color lookup

use std::collections::HashMap;

/// Color used for statuses the palette does not know
pub const DEFAULT_STATUS_COLOR: &str = "#1890ff";

const BUILTIN: [(&str, &str); 11] = [
    ("planning", "#faad14"),
    ("active", "#1890ff"),
    ("completed", "#52c41a"),
    ("cancelled", "#f5222d"),
    ("pending", "#d9d9d9"),
    ("in_progress", "#1890ff"),
    ("testing", "#722ed1"),
    ("rejected", "#f5222d"),
    ("todo", "#d9d9d9"),
    ("review", "#fa8c16"),
    ("done", "#52c41a"),
];

/// Fixed status → color table with a fallback
///
/// Keys are status wire strings, shared across record kinds
/// (`in_progress` means the same for requirements and tasks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPalette {
    colors: HashMap<String, String>,
    fallback: String,
}

impl StatusPalette {
    /// Palette with the built-in colors
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the color of one status
    #[inline]
    #[must_use]
    pub fn with_color(mut self, status: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(status.into(), color.into());
        self
    }

    /// Override the fallback color
    #[inline]
    #[must_use]
    pub fn with_fallback(mut self, color: impl Into<String>) -> Self {
        self.fallback = color.into();
        self
    }

    /// Color for `status`, or the fallback
    #[inline]
    #[must_use]
    pub fn color_for(&self, status: &str) -> &str {
        self.colors.get(status).map_or(self.fallback.as_str(), String::as_str)
    }

    /// Whether `status` has its own entry
    #[inline]
    #[must_use]
    pub fn knows(&self, status: &str) -> bool {
        self.colors.contains_key(status)
    }

    /// Fallback color
    #[inline]
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self {
            colors: BUILTIN
                .iter()
                .map(|(status, color)| ((*status).to_string(), (*color).to_string()))
                .collect(),
            fallback: DEFAULT_STATUS_COLOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_colors() {
        let palette = StatusPalette::new();
        assert_eq!(palette.color_for("planning"), "#faad14");
        assert_eq!(palette.color_for("testing"), "#722ed1");
        assert_eq!(palette.color_for("review"), "#fa8c16");
        assert_eq!(palette.color_for("done"), "#52c41a");
    }

    #[test]
    fn unknown_status_falls_back() {
        let palette = StatusPalette::new();
        assert!(!palette.knows("archived"));
        assert_eq!(palette.color_for("archived"), DEFAULT_STATUS_COLOR);
        assert_eq!(palette.color_for(""), DEFAULT_STATUS_COLOR);
    }

    #[test]
    fn overrides_apply() {
        let palette = StatusPalette::new()
            .with_color("done", "#000000")
            .with_color("archived", "#999999")
            .with_fallback("#ffffff");
        assert_eq!(palette.color_for("done"), "#000000");
        assert_eq!(palette.color_for("archived"), "#999999");
        assert_eq!(palette.color_for("mystery"), "#ffffff");
        assert_eq!(palette.color_for("active"), "#1890ff");
    }
}
