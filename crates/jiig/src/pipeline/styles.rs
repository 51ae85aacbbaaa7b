//! Style catalog and layout settings for the graph renderer.

use super::projection::{EDGE_LABEL_FAILED, EDGE_LABEL_HEALTHY, HIGHLIGHT_SUFFIX, node_label};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Fill color of healthy nodes.
pub const HEALTHY_COLOR: &str = "#28A745";

/// Fill color of failed nodes.
pub const FAILED_COLOR: &str = "#DC3545";

/// Icon used by every highlighted node.
pub const HIGHLIGHT_ICON: &str = "campaign";

/// Entity types that always get a style, whether present or not.
pub const KNOWN_TYPES: [&str; 2] = ["JOB", "PIPELINE"];

/// Renderer style for one node label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    /// Node label this style applies to
    pub label: String,
    /// Fill color
    pub color: &'static str,
    /// Data field used as caption
    pub caption: &'static str,
    /// Icon name
    pub icon: &'static str,
}

/// Renderer style for one edge label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeStyle {
    /// Edge label this style applies to
    pub label: &'static str,
    /// Data field used as caption
    pub caption: &'static str,
    /// Draw an arrow head
    pub directed: bool,
}

fn icon_for(entity_type: &str) -> &'static str {
    match entity_type {
        "JOB" => "group",
        "PIPELINE" => "person",
        _ => "circle",
    }
}

fn node_style(entity_type: &str, failed: bool, highlighted: bool) -> NodeStyle {
    NodeStyle {
        label: node_label(entity_type, failed, highlighted),
        color: if failed { FAILED_COLOR } else { HEALTHY_COLOR },
        caption: "name",
        icon: if highlighted {
            HIGHLIGHT_ICON
        } else {
            icon_for(entity_type)
        },
    }
}

/// Node styles for the known types plus every type in `present`.
///
/// Plain styles come first, then the highlight variants, each in type order
/// with `HEALTHY` before `FAILED`.
#[must_use]
pub fn node_styles<'a>(present: impl IntoIterator<Item = &'a str>) -> Vec<NodeStyle> {
    let extra: BTreeSet<&str> = present
        .into_iter()
        .filter(|t| !KNOWN_TYPES.contains(t))
        .collect();
    let types: Vec<&str> = KNOWN_TYPES.iter().copied().chain(extra).collect();

    [false, true]
        .into_iter()
        .flat_map(|highlighted| {
            types.iter().flat_map(move |t| {
                [false, true]
                    .into_iter()
                    .map(move |failed| node_style(t, failed, highlighted))
            })
        })
        .collect()
}

/// The two edge styles.
#[must_use]
pub fn edge_styles() -> Vec<EdgeStyle> {
    [EDGE_LABEL_HEALTHY, EDGE_LABEL_FAILED]
        .into_iter()
        .map(|label| EdgeStyle {
            label,
            caption: "connecting_table",
            directed: true,
        })
        .collect()
}

/// Returns `true` if `label` names a highlighted node style.
#[must_use]
pub fn is_highlight_label(label: &str) -> bool {
    label.ends_with(HIGHLIGHT_SUFFIX)
}

/// Graph layout algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Rings by degree
    #[default]
    Concentric,
    /// Force-directed
    Cose,
    /// Levels from the roots
    Breadthfirst,
    /// Single ring
    Circle,
    /// Rows and columns
    Grid,
}

impl Layout {
    /// Every layout, default first.
    pub const LAYOUTS: [Self; 5] = [
        Self::Concentric,
        Self::Cose,
        Self::Breadthfirst,
        Self::Circle,
        Self::Grid,
    ];

    /// Renderer name of the layout.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concentric => "concentric",
            Self::Cose => "cose",
            Self::Breadthfirst => "breadthfirst",
            Self::Circle => "circle",
            Self::Grid => "grid",
        }
    }

    /// Renderer settings for this layout.
    #[must_use]
    pub fn config(self) -> LayoutConfig {
        LayoutConfig {
            name: self,
            animate: true,
            fit: true,
            padding: 80,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::LAYOUTS
            .into_iter()
            .find(|layout| layout.as_str() == name)
            .ok_or_else(|| {
                format!("unknown layout '{s}' (expected concentric, cose, breadthfirst, circle or grid)")
            })
    }
}

/// Layout block sent to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutConfig {
    /// Layout algorithm
    pub name: Layout,
    /// Animate node placement
    pub animate: bool,
    /// Zoom to fit the viewport
    pub fit: bool,
    /// Viewport padding in pixels
    pub padding: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Layout::default().config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn known_types_always_styled() {
        let styles = node_styles([]);
        let labels: Vec<&str> = styles.iter().map(|s| s.label.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "JOB_HEALTHY",
                "JOB_FAILED",
                "PIPELINE_HEALTHY",
                "PIPELINE_FAILED",
                "JOB_HEALTHY_HIGHLIGHT",
                "JOB_FAILED_HIGHLIGHT",
                "PIPELINE_HEALTHY_HIGHLIGHT",
                "PIPELINE_FAILED_HIGHLIGHT",
            ]
        );
    }

    #[test]
    fn extra_types_use_circle() {
        let styles = node_styles(["UNKNOWN", "JOB"]);
        assert_eq!(styles.len(), 12);

        let unknown = styles.iter().find(|s| s.label == "UNKNOWN_FAILED").unwrap();
        assert_eq!(unknown.icon, "circle");
        assert_eq!(unknown.color, FAILED_COLOR);
    }

    #[rstest]
    #[case("JOB_HEALTHY", "group", HEALTHY_COLOR)]
    #[case("PIPELINE_FAILED", "person", FAILED_COLOR)]
    #[case("JOB_FAILED_HIGHLIGHT", "campaign", FAILED_COLOR)]
    fn style_icons_and_colors(#[case] label: &str, #[case] icon: &str, #[case] color: &str) {
        let styles = node_styles([]);
        let style = styles.iter().find(|s| s.label == label).unwrap();
        assert_eq!(style.icon, icon);
        assert_eq!(style.color, color);
        assert_eq!(style.caption, "name");
        assert_eq!(is_highlight_label(label), icon == HIGHLIGHT_ICON);
    }

    #[test]
    fn edge_styles_are_directed() {
        let styles = edge_styles();
        assert_eq!(styles.len(), 2);
        assert!(styles.iter().all(|s| s.directed && s.caption == "connecting_table"));
    }

    #[rstest]
    #[case("concentric", Layout::Concentric)]
    #[case("COSE", Layout::Cose)]
    #[case(" grid", Layout::Grid)]
    fn parses_layouts(#[case] name: &str, #[case] expected: Layout) {
        assert_eq!(name.parse::<Layout>().unwrap(), expected);
    }

    #[test]
    fn unknown_layout_is_rejected() {
        assert!("spiral".parse::<Layout>().is_err());
    }

    #[test]
    fn default_layout_config() {
        let json = serde_json::to_value(LayoutConfig::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "concentric", "animate": true, "fit": true, "padding": 80})
        );
    }
}
