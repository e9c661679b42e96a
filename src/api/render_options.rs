use serde::{Deserialize, Serialize};

use crate::core::{GraphSize, TimeAxisTimeZone};
use crate::error::{ArtworkError, ArtworkResult};

/// Color theme the graph is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum GraphTheme {
    /// Also used for unknown theme names.
    #[default]
    Default,
    ModernDark,
    /// Unthemed output for printed reports.
    Pdf,
}

impl From<String> for GraphTheme {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl GraphTheme {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "modern-dark" => Self::ModernDark,
            "pdf" => Self::Pdf,
            _ => Self::Default,
        }
    }

    /// Colors imposed by the theme; `None` leaves the renderer's choice.
    #[must_use]
    pub fn colors(self) -> GraphColors {
        match self {
            Self::Default => GraphColors {
                background_color: None,
                foreground_color: Some("#000000".to_owned()),
                canvas_color: None,
            },
            Self::ModernDark => GraphColors {
                background_color: None,
                foreground_color: Some("#ffffff".to_owned()),
                canvas_color: None,
            },
            Self::Pdf => GraphColors {
                background_color: Some("#f8f4f0".to_owned()),
                foreground_color: Some("#000000".to_owned()),
                canvas_color: Some("#ffffff".to_owned()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphColors {
    pub background_color: Option<String>,
    pub foreground_color: Option<String>,
    pub canvas_color: Option<String>,
}

/// Width reserved for vertical axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAxisWidth {
    #[default]
    Fixed,
    /// Width in character units.
    Explicit(f64),
}

/// How the graph title is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleFormat {
    #[default]
    Plain,
    AddHostName,
    AddHostAlias,
    AddServiceDescription,
}

/// Presentation options of a graph.
///
/// Every field has a default, so a partial JSON object merges over the
/// defaults. Only `size` and `time_zone` influence the computed artwork; the
/// remaining flags are carried for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRenderOptions {
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_true")]
    pub resizable: bool,
    #[serde(default = "default_true")]
    pub show_controls: bool,
    #[serde(default = "default_true")]
    pub show_pin: bool,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    #[serde(default = "default_true")]
    pub show_graph_time: bool,
    #[serde(default = "default_true")]
    pub show_vertical_axis: bool,
    #[serde(default)]
    pub vertical_axis_width: VerticalAxisWidth,
    #[serde(default = "default_true")]
    pub show_time_axis: bool,
    #[serde(default = "default_true")]
    pub show_title: bool,
    #[serde(default)]
    pub title_format: TitleFormat,
    #[serde(default = "default_true")]
    pub show_margin: bool,
    #[serde(default)]
    pub preview: bool,
    #[serde(default = "default_true")]
    pub interaction: bool,
    #[serde(default)]
    pub editing: bool,
    #[serde(default)]
    pub fixed_timerange: bool,
    #[serde(default = "default_true")]
    pub show_time_range_previews: bool,
    /// Graph area in character units.
    #[serde(default)]
    pub size: GraphSize,
    #[serde(default)]
    pub theme: GraphTheme,
    #[serde(default)]
    pub time_zone: TimeAxisTimeZone,
}

impl Default for GraphRenderOptions {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            resizable: true,
            show_controls: true,
            show_pin: true,
            show_legend: true,
            show_graph_time: true,
            show_vertical_axis: true,
            vertical_axis_width: VerticalAxisWidth::default(),
            show_time_axis: true,
            show_title: true,
            title_format: TitleFormat::default(),
            show_margin: true,
            preview: false,
            interaction: true,
            editing: false,
            fixed_timerange: false,
            show_time_range_previews: true,
            size: GraphSize::default(),
            theme: GraphTheme::default(),
            time_zone: TimeAxisTimeZone::default(),
        }
    }
}

impl GraphRenderOptions {
    /// Parses options from JSON, filling absent fields with defaults.
    pub fn from_json_str(input: &str) -> ArtworkResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ArtworkError::InvalidData(format!("failed to parse render options json: {e}"))
        })
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = GraphSize { width, height };
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: GraphTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeAxisTimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Validated graph size.
    pub fn resolved_size(&self) -> ArtworkResult<GraphSize> {
        GraphSize::new(self.size.width, self.size.height)
    }

    /// Theme colors; users cannot override them.
    #[must_use]
    pub fn colors(&self) -> GraphColors {
        self.theme.colors()
    }
}

fn default_font_size() -> f64 {
    8.0
}

fn default_true() -> bool {
    true
}
