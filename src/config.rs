use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackingStrategy {
    #[default]
    Grid,
    Hex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingConfig {
    pub strategy: PackingStrategy,
    /// Marker radius as a fraction of the smaller cell dimension.
    pub radius_factor: f32,
    /// Minimum legible marker radius in pixels; preferred over shrinking further.
    pub radius_floor: f32,
    /// Inner cell padding, expressed in units of the marker radius.
    pub padding_radii: f32,
    /// Extra center-to-center gap for the hex lattice, in pixels.
    pub hex_gap: f32,
    /// Candidate column counts searched above ceil(sqrt(n)).
    pub search_slack: usize,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            strategy: PackingStrategy::Grid,
            radius_factor: 0.085,
            radius_floor: 3.0,
            padding_radii: 1.5,
            hex_gap: 2.0,
            search_slack: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub axis_gap: f32,
    pub title_gap: f32,
    pub grid_stroke_width: f32,
    pub cell_stroke_width: f32,
    pub marker_stroke_width: f32,
    pub show_marker_labels: bool,
    pub marker_label_gap: f32,
    pub marker_label_font_scale: f32,
    pub show_legend: bool,
    pub legend_swatch_size: f32,
    pub legend_spacing: f32,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            padding: 16.0,
            axis_gap: 10.0,
            title_gap: 14.0,
            grid_stroke_width: 1.2,
            cell_stroke_width: 0.6,
            marker_stroke_width: 1.0,
            show_marker_labels: true,
            marker_label_gap: 4.0,
            marker_label_font_scale: 0.8,
            show_legend: true,
            legend_swatch_size: 14.0,
            legend_spacing: 6.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Column role carrying the display label.
    pub label_field: String,
    /// Column role carrying the consequence rating (ordinal or category name).
    pub consequence_field: String,
    /// Column role carrying the likelihood rating (ordinal or category name).
    pub likelihood_field: String,
    /// Optional column role carrying a host identity token per row.
    pub id_field: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            label_field: "label".to_string(),
            consequence_field: "consequence".to_string(),
            likelihood_field: "likelihood".to_string(),
            id_field: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub label_line_height: f32,
    pub max_label_width_chars: usize,
    pub matrix: MatrixConfig,
    pub packing: PackingConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            label_line_height: 1.35,
            max_label_width_chars: 18,
            matrix: MatrixConfig::default(),
            packing: PackingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub source: SourceConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::standard();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            source: SourceConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    text_color: Option<String>,
    muted_text_color: Option<String>,
    background: Option<String>,
    grid_line_color: Option<String>,
    band_colors: Option<Vec<String>>,
    marker_fill: Option<String>,
    marker_stroke: Option<String>,
    marker_label_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PackingConfigFile {
    strategy: Option<PackingStrategy>,
    radius_factor: Option<f32>,
    radius_floor: Option<f32>,
    padding_radii: Option<f32>,
    hex_gap: Option<f32>,
    search_slack: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MatrixConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    axis_gap: Option<f32>,
    title_gap: Option<f32>,
    grid_stroke_width: Option<f32>,
    cell_stroke_width: Option<f32>,
    marker_stroke_width: Option<f32>,
    show_marker_labels: Option<bool>,
    marker_label_gap: Option<f32>,
    marker_label_font_scale: Option<f32>,
    show_legend: Option<bool>,
    legend_swatch_size: Option<f32>,
    legend_spacing: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SourceConfigFile {
    label_field: Option<String>,
    consequence_field: Option<String>,
    likelihood_field: Option<String>,
    id_field: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    packing: Option<PackingConfigFile>,
    matrix: Option<MatrixConfigFile>,
    source: Option<SourceConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        // JSON5 fallback for configs carrying comments or trailing commas
        Err(_) => json5::from_str(&contents).map_err(|err| ConfigError::Parse(err.to_string()))?,
    };

    apply_config_file(&mut config, parsed);
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "muted" || theme_name == "modern" {
            config.theme = Theme::muted();
        } else if theme_name == "standard" || theme_name == "default" {
            config.theme = Theme::standard();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size.and_then(|v| v.as_f32()) {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.muted_text_color {
            config.theme.muted_text_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.render.background = v;
        }
        if let Some(v) = vars.grid_line_color {
            config.theme.grid_line_color = v;
        }
        if let Some(colors) = vars.band_colors {
            for (slot, color) in config.theme.band_colors.iter_mut().zip(colors) {
                *slot = color;
            }
        }
        if let Some(v) = vars.marker_fill {
            config.theme.marker_fill = v;
        }
        if let Some(v) = vars.marker_stroke {
            config.theme.marker_stroke = v;
        }
        if let Some(v) = vars.marker_label_color {
            config.theme.marker_label_color = v;
        }
    }

    if let Some(packing) = parsed.packing {
        let target = &mut config.layout.packing;
        if let Some(v) = packing.strategy {
            target.strategy = v;
        }
        if let Some(v) = packing.radius_factor {
            target.radius_factor = v;
        }
        if let Some(v) = packing.radius_floor {
            target.radius_floor = v;
        }
        if let Some(v) = packing.padding_radii {
            target.padding_radii = v;
        }
        if let Some(v) = packing.hex_gap {
            target.hex_gap = v;
        }
        if let Some(v) = packing.search_slack {
            target.search_slack = v;
        }
    }

    if let Some(matrix) = parsed.matrix {
        let target = &mut config.layout.matrix;
        if let Some(v) = matrix.width {
            target.width = v;
        }
        if let Some(v) = matrix.height {
            target.height = v;
        }
        if let Some(v) = matrix.padding {
            target.padding = v;
        }
        if let Some(v) = matrix.axis_gap {
            target.axis_gap = v;
        }
        if let Some(v) = matrix.title_gap {
            target.title_gap = v;
        }
        if let Some(v) = matrix.grid_stroke_width {
            target.grid_stroke_width = v;
        }
        if let Some(v) = matrix.cell_stroke_width {
            target.cell_stroke_width = v;
        }
        if let Some(v) = matrix.marker_stroke_width {
            target.marker_stroke_width = v;
        }
        if let Some(v) = matrix.show_marker_labels {
            target.show_marker_labels = v;
        }
        if let Some(v) = matrix.marker_label_gap {
            target.marker_label_gap = v;
        }
        if let Some(v) = matrix.marker_label_font_scale {
            target.marker_label_font_scale = v;
        }
        if let Some(v) = matrix.show_legend {
            target.show_legend = v;
        }
        if let Some(v) = matrix.legend_swatch_size {
            target.legend_swatch_size = v;
        }
        if let Some(v) = matrix.legend_spacing {
            target.legend_spacing = v;
        }
    }

    if let Some(source) = parsed.source {
        let target = &mut config.source;
        if let Some(v) = source.label_field {
            target.label_field = v;
        }
        if let Some(v) = source.consequence_field {
            target.consequence_field = v;
        }
        if let Some(v) = source.likelihood_field {
            target.likelihood_field = v;
        }
        if let Some(v) = source.id_field {
            target.id_field = Some(v);
        }
    }
}
