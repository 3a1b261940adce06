use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub muted_text_color: String,
    pub background: String,
    pub grid_line_color: String,
    /// Cell fills indexed by severity color bucket (Low..Extreme).
    pub band_colors: [String; 4],
    pub marker_fill: String,
    pub marker_stroke: String,
    pub marker_label_color: String,
}

impl Theme {
    /// Classic traffic-light palette used by most printed risk registers.
    pub fn standard() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 13.0,
            text_color: "#333333".to_string(),
            muted_text_color: "#666666".to_string(),
            background: "#FFFFFF".to_string(),
            grid_line_color: "#B8B8B8".to_string(),
            band_colors: [
                "#7BC67E".to_string(), // low
                "#FFE082".to_string(), // moderate
                "#FFB74D".to_string(), // high
                "#E57373".to_string(), // extreme
            ],
            marker_fill: "#2C3E50".to_string(),
            marker_stroke: "#FFFFFF".to_string(),
            marker_label_color: "#1C2430".to_string(),
        }
    }

    /// Desaturated palette for embedding in dashboards.
    pub fn muted() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            text_color: "#1C2430".to_string(),
            muted_text_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
            grid_line_color: "#D7E0F0".to_string(),
            band_colors: [
                "#DCEDC8".to_string(),
                "#FFF6D8".to_string(),
                "#FFE1BD".to_string(),
                "#F6C7C7".to_string(),
            ],
            marker_fill: "#44597C".to_string(),
            marker_stroke: "#FFFFFF".to_string(),
            marker_label_color: "#1C2430".to_string(),
        }
    }
}
