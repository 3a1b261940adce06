use crate::severity::SeverityBand;

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct MatrixCellLayout {
    pub consequence: u8,
    pub likelihood: u8,
    pub band: SeverityBand,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
}

#[derive(Debug, Clone)]
pub struct MarkerLayout {
    /// Host identity token carried from the source row.
    pub id: String,
    pub label: Option<TextBlock>,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub cell: (u8, u8),
}

#[derive(Debug, Clone)]
pub struct AxisTickLayout {
    pub label: TextBlock,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct AxisTitleLayout {
    pub label: TextBlock,
    pub x: f32,
    pub y: f32,
    pub rotated: bool,
}

#[derive(Debug, Clone)]
pub struct LegendItemLayout {
    pub band: SeverityBand,
    pub label: TextBlock,
    pub swatch_x: f32,
    pub swatch_y: f32,
    pub swatch_size: f32,
    pub color: String,
    pub text_x: f32,
    pub text_y: f32,
}

#[derive(Debug, Clone)]
pub struct TitleLayout {
    pub text: TextBlock,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub grid_x: f32,
    pub grid_y: f32,
    pub grid_width: f32,
    pub grid_height: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub cells: Vec<MatrixCellLayout>,
    pub markers: Vec<MarkerLayout>,
    pub x_ticks: Vec<AxisTickLayout>,
    pub y_ticks: Vec<AxisTickLayout>,
    pub x_title: AxisTitleLayout,
    pub y_title: AxisTitleLayout,
    pub legend: Vec<LegendItemLayout>,
    pub title: Option<TitleLayout>,
}
