use crate::config::LayoutConfig;
use crate::layout::{Layout, TextBlock};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let matrix = &config.matrix;
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for cell in &layout.cells {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            cell.fill,
            theme.grid_line_color,
            matrix.cell_stroke_width
        ));
    }

    // outer frame over the cell strokes
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        layout.grid_x,
        layout.grid_y,
        layout.grid_width,
        layout.grid_height,
        theme.grid_line_color,
        matrix.grid_stroke_width
    ));

    for tick in &layout.x_ticks {
        svg.push_str(&text_block_svg(
            tick.x,
            tick.y,
            &tick.label,
            "middle",
            theme.font_size,
            &theme.muted_text_color,
            theme,
            config,
        ));
    }
    for tick in &layout.y_ticks {
        svg.push_str(&text_block_svg(
            tick.x,
            tick.y,
            &tick.label,
            "end",
            theme.font_size,
            &theme.muted_text_color,
            theme,
            config,
        ));
    }

    for axis_title in [&layout.x_title, &layout.y_title] {
        let body = text_block_svg(
            axis_title.x,
            axis_title.y,
            &axis_title.label,
            "middle",
            theme.font_size,
            &theme.text_color,
            theme,
            config,
        );
        if axis_title.rotated {
            svg.push_str(&format!(
                "<g transform=\"rotate(-90 {:.2} {:.2})\">{}</g>",
                axis_title.x, axis_title.y, body
            ));
        } else {
            svg.push_str(&body);
        }
    }

    let marker_font_size = theme.font_size * matrix.marker_label_font_scale;
    for marker in &layout.markers {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" data-risk-id=\"{}\"/>",
            marker.x,
            marker.y,
            marker.radius,
            theme.marker_fill,
            theme.marker_stroke,
            matrix.marker_stroke_width,
            escape_xml(&marker.id)
        ));
        if let Some(label) = &marker.label {
            let label_y = marker.y + marker.radius + matrix.marker_label_gap + label.height / 2.0;
            svg.push_str(&text_block_svg(
                marker.x,
                label_y,
                label,
                "middle",
                marker_font_size,
                &theme.marker_label_color,
                theme,
                config,
            ));
        }
    }

    for item in &layout.legend {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"2\" ry=\"2\" fill=\"{}\" stroke=\"{}\" stroke-width=\"0.6\"/>",
            item.swatch_x, item.swatch_y, item.swatch_size, item.swatch_size, item.color, theme.grid_line_color
        ));
        svg.push_str(&text_block_svg(
            item.text_x,
            item.text_y,
            &item.label,
            "start",
            theme.font_size,
            &theme.text_color,
            theme,
            config,
        ));
    }

    if let Some(title) = &layout.title {
        svg.push_str(&text_block_svg(
            title.x,
            title.y,
            &title.text,
            "middle",
            theme.font_size * 1.25,
            &theme.text_color,
            theme,
            config,
        ));
    }

    svg.push_str("</svg>");
    svg
}

#[allow(clippy::too_many_arguments)]
fn text_block_svg(
    x: f32,
    y: f32,
    block: &TextBlock,
    anchor: &str,
    font_size: f32,
    fill: &str,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let line_height = font_size * config.label_line_height;
    let total_height = block.lines.len() as f32 * line_height;
    // first baseline sits one font size below the block's top edge
    let start_y = y - total_height / 2.0 + font_size;
    let mut text = format!(
        "<text x=\"{x:.2}\" y=\"{start_y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{font_size}\" fill=\"{fill}\">",
        theme.font_family
    );
    for (index, line) in block.lines.iter().enumerate() {
        if index == 0 {
            text.push_str(&escape_xml(line));
        } else {
            text.push_str(&format!(
                "<tspan x=\"{x:.2}\" dy=\"{line_height:.2}\">{}</tspan>",
                escape_xml(line)
            ));
        }
    }
    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &crate::config::RenderConfig,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
