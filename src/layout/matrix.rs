use crate::config::LayoutConfig;
use crate::ir::{Axis, RiskSet};
use crate::severity::{SeverityBand, severity_for};
use crate::theme::Theme;

use super::group::group_by_cell;
use super::packing::pack;
use super::text::measure_label;
use super::{
    AxisTickLayout, AxisTitleLayout, Layout, LegendItemLayout, MarkerLayout, MatrixCellLayout,
    TextBlock, TitleLayout,
};

pub(super) fn compute_matrix_layout(set: &RiskSet, theme: &Theme, config: &LayoutConfig) -> Layout {
    let matrix = &config.matrix;
    let padding = matrix.padding;

    let title = set.title.as_ref().map(|text| {
        measure_label(text, theme.font_size * 1.25, theme, config, false)
    });
    let x_tick_blocks: Vec<TextBlock> = Axis::Consequence
        .labels()
        .iter()
        .map(|label| measure_label(label, theme.font_size, theme, config, false))
        .collect();
    let y_tick_blocks: Vec<TextBlock> = Axis::Likelihood
        .labels()
        .iter()
        .map(|label| measure_label(label, theme.font_size, theme, config, false))
        .collect();
    let x_title_block =
        measure_label("Consequence", theme.font_size, theme, config, false);
    let y_title_block =
        measure_label("Likelihood", theme.font_size, theme, config, false);

    let legend_blocks: Vec<(SeverityBand, TextBlock)> = if matrix.show_legend {
        SeverityBand::all()
            .into_iter()
            .map(|band| {
                let block =
                    measure_label(band.label(), theme.font_size, theme, config, false);
                (band, block)
            })
            .collect()
    } else {
        Vec::new()
    };

    let y_tick_width = y_tick_blocks.iter().map(|b| b.width).fold(0.0, f32::max);
    let x_tick_height = x_tick_blocks.iter().map(|b| b.height).fold(0.0, f32::max);
    let legend_width = legend_blocks
        .iter()
        .map(|(_, block)| block.width)
        .fold(0.0, f32::max)
        + matrix.legend_swatch_size
        + matrix.legend_spacing;

    // the y-axis title is rotated, so its footprint on the left is its height
    let left = padding + y_title_block.height + matrix.axis_gap + y_tick_width + matrix.axis_gap;
    let bottom = matrix.axis_gap + x_tick_height + matrix.axis_gap + x_title_block.height + padding;
    let top = padding
        + title
            .as_ref()
            .map(|t| t.height + matrix.title_gap)
            .unwrap_or(0.0);
    let right = padding
        + if legend_blocks.is_empty() {
            0.0
        } else {
            matrix.axis_gap + legend_width
        };

    let grid_x = left;
    let grid_y = top;
    let grid_width = (matrix.width - left - right).max(0.0);
    let grid_height = (matrix.height - top - bottom).max(0.0);
    let cell_width = grid_width / 5.0;
    let cell_height = grid_height / 5.0;

    // likelihood 1 occupies the bottom row, consequence 1 the left column
    let mut cells = Vec::with_capacity(25);
    for likelihood in 1..=5u8 {
        for consequence in 1..=5u8 {
            let band = severity_for(consequence, likelihood);
            cells.push(MatrixCellLayout {
                consequence,
                likelihood,
                band,
                x: grid_x + (consequence as f32 - 1.0) * cell_width,
                y: grid_y + (5 - likelihood) as f32 * cell_height,
                width: cell_width,
                height: cell_height,
                fill: theme.band_colors[band.color_bucket()].clone(),
            });
        }
    }

    let marker_font_size = theme.font_size * matrix.marker_label_font_scale;
    let mut markers = Vec::with_capacity(set.items.len());
    for ((consequence, likelihood), bucket) in group_by_cell(&set.items) {
        let packing = pack(
            config.packing.strategy,
            bucket.len(),
            cell_width,
            cell_height,
            &config.packing,
        );
        let anchor_x = grid_x + (consequence as f32 - 0.5) * cell_width;
        let anchor_y = grid_y + (5 - likelihood) as f32 * cell_height + cell_height / 2.0;
        for (slot, item_index) in bucket.into_iter().enumerate() {
            let item = &set.items[item_index];
            let (dx, dy) = packing.offsets[slot];
            let label = if matrix.show_marker_labels && !item.label.is_empty() {
                Some(measure_label(
                    &item.label,
                    marker_font_size,
                    theme,
                    config,
                    true,
                ))
            } else {
                None
            };
            markers.push(MarkerLayout {
                id: item.id.clone(),
                label,
                x: anchor_x + dx,
                y: anchor_y + dy,
                radius: packing.radius,
                cell: (consequence, likelihood),
            });
        }
    }

    let x_ticks = x_tick_blocks
        .into_iter()
        .enumerate()
        .map(|(index, label)| {
            let y = grid_y + grid_height + matrix.axis_gap + label.height / 2.0;
            AxisTickLayout {
                x: grid_x + (index as f32 + 0.5) * cell_width,
                y,
                label,
            }
        })
        .collect();
    let y_ticks = y_tick_blocks
        .into_iter()
        .enumerate()
        .map(|(index, label)| AxisTickLayout {
            x: grid_x - matrix.axis_gap,
            y: grid_y + (4 - index) as f32 * cell_height + cell_height / 2.0,
            label,
        })
        .collect();

    let x_title = AxisTitleLayout {
        x: grid_x + grid_width / 2.0,
        y: matrix.height - padding - x_title_block.height / 2.0,
        label: x_title_block,
        rotated: false,
    };
    let y_title = AxisTitleLayout {
        x: padding + y_title_block.height / 2.0,
        y: grid_y + grid_height / 2.0,
        label: y_title_block,
        rotated: true,
    };

    let legend_row_height = matrix.legend_swatch_size + matrix.legend_spacing;
    let legend = legend_blocks
        .into_iter()
        .enumerate()
        .map(|(index, (band, label))| {
            let swatch_x = grid_x + grid_width + matrix.axis_gap;
            let swatch_y = grid_y + index as f32 * legend_row_height;
            LegendItemLayout {
                band,
                swatch_x,
                swatch_y,
                swatch_size: matrix.legend_swatch_size,
                color: theme.band_colors[band.color_bucket()].clone(),
                text_x: swatch_x + matrix.legend_swatch_size + matrix.legend_spacing,
                text_y: swatch_y + matrix.legend_swatch_size / 2.0,
                label,
            }
        })
        .collect();

    let title = title.map(|text| TitleLayout {
        x: grid_x + grid_width / 2.0,
        y: padding + text.height / 2.0,
        text,
    });

    Layout {
        width: matrix.width,
        height: matrix.height,
        grid_x,
        grid_y,
        grid_width,
        grid_height,
        cell_width,
        cell_height,
        cells,
        markers,
        x_ticks,
        y_ticks,
        x_title,
        y_title,
        legend,
        title,
    }
}
