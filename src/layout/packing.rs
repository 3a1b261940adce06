use crate::config::{PackingConfig, PackingStrategy};

#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    pub radius: f32,
    /// One (dx, dy) per item, relative to the cell's geometric center.
    pub offsets: Vec<(f32, f32)>,
}

/// Compute marker placements for `count` items sharing one cell of
/// `cell_width` x `cell_height` pixels. Pure: identical inputs always yield
/// identical outputs, and the function never fails for count >= 0 and
/// non-negative cell dimensions. When the cell cannot physically hold the
/// bucket, placement degrades to a deterministic overlapping layout instead
/// of dropping items.
pub fn pack(
    strategy: PackingStrategy,
    count: usize,
    cell_width: f32,
    cell_height: f32,
    config: &PackingConfig,
) -> Packing {
    let radius = marker_radius(cell_width, cell_height, config);
    if count == 0 {
        return Packing {
            radius,
            offsets: Vec::new(),
        };
    }
    if cell_width <= 0.0 || cell_height <= 0.0 {
        // degenerate surface: nothing to distribute over
        return Packing {
            radius,
            offsets: vec![(0.0, 0.0); count],
        };
    }
    if count == 1 {
        return Packing {
            radius,
            offsets: vec![(0.0, 0.0)],
        };
    }

    let offsets = match strategy {
        PackingStrategy::Grid => grid_offsets(count, cell_width, cell_height, radius, config),
        PackingStrategy::Hex => hex_offsets(count, cell_width, cell_height, radius, config),
    };
    Packing { radius, offsets }
}

/// Marker radius for a cell: a fixed fraction of the smaller dimension,
/// never below the configured legibility floor.
pub fn marker_radius(cell_width: f32, cell_height: f32, config: &PackingConfig) -> f32 {
    (cell_width.min(cell_height).max(0.0) * config.radius_factor).max(config.radius_floor)
}

fn usable_span(span: f32, pad: f32) -> f32 {
    (span - 2.0 * pad).max(0.0)
}

// Center-to-center pitch when `count` positions are evenly distributed
// across `span`; a single position owns the whole span.
fn axis_pitch(span: f32, count: usize) -> f32 {
    if count <= 1 {
        span
    } else {
        span / (count - 1) as f32
    }
}

fn fit_count(span: f32, radius: f32) -> usize {
    if radius <= 0.0 {
        return 1;
    }
    (span / (2.0 * radius)).floor() as usize
}

struct GridCandidate {
    cols: usize,
    rows: usize,
    pitch_x: f32,
    pitch_y: f32,
    score: f32,
}

// Strategy A: search column counts for the arrangement maximizing the
// worst-case axis pitch, then fill it row-major.
fn grid_offsets(
    count: usize,
    cell_width: f32,
    cell_height: f32,
    radius: f32,
    config: &PackingConfig,
) -> Vec<(f32, f32)> {
    let pad = radius * config.padding_radii;
    let usable_w = usable_span(cell_width, pad);
    let usable_h = usable_span(cell_height, pad);

    let slack = (count as f32).sqrt().ceil() as usize + config.search_slack;
    let col_limit = fit_count(usable_w, radius).max(slack).min(count);
    let row_limit = fit_count(usable_h, radius).max(slack).min(count);

    let mut best: Option<GridCandidate> = None;
    for cols in 1..=col_limit {
        let rows = count.div_ceil(cols);
        if rows > row_limit {
            continue;
        }
        let pitch_x = axis_pitch(usable_w, cols);
        let pitch_y = axis_pitch(usable_h, rows);
        if pitch_x < 2.0 * radius || pitch_y < 2.0 * radius {
            continue;
        }
        let score = pitch_x.min(pitch_y);
        // strict comparison keeps the first candidate on ties
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(GridCandidate {
                cols,
                rows,
                pitch_x,
                pitch_y,
                score,
            });
        }
    }

    let Some(GridCandidate {
        cols,
        rows,
        pitch_x,
        pitch_y,
        ..
    }) = best
    else {
        // bucket exceeds the cell's capacity at the floor radius: stack in
        // one column at the minimum pitch and accept the overflow
        return (0..count)
            .map(|i| {
                let slot = i as f32 - (count as f32 - 1.0) / 2.0;
                (0.0, slot * 2.0 * radius)
            })
            .collect();
    };

    (0..count)
        .map(|i| {
            let row = i / cols;
            let col = i % cols;
            let x = if cols == 1 {
                0.0
            } else {
                col as f32 * pitch_x - usable_w / 2.0
            };
            let y = if rows == 1 {
                0.0
            } else {
                row as f32 * pitch_y - usable_h / 2.0
            };
            (x, y)
        })
        .collect()
}

// Strategy B: fixed-pitch hexagonal lattice. Capacity follows from the cell
// size alone; overflow reuses earlier positions cyclically.
fn hex_offsets(
    count: usize,
    cell_width: f32,
    cell_height: f32,
    radius: f32,
    config: &PackingConfig,
) -> Vec<(f32, f32)> {
    let pad = radius * config.padding_radii;
    let usable_w = usable_span(cell_width, pad);
    let usable_h = usable_span(cell_height, pad);

    let pitch_x = 2.0 * radius + config.hex_gap;
    let pitch_y = 3.0_f32.sqrt() * (radius + config.hex_gap / 2.0);
    let cols = lattice_count(usable_w, pitch_x).min(count);
    let rows = lattice_count(usable_h, pitch_y).min(count);
    let used = count.min(cols * rows);

    let mut lattice = Vec::with_capacity(used);
    for i in 0..used {
        let row = i / cols;
        let col = i % cols;
        let shift = if row % 2 == 1 { pitch_x / 2.0 } else { 0.0 };
        lattice.push((col as f32 * pitch_x + shift, row as f32 * pitch_y));
    }

    // recenter the occupied extent on the cell center
    let (mut min_x, mut max_x) = (f32::MAX, f32::MIN);
    let (mut min_y, mut max_y) = (f32::MAX, f32::MIN);
    for &(x, y) in &lattice {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    let center_x = (min_x + max_x) / 2.0;
    let center_y = (min_y + max_y) / 2.0;

    (0..count)
        .map(|i| {
            let (x, y) = lattice[i % used];
            (x - center_x, y - center_y)
        })
        .collect()
}

fn lattice_count(span: f32, pitch: f32) -> usize {
    if pitch <= 0.0 {
        return 1;
    }
    ((span / pitch).floor() as usize).max(1)
}
