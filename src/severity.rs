use once_cell::sync::Lazy;
use serde::Serialize;

use crate::ir::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBand {
    Low,
    Moderate,
    High,
    Extreme,
}

impl SeverityBand {
    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::Low => "Low",
            SeverityBand::Moderate => "Moderate",
            SeverityBand::High => "High",
            SeverityBand::Extreme => "Extreme",
        }
    }

    /// Index into the theme's four band fill colors.
    pub fn color_bucket(self) -> usize {
        match self {
            SeverityBand::Low => 0,
            SeverityBand::Moderate => 1,
            SeverityBand::High => 2,
            SeverityBand::Extreme => 3,
        }
    }

    pub fn all() -> [SeverityBand; 4] {
        [
            SeverityBand::Low,
            SeverityBand::Moderate,
            SeverityBand::High,
            SeverityBand::Extreme,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityCell {
    pub consequence: u8,
    pub likelihood: u8,
    pub band: SeverityBand,
}

impl SeverityCell {
    pub fn consequence_label(&self) -> &'static str {
        Axis::Consequence.label_for(self.consequence)
    }

    pub fn likelihood_label(&self) -> &'static str {
        Axis::Likelihood.label_for(self.likelihood)
    }
}

// Band assignment per (likelihood row, consequence column), rows ordered
// Rare..Almost Certain and columns Insignificant..Catastrophic.
const BAND_ROWS: [[SeverityBand; 5]; 5] = {
    use SeverityBand::{Extreme as E, High as H, Low as L, Moderate as M};
    [
        [L, L, M, M, H], // Rare
        [L, L, M, H, H], // Unlikely
        [L, M, H, H, E], // Possible
        [M, M, H, E, E], // Likely
        [M, H, H, E, E], // Almost Certain
    ]
};

static SEVERITY_TABLE: Lazy<[SeverityCell; 25]> = Lazy::new(|| {
    let mut cells = [SeverityCell {
        consequence: 1,
        likelihood: 1,
        band: SeverityBand::Low,
    }; 25];
    for likelihood in 1..=5u8 {
        for consequence in 1..=5u8 {
            let idx = (likelihood as usize - 1) * 5 + (consequence as usize - 1);
            cells[idx] = SeverityCell {
                consequence,
                likelihood,
                band: BAND_ROWS[likelihood as usize - 1][consequence as usize - 1],
            };
        }
    }
    cells
});

/// All 25 cells of the fixed severity table, in (likelihood, consequence)
/// row-major order. The table is frozen at first use and shared.
pub fn severity_table() -> &'static [SeverityCell; 25] {
    &SEVERITY_TABLE
}

/// Band for a rating pair. Out-of-range inputs are clamped into 1..=5 so the
/// lookup is total.
pub fn severity_for(consequence: u8, likelihood: u8) -> SeverityBand {
    let consequence = consequence.clamp(1, 5) as usize;
    let likelihood = likelihood.clamp(1, 5) as usize;
    BAND_ROWS[likelihood - 1][consequence - 1]
}
