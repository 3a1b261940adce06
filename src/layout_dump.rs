use crate::layout::Layout;
use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub cells: Vec<CellDump>,
    pub markers: Vec<MarkerDump>,
}

#[derive(Debug, Serialize)]
pub struct CellDump {
    pub consequence: u8,
    pub likelihood: u8,
    pub band: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct MarkerDump {
    pub id: String,
    pub label: Option<String>,
    pub cell: [u8; 2],
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let cells = layout
            .cells
            .iter()
            .map(|cell| CellDump {
                consequence: cell.consequence,
                likelihood: cell.likelihood,
                band: cell.band.label().to_string(),
                x: cell.x,
                y: cell.y,
                width: cell.width,
                height: cell.height,
            })
            .collect();
        let markers = layout
            .markers
            .iter()
            .map(|marker| MarkerDump {
                id: marker.id.clone(),
                label: marker.label.as_ref().map(|block| block.lines.join("\n")),
                cell: [marker.cell.0, marker.cell.1],
                x: marker.x,
                y: marker.y,
                radius: marker.radius,
            })
            .collect();
        Self {
            width: layout.width,
            height: layout.height,
            cell_width: layout.cell_width,
            cell_height: layout.cell_height,
            cells,
            markers,
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
