#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod severity;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, PackingConfig, PackingStrategy, load_config};
pub use ir::{RiskItem, RiskSet};
pub use layout::{Layout, compute_layout, pack};
pub use parser::parse_risk_rows;
pub use render::render_svg;
pub use severity::{SeverityBand, severity_for, severity_table};
pub use theme::Theme;
