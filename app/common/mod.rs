pub mod chart_panel;
pub mod error;
pub mod links;
pub mod params;
