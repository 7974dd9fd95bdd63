pub mod builders;
pub mod chart;
pub mod components;
pub mod config;
pub mod data;
pub mod extrema;
pub mod line_chart;

pub use self::builders::{
	create_comparison_chart, create_overlay_chart, create_single_split_chart, ChartDisplay,
};
pub use self::chart::{LineChart, RedrawMode};
pub use self::config::{ChartColors, Theme};
pub use self::data::{filter_split, split_data, MetricPoint, RunSeries, Split};
pub use self::extrema::{find_min_max, min_max_series, MinMax};
