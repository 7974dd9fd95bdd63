use crate::{
	live::{self, ChartSpec},
	Context,
};
use futures::future::join_all;
use html::{html, Node};
use std::sync::Arc;
use traintrack_charts::{
	components::{line_chart_container, ChartTitle},
	LineChart,
};
use traintrack_ui::{Callout, Level};

/// A live chart on a page. A chart whose data could not be fetched shows the error in its place, and the other charts on the page still render.
pub struct ChartPanel {
	pub title: String,
	pub result: Result<(String, LineChart), traintrack_client::Error>,
}

pub async fn load(context: &Arc<Context>, specs: Vec<ChartSpec>) -> Vec<ChartPanel> {
	join_all(specs.into_iter().map(|spec| async move {
		let title = spec.title().to_owned();
		let result = live::view(context, spec).await;
		ChartPanel { title, result }
	}))
	.await
}

impl ChartPanel {
	pub fn render(self) -> serde_json::Result<Node> {
		match self.result {
			Ok((key, chart)) => line_chart_container(
				format!("chart-{}", key),
				&chart,
				Some(format!("/api/charts/{}", key)),
			),
			Err(error) => Ok(html! {
				<div class="chart-wrapper">
					<ChartTitle>{self.title}</ChartTitle>
					<Callout level={Level::Danger} title={None}>
						{error.to_string()}
					</Callout>
				</div>
			}),
		}
	}
}

pub fn render_all(panels: Vec<ChartPanel>) -> serde_json::Result<Node> {
	let charts = panels
		.into_iter()
		.map(ChartPanel::render)
		.collect::<serde_json::Result<Vec<_>>>()?;
	Ok(html! {
		<div class="charts-grid">{charts}</div>
	})
}
