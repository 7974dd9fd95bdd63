/*!
Live charts are charts the app keeps refreshing in the background. Every live chart has its own poll timer and request sequencer. A refresh that completes after a newer one was issued is discarded, so the stored chart always reflects the most recently issued request.
*/

use crate::Context;
use futures::future::try_join_all;
use std::sync::{Arc, Weak};
use tokio::time::Instant;
use traintrack_charts::{
	create_comparison_chart, create_overlay_chart, create_single_split_chart, ChartColors,
	ChartDisplay, LineChart, MetricPoint, RunSeries, Split,
};
use traintrack_client::{Client, Error};
use traintrack_util::{serve::hash, RequestSequencer, Ticket, TimerId};

/// What a chart shows. Equal specs share one live chart.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartSpec {
	/// Every split of a run's losses, or of one of its metrics.
	Overlay {
		run_id: String,
		metric: Option<String>,
		title: String,
		display: ChartDisplay,
	},
	/// One split of a run's losses.
	SingleSplit {
		run_id: String,
		split: Split,
		title: String,
		display: ChartDisplay,
	},
	/// The losses, or one metric, of several runs side by side.
	Comparison {
		runs: Vec<ComparedRun>,
		split: Option<Split>,
		metric: Option<String>,
		title: String,
		display: ChartDisplay,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparedRun {
	pub run_id: String,
	pub label: String,
}

pub struct LiveChart {
	spec: ChartSpec,
	chart: Option<LineChart>,
	error: Option<String>,
	sequencer: Arc<RequestSequencer>,
	timer: TimerId,
	last_viewed: Instant,
}

/// The latest state of a live chart as served to the renderer.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ChartSnapshot {
	pub title: String,
	pub chart: Option<LineChart>,
	pub error: Option<String>,
}

impl ChartSpec {
	pub fn key(&self) -> String {
		hash(&format!("{:?}", self))
	}

	pub fn title(&self) -> &str {
		match self {
			ChartSpec::Overlay { title, .. }
			| ChartSpec::SingleSplit { title, .. }
			| ChartSpec::Comparison { title, .. } => title,
		}
	}

	/// Fetch the points of every run the chart shows, in display order.
	pub async fn fetch(&self, client: &Client) -> Result<Vec<RunSeries>, Error> {
		match self {
			ChartSpec::Overlay { run_id, metric, .. } => {
				let points = fetch_points(client, run_id, metric.as_deref(), None).await?;
				Ok(vec![single_run(run_id, points)])
			}
			ChartSpec::SingleSplit { run_id, split, .. } => {
				let points = fetch_points(client, run_id, None, Some(*split)).await?;
				Ok(vec![single_run(run_id, points)])
			}
			ChartSpec::Comparison {
				runs,
				split,
				metric,
				..
			} => {
				let points = try_join_all(
					runs.iter()
						.map(|run| fetch_points(client, &run.run_id, metric.as_deref(), *split)),
				)
				.await?;
				Ok(runs
					.iter()
					.zip(points)
					.map(|(run, points)| RunSeries {
						run_id: run.run_id.clone(),
						label: run.label.clone(),
						points,
					})
					.collect())
			}
		}
	}

	pub fn build(
		&self,
		runs: &[RunSeries],
		existing: Option<LineChart>,
		colors: &ChartColors,
	) -> LineChart {
		let points = runs.first().map(|run| run.points.as_slice()).unwrap_or(&[]);
		match self {
			ChartSpec::Overlay { title, display, .. } => {
				create_overlay_chart(points, title, existing, *display, colors)
			}
			ChartSpec::SingleSplit {
				split,
				title,
				display,
				..
			} => create_single_split_chart(points, split.as_str(), title, existing, *display, colors),
			ChartSpec::Comparison {
				split,
				title,
				display,
				..
			} => create_comparison_chart(runs, *split, title, existing, *display, colors),
		}
	}
}

fn single_run(run_id: &str, points: Vec<MetricPoint>) -> RunSeries {
	RunSeries {
		run_id: run_id.to_owned(),
		label: run_id.to_owned(),
		points,
	}
}

async fn fetch_points(
	client: &Client,
	run_id: &str,
	metric: Option<&str>,
	split: Option<Split>,
) -> Result<Vec<MetricPoint>, Error> {
	let split = split.map(Split::as_str);
	let points = match metric {
		Some(metric) => client
			.get_metrics(run_id, split, Some(metric))
			.await?
			.into_iter()
			.map(MetricPoint::from)
			.collect(),
		None => client
			.get_losses(run_id, split)
			.await?
			.into_iter()
			.map(MetricPoint::from)
			.collect(),
	};
	Ok(points)
}

/// Build the chart for `spec` from freshly fetched data and keep it live. Returns the chart's key along with the chart.
pub async fn view(context: &Arc<Context>, spec: ChartSpec) -> Result<(String, LineChart), Error> {
	let key = spec.key();
	let sequencer = register(context, &key, &spec).await;
	let chart = refresh(context, &key, &spec, &sequencer).await?;
	Ok((key, chart))
}

/// The latest state of a live chart. Reading it counts as viewing it.
pub async fn snapshot(context: &Context, key: &str) -> Option<ChartSnapshot> {
	let mut live_charts = context.live_charts.lock().await;
	let live_chart = live_charts.get_mut(key)?;
	live_chart.last_viewed = Instant::now();
	Some(ChartSnapshot {
		title: live_chart.spec.title().to_owned(),
		chart: live_chart.chart.clone(),
		error: live_chart.error.clone(),
	})
}

async fn register(context: &Arc<Context>, key: &str, spec: &ChartSpec) -> Arc<RequestSequencer> {
	let mut live_charts = context.live_charts.lock().await;
	if let Some(live_chart) = live_charts.get_mut(key) {
		live_chart.last_viewed = Instant::now();
		return live_chart.sequencer.clone();
	}
	let sequencer = Arc::new(RequestSequencer::new());
	let timer = context.polling.start(poll(
		Arc::downgrade(context),
		key.to_owned(),
		spec.clone(),
		sequencer.clone(),
	));
	live_charts.insert(
		key.to_owned(),
		LiveChart {
			spec: spec.clone(),
			chart: None,
			error: None,
			sequencer: sequencer.clone(),
			timer,
			last_viewed: Instant::now(),
		},
	);
	tracing::debug!(chart = %key, title = %spec.title(), "registered live chart");
	sequencer
}

fn poll(
	context: Weak<Context>,
	key: String,
	spec: ChartSpec,
	sequencer: Arc<RequestSequencer>,
) -> impl FnMut() + Send + 'static {
	// The view that registers a chart fetches it first.
	let mut skip = true;
	move || {
		if std::mem::take(&mut skip) {
			return;
		}
		let context = match context.upgrade() {
			Some(context) => context,
			None => return,
		};
		let key = key.clone();
		let spec = spec.clone();
		let sequencer = sequencer.clone();
		tokio::spawn(async move {
			if let Err(error) = refresh(&context, &key, &spec, &sequencer).await {
				tracing::warn!(chart = %key, %error, "failed to refresh live chart");
			}
		});
	}
}

async fn refresh(
	context: &Context,
	key: &str,
	spec: &ChartSpec,
	sequencer: &RequestSequencer,
) -> Result<LineChart, Error> {
	let ticket = sequencer.issue();
	let result = spec.fetch(&context.client).await;
	apply(context, key, spec, sequencer, ticket, result).await
}

/// Build a chart from a completed fetch. It is stored only if `ticket` is still the latest ticket issued for the chart.
async fn apply(
	context: &Context,
	key: &str,
	spec: &ChartSpec,
	sequencer: &RequestSequencer,
	ticket: Ticket,
	result: Result<Vec<RunSeries>, Error>,
) -> Result<LineChart, Error> {
	let colors = context.theme.chart_colors();
	let mut live_charts = context.live_charts.lock().await;
	let live_chart = live_charts.get_mut(key);
	if !sequencer.is_latest(ticket) {
		tracing::debug!(chart = %key, "discarding a stale chart response");
		if let Some(chart) = live_chart.and_then(|live_chart| live_chart.chart.clone()) {
			return Ok(chart);
		}
		return result.map(|runs| spec.build(&runs, None, colors));
	}
	match (result, live_chart) {
		(Ok(runs), Some(live_chart)) => {
			let chart = spec.build(&runs, live_chart.chart.take(), colors);
			live_chart.chart = Some(chart.clone());
			live_chart.error = None;
			Ok(chart)
		}
		(Ok(runs), None) => Ok(spec.build(&runs, None, colors)),
		(Err(error), Some(live_chart)) => {
			live_chart.error = Some(error.to_string());
			Err(error)
		}
		(Err(error), None) => Err(error),
	}
}

/// Periodically stop the live charts nobody has viewed within the configured ttl.
pub fn start_reaper(context: &Arc<Context>) -> TimerId {
	let weak = Arc::downgrade(context);
	context.polling.start(move || {
		let context = match weak.upgrade() {
			Some(context) => context,
			None => return,
		};
		tokio::spawn(async move {
			reap(&context).await;
		});
	})
}

/// Stop expired live charts and return how many were stopped.
pub async fn reap(context: &Context) -> usize {
	let ttl = context.options.live_chart_ttl;
	let mut live_charts = context.live_charts.lock().await;
	let before = live_charts.len();
	live_charts.retain(|key, live_chart| {
		if live_chart.last_viewed.elapsed() <= ttl {
			return true;
		}
		context.polling.stop(live_chart.timer);
		tracing::debug!(chart = %key, "stopped live chart");
		false
	});
	before - live_charts.len()
}
