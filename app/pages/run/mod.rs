use self::page::Props;
use crate::{
	common::{chart_panel, error::Error, params},
	layouts::app_layout::AppLayout,
	live::ChartSpec,
	Context,
};
use anyhow::Result;
use html::html;
use hyper::{header, Body, Request, Response, StatusCode};
use std::{collections::BTreeSet, sync::Arc};
use traintrack_charts::Split;
use traintrack_ui::{short_id, ActivePage};

mod page;

pub async fn get(
	context: &Arc<Context>,
	_request: Request<Body>,
	run_id: &str,
	search_params: params::SearchParams,
) -> Result<Response<Body>> {
	let model_id = params::required(&search_params, "model_id")?;
	let display = params::chart_display(&search_params);
	let (runs, metrics) = futures::try_join!(
		context.client.get_runs_by_model(model_id),
		context.client.get_metrics(run_id, None, None),
	)?;
	let run = runs
		.into_iter()
		.find(|run| run.id == run_id)
		.ok_or(Error::NotFound)?;
	let metric_names: BTreeSet<String> = metrics
		.into_iter()
		.map(|metric| metric.metric_name)
		.collect();
	let mut specs = vec![
		ChartSpec::Overlay {
			run_id: run.id.clone(),
			metric: None,
			title: "Loss".to_owned(),
			display,
		},
		ChartSpec::SingleSplit {
			run_id: run.id.clone(),
			split: Split::Train,
			title: "Train Loss".to_owned(),
			display,
		},
		ChartSpec::SingleSplit {
			run_id: run.id.clone(),
			split: Split::Validation,
			title: "Validation Loss".to_owned(),
			display,
		},
	];
	specs.extend(metric_names.into_iter().map(|metric_name| ChartSpec::Overlay {
		run_id: run.id.clone(),
		title: metric_name.clone(),
		metric: Some(metric_name),
		display,
	}));
	let panels = chart_panel::load(context, specs).await;
	let title = format!("Run {}", short_id(&run.id));
	let props = Props {
		model_id: model_id.to_owned(),
		run,
		display,
		charts: chart_panel::render_all(panels)?,
	};
	let html = html::document(html! {
		<AppLayout context={context} title={title} active={ActivePage::Run} live={true}>
			{page::render(props)}
		</AppLayout>
	});
	Ok(Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(html))?)
}
