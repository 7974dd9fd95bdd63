use self::page::Props;
use crate::{
	common::{chart_panel, params},
	layouts::app_layout::AppLayout,
	live::{ChartSpec, ComparedRun},
	Context,
};
use anyhow::Result;
use html::html;
use hyper::{header, Body, Request, Response, StatusCode};
use std::{collections::BTreeMap, sync::Arc};
use traintrack_ui::{short_id, ActivePage};

mod page;

pub async fn get(context: &Arc<Context>, request: Request<Body>) -> Result<Response<Body>> {
	let query = request.uri().query();
	let search_params: params::SearchParams = query.map(|query| {
		url::form_urlencoded::parse(query.as_bytes())
			.into_owned()
			.collect::<BTreeMap<_, _>>()
	});
	let model_id = params::required(&search_params, "model_id")?.to_owned();
	let run_ids = params::run_ids(query);
	let split = params::split(&search_params)?;
	let metric = params::get(&search_params, "metric").map(str::to_owned);
	let display = params::chart_display(&search_params);
	let charts = if run_ids.is_empty() {
		None
	} else {
		let title = match &metric {
			Some(metric) => format!("{} Comparison", metric),
			None => "Loss Comparison".to_owned(),
		};
		let runs = run_ids
			.iter()
			.map(|run_id| ComparedRun {
				run_id: run_id.clone(),
				label: short_id(run_id).to_owned(),
			})
			.collect();
		let spec = ChartSpec::Comparison {
			runs,
			split,
			metric: metric.clone(),
			title,
			display,
		};
		let panels = chart_panel::load(context, vec![spec]).await;
		Some(chart_panel::render_all(panels)?)
	};
	let props = Props {
		model_id,
		run_ids,
		split,
		metric,
		display,
		charts,
	};
	let live = props.charts.is_some();
	let html = html::document(html! {
		<AppLayout context={context} title="Compare Runs" active={ActivePage::Compare} live={live}>
			{page::render(props)}
		</AppLayout>
	});
	Ok(Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(html))?)
}
