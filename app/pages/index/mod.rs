use self::page::{ModelRow, Props};
use crate::{layouts::app_layout::AppLayout, Context};
use anyhow::Result;
use html::html;
use futures::future::try_join_all;
use hyper::{header, Body, Request, Response, StatusCode};
use std::collections::BTreeMap;
use traintrack_ui::ActivePage;

mod page;

pub async fn get(context: &Context, _request: Request<Body>) -> Result<Response<Body>> {
	let props = props(context).await?;
	let html = html::document(html! {
		<AppLayout context={context} title={String::new()} active={ActivePage::Home} live={false}>
			{page::render(props)}
		</AppLayout>
	});
	Ok(Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(html))?)
}

async fn props(context: &Context) -> Result<Props, traintrack_client::Error> {
	let models = context.client.get_models().await?;
	let runs = try_join_all(
		models
			.iter()
			.map(|model| context.client.get_runs_by_model(&model.id)),
	)
	.await?;
	let mut projects: BTreeMap<String, Vec<ModelRow>> = BTreeMap::new();
	for (model, runs) in models.into_iter().zip(runs) {
		projects
			.entry(model.project_name)
			.or_default()
			.push(ModelRow {
				id: model.id,
				name: model.name,
				run_count: runs.len(),
			});
	}
	Ok(Props { projects })
}
