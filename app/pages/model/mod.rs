use self::page::Props;
use crate::{common::error::Error, layouts::app_layout::AppLayout, Context};
use anyhow::Result;
use html::html;
use hyper::{header, Body, Request, Response, StatusCode};
use traintrack_ui::ActivePage;

mod page;

pub async fn get(context: &Context, _request: Request<Body>, model_id: &str) -> Result<Response<Body>> {
	let (models, runs) = futures::try_join!(
		context.client.get_models(),
		context.client.get_runs_by_model(model_id),
	)?;
	let model = models
		.into_iter()
		.find(|model| model.id == model_id)
		.ok_or(Error::NotFound)?;
	let title = model.name.clone();
	let html = html::document(html! {
		<AppLayout context={context} title={title} active={ActivePage::Model} live={false}>
			{page::render(Props { model, runs })}
		</AppLayout>
	});
	Ok(Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(html))?)
}
