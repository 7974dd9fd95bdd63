use crate::{common::error::Error, live, Context};
use anyhow::Result;
use hyper::{header, Body, Request, Response, StatusCode};

/// The latest options of a live chart, for the renderer to poll.
pub(crate) async fn get(
	context: &Context,
	_request: Request<Body>,
	chart_key: &str,
) -> Result<Response<Body>> {
	let snapshot = match live::snapshot(context, chart_key).await {
		Some(snapshot) => snapshot,
		None => return Err(Error::NotFound.into()),
	};
	let body = serde_json::to_vec(&snapshot)?;
	Ok(Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "application/json")
		.header(header::CACHE_CONTROL, "no-store")
		.body(Body::from(body))?)
}
