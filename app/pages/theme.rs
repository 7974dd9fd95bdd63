use crate::Context;
use anyhow::Result;
use hyper::{header, Body, HeaderMap, Request, Response, StatusCode};
use url::{Position, Url};

/// Toggle the theme, then send the browser back to the page it came from.
pub async fn post(context: &Context, request: Request<Body>) -> Result<Response<Body>> {
	match context.theme.toggle() {
		Ok(theme) => tracing::debug!(%theme, "toggled the theme"),
		Err(error) => tracing::warn!(%error, "failed to persist the theme"),
	}
	let location = redirect_location(request.headers());
	Ok(Response::builder()
		.status(StatusCode::SEE_OTHER)
		.header(header::LOCATION, location)
		.body(Body::empty())?)
}

/// The referring page if it belongs to this dashboard, otherwise the index.
fn redirect_location(headers: &HeaderMap) -> String {
	let referer = match headers
		.get(header::REFERER)
		.and_then(|referer| referer.to_str().ok())
	{
		Some(referer) => referer.trim(),
		None => return "/".to_owned(),
	};
	if is_local_path(referer) {
		return referer.to_owned();
	}
	let host = headers
		.get(header::HOST)
		.and_then(|host| host.to_str().ok());
	match (Url::parse(referer), host) {
		(Ok(url), Some(host)) if &url[Position::BeforeHost..Position::AfterPort] == host => {
			url[Position::BeforePath..].to_owned()
		}
		_ => "/".to_owned(),
	}
}

/// Browsers read `//` and `/\` as the start of another host.
fn is_local_path(value: &str) -> bool {
	value.starts_with('/') && !value.starts_with("//") && !value.starts_with("/\\")
}

#[cfg(test)]
mod test {
	use super::*;
	use hyper::header::HeaderValue;

	fn headers(referer: &str, host: &str) -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(header::REFERER, HeaderValue::from_str(referer).unwrap());
		headers.insert(header::HOST, HeaderValue::from_str(host).unwrap());
		headers
	}

	#[test]
	fn test_redirect_location() {
		assert_eq!(redirect_location(&HeaderMap::new()), "/");
		assert_eq!(
			redirect_location(&headers("/models/m1", "localhost:8080")),
			"/models/m1"
		);
		assert_eq!(
			redirect_location(&headers(
				"http://localhost:8080/runs/r1?model_id=m1",
				"localhost:8080"
			)),
			"/runs/r1?model_id=m1"
		);
	}

	#[test]
	fn test_foreign_referer_goes_to_index() {
		assert_eq!(
			redirect_location(&headers("https://elsewhere.example/phish", "localhost:8080")),
			"/"
		);
		assert_eq!(
			redirect_location(&headers("//elsewhere.example/phish", "localhost:8080")),
			"/"
		);
		assert_eq!(
			redirect_location(&headers("/\\elsewhere.example", "localhost:8080")),
			"/"
		);
		assert_eq!(
			redirect_location(&headers("http://localhost:9999/", "localhost:8080")),
			"/"
		);
		assert_eq!(redirect_location(&headers("", "localhost:8080")), "/");
	}
}
