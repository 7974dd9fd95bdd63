use html::{component, html};
use std::time::Duration;
use traintrack_charts::Theme;

pub struct PageInfo {
	pub title: String,
	pub theme: Theme,
	/// Reload the page after this long. Pages with live charts set it to the poll interval.
	pub refresh: Option<Duration>,
}

#[component]
pub fn Document(page_info: PageInfo) {
	let refresh = page_info.refresh.map(|refresh| {
		let seconds = (refresh.as_millis() as f64 / 1000.0).ceil().max(1.0) as u64;
		html! { <meta http-equiv="refresh" content={seconds.to_string()} /> }
	});
	let title = if page_info.title.is_empty() {
		"ML Monitor".to_owned()
	} else {
		format!("{} | ML Monitor", page_info.title)
	};
	html! {
		<html lang="en" data-theme={page_info.theme.as_str()}>
			<head>
				<meta charset="utf-8" />
				<meta content="width=device-width, initial-scale=1" name="viewport" />
				{refresh}
				<title>{title}</title>
				<link href="/styles.css" rel="stylesheet" />
			</head>
			<body>
				{children}
			</body>
		</html>
	}
}

#[test]
fn test_document() {
	let page_info = PageInfo {
		title: "Run a1b2c3d4".to_owned(),
		theme: Theme::Light,
		refresh: Some(Duration::from_millis(2500)),
	};
	let html = html::document(html! {
		<Document page_info={page_info}>{"content"}</Document>
	});
	assert!(html.starts_with("<!doctype html><html lang=\"en\" data-theme=\"light\">"));
	assert!(html.contains(r#"<meta http-equiv="refresh" content="3" />"#));
	assert!(html.contains("<title>Run a1b2c3d4 | ML Monitor</title>"));
	assert!(html.ends_with("<body>content</body></html>"));
}
