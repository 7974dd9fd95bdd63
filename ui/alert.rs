use html::{component, html};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
	Info,
	Success,
	Warning,
	Danger,
}

#[component]
pub fn Alert(level: Level, title: Option<String>) {
	let level_class = match level {
		Level::Info => "alert-level-info",
		Level::Success => "alert-level-success",
		Level::Warning => "alert-level-warning",
		Level::Danger => "alert-level-danger",
	};
	html! {
		<div class={format!("alert-wrapper {}", level_class)}>
			{title.map(|title| html! { <div class="alert-title">{title}</div> })}
			{children}
		</div>
	}
}

#[component]
pub fn Callout(level: Level, title: Option<String>) {
	let level_class = match level {
		Level::Danger => "callout-wrapper-danger",
		Level::Info => "callout-wrapper-info",
		Level::Warning => "callout-wrapper-warning",
		Level::Success => "callout-wrapper-success",
	};
	html! {
		<div class={format!("callout-wrapper {}", level_class)}>
			{title.map(|title| html! { <div class="callout-title">{title}</div> })}
			<div class="callout-inner">{children}</div>
		</div>
	}
}

#[test]
fn test_callout() {
	let node = html! {
		<Callout level={Level::Danger} title={Some("Error".to_owned())}>
			{"Failed to fetch runs: 500"}
		</Callout>
	};
	insta::assert_snapshot!(node.render_to_string(), @r###"<div class="callout-wrapper callout-wrapper-danger"><div class="callout-title">Error</div><div class="callout-inner">Failed to fetch runs: 500</div></div>"###);
}

#[test]
fn test_alert_without_title() {
	let node = html! {
		<Alert level={Level::Warning} title={None}>
			{"No runs yet."}
		</Alert>
	};
	assert_eq!(
		node.render_to_string(),
		r#"<div class="alert-wrapper alert-level-warning">No runs yet.</div>"#
	);
}
