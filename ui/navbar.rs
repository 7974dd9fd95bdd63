use crate::icons::{Icon, CHART};
use html::{component, html};
use traintrack_charts::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivePage {
	Home,
	Model,
	Run,
	Compare,
}

/// The toggle shows the theme it switches to.
pub fn theme_toggle_icon(theme: Theme) -> &'static str {
	match theme {
		Theme::Dark => "☀️",
		Theme::Light => "🌙",
	}
}

#[component]
pub fn Navbar(active: ActivePage, theme: Theme) {
	let dashboard_class = if active == ActivePage::Home {
		Some("active")
	} else {
		None
	};
	html! {
		<nav class="navbar">
			<a class="navbar-brand" href="/">
				<Icon svg={CHART} />
				{"ML Monitor"}
			</a>
			<div class="navbar-right">
				<div class="navbar-links">
					<a href="/" class={dashboard_class}>{"Dashboard"}</a>
				</div>
				<form class="theme-toggle-form" method="post" action="/theme">
					<button class="theme-toggle" id="theme-toggle" type="submit" title="Toggle theme">
						{theme_toggle_icon(theme)}
					</button>
				</form>
			</div>
		</nav>
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn render(active: ActivePage, theme: Theme) -> String {
		html! { <Navbar active={active} theme={theme} /> }.render_to_string()
	}

	#[test]
	fn test_toggle_icon_follows_theme() {
		assert!(render(ActivePage::Home, Theme::Dark).contains("☀️"));
		assert!(render(ActivePage::Home, Theme::Light).contains("🌙"));
	}

	#[test]
	fn test_dashboard_link_active_on_home() {
		assert!(render(ActivePage::Home, Theme::Dark)
			.contains(r#"<a href="/" class="active">Dashboard</a>"#));
		assert!(render(ActivePage::Run, Theme::Dark).contains(r#"<a href="/">Dashboard</a>"#));
	}
}
