use crate::common::links::model_href;
use html::{component, html, Node};
use std::collections::BTreeMap;
use traintrack_ui::{
	icons::{Icon, FOLDER},
	short_id, Callout, Level, Table, TableBody, TableCell, TableHeader, TableHeaderCell,
	TableRow,
};

pub struct Props {
	/// Models by project name.
	pub projects: BTreeMap<String, Vec<ModelRow>>,
}

pub struct ModelRow {
	pub id: String,
	pub name: String,
	pub run_count: usize,
}

pub fn render(props: Props) -> Node {
	let content = if props.projects.is_empty() {
		html! {
			<Callout level={Level::Info} title={None}>
				{"No models yet. Models appear here once a training script reports them."}
			</Callout>
		}
	} else {
		let projects = props
			.projects
			.into_iter()
			.map(|(project_name, models)| {
				html! { <ProjectSection project_name={project_name} models={models} /> }
			})
			.collect::<Vec<_>>();
		html! { <>{projects}</> }
	};
	html! {
		<>
			<div class="page-header">
				<h1>{"Models"}</h1>
			</div>
			{content}
		</>
	}
}

#[component]
fn ProjectSection(project_name: String, models: Vec<ModelRow>) {
	let rows = models
		.into_iter()
		.map(|model| {
			let id = short_id(&model.id).to_owned();
			html! {
				<TableRow>
					<TableCell>
						<a href={model_href(&model.id)}>{model.name}</a>
					</TableCell>
					<TableCell>{model.run_count.to_string()}</TableCell>
					<TableCell>
						<code>{id}</code>
					</TableCell>
				</TableRow>
			}
		})
		.collect::<Vec<_>>();
	html! {
		<section class="project">
			<h2 class="project-title">
				<Icon svg={FOLDER} />
				{project_name}
			</h2>
			<Table>
				<TableHeader>
					<TableRow>
						<TableHeaderCell text_align={None}>{"Model"}</TableHeaderCell>
						<TableHeaderCell text_align={None}>{"Runs"}</TableHeaderCell>
						<TableHeaderCell text_align={None}>{"Id"}</TableHeaderCell>
					</TableRow>
				</TableHeader>
				<TableBody>{rows}</TableBody>
			</Table>
		</section>
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_groups_by_project() {
		let mut projects = BTreeMap::new();
		projects.insert(
			"vision".to_owned(),
			vec![ModelRow {
				id: "0123456789".to_owned(),
				name: "resnet<50>".to_owned(),
				run_count: 3,
			}],
		);
		let html = render(Props { projects }).render_to_string();
		assert!(html.contains("vision"));
		assert!(html.contains(r#"<a href="/models/0123456789">resnet&lt;50&gt;</a>"#));
		assert!(html.contains("<code>01234567</code>"));
	}

	#[test]
	fn test_empty() {
		let html = render(Props {
			projects: BTreeMap::new(),
		})
		.render_to_string();
		assert!(html.contains("No models yet."));
	}
}
