use html::{component, html};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonType {
	Submit,
	Button,
	Reset,
}

#[component]
pub fn Button(
	button_type: ButtonType,
	class: Option<&'static str>,
	name: Option<&'static str>,
	value: Option<String>,
	title: Option<&'static str>,
) {
	let button_type = match button_type {
		ButtonType::Submit => "submit",
		ButtonType::Button => "button",
		ButtonType::Reset => "reset",
	};
	html! {
		<button class={class} type={button_type} name={name} value={value} title={title}>
			{children}
		</button>
	}
}

#[component]
pub fn TextField(name: String, value: String, placeholder: &'static str) {
	html! {
		<input
			class="param-input"
			type="text"
			name={name}
			value={value}
			placeholder={placeholder}
			spellcheck={false}
		/>
	}
}

#[component]
pub fn HiddenField(name: String, value: String) {
	html! {
		<input type="hidden" name={name} value={value} />
	}
}

#[component]
pub fn CheckboxField(label: &'static str, name: String, value: String, checked: bool) {
	html! {
		<label class="checkbox-field">
			<input type="checkbox" name={name} value={value} checked={checked} />
			{label}
		</label>
	}
}

#[derive(Clone, Debug)]
pub struct SelectFieldOption {
	pub text: String,
	pub value: String,
}

/// A select whose option matching `value` starts out selected.
#[component]
pub fn SelectField(name: String, options: Vec<SelectFieldOption>, value: Option<String>) {
	let options = options
		.into_iter()
		.map(|option| {
			let selected = value.as_deref() == Some(option.value.as_str());
			html! {
				<option value={option.value} selected={selected}>
					{option.text}
				</option>
			}
		})
		.collect::<Vec<_>>();
	html! {
		<select class="select-field" name={name}>
			{options}
		</select>
	}
}

#[test]
fn test_select_field_marks_selected() {
	let options = vec![
		SelectFieldOption {
			text: "Both".to_owned(),
			value: String::new(),
		},
		SelectFieldOption {
			text: "Train".to_owned(),
			value: "train".to_owned(),
		},
	];
	let node = html! {
		<SelectField name="split" options={options} value={Some("train".to_owned())} />
	};
	insta::assert_snapshot!(node.render_to_string(), @r###"<select class="select-field" name="split"><option value="">Both</option><option value="train" selected>Train</option></select>"###);
}

#[test]
fn test_checkbox_field() {
	let node = html! {
		<CheckboxField label="Show min" name="show_min" value="true" checked={true} />
	};
	insta::assert_snapshot!(node.render_to_string(), @r###"<label class="checkbox-field"><input type="checkbox" name="show_min" value="true" checked />Show min</label>"###);
}
