//! # 输入框标记
//!
//! 渲染 `<input>`，有附加按钮时再按模板包进 `.input-group` 容器。
//! 元素 id 同时用于标记和脚本中的选择器。

use serde::Deserialize;
use strum::{Display, EnumString};

use super::{
    dropdown::{self, MenuEntry},
    html::{self, Attributes},
    template::Template,
};

pub const CONTAINER_CLASS: &str = "input-group nex-datepicker-container date";
pub const INPUT_CLASS: &str = "form-control";

#[derive(Display, EnumString, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Lg,
    Md,
    Sm,
    Xs,
}

/// A model attribute the input is bound to, rendered as `FormName[attribute]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundModel {
    #[serde(default)]
    pub form_name: String,
    pub attribute: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl BoundModel {
    pub fn new<F: Into<String>, A: Into<String>>(form_name: F, attribute: A) -> Self {
        Self {
            form_name: form_name.into(),
            attribute: attribute.into(),
            value: None,
        }
    }

    pub fn with_value<V: Into<String>>(mut self, value: V) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn input_name(&self) -> String {
        if self.form_name.is_empty() {
            self.attribute.clone()
        } else {
            format!("{}[{}]", self.form_name, self.attribute)
        }
    }
}

/// Where the input's name and value come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Bound(BoundModel),
    Standalone { name: String, value: Option<String> },
}

impl InputSource {
    pub fn name(&self) -> String {
        match self {
            InputSource::Bound(model) => model.input_name(),
            InputSource::Standalone { name, .. } => name.clone(),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            InputSource::Bound(model) => model.value.as_deref(),
            InputSource::Standalone { value, .. } => value.as_deref(),
        }
    }

    /// Id used when the caller doesn't set one, e.g. `Event[start_at]` → `event-start_at`.
    pub fn default_id(&self) -> String {
        input_id_from_name(&self.name())
    }
}

pub fn input_id_from_name(name: &str) -> String {
    name.replace("[]", "")
        .replace("][", "-")
        .replace(['[', ' ', '.'], "-")
        .replace(']', "")
        .to_lowercase()
}

/// Appearance settings that turn into input/container attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appearance {
    pub size: Option<Size>,
    pub readonly: bool,
    pub placeholder: Option<String>,
}

/// Per-render identifiers and attributes shared by markup and script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub element_id: String,
    pub addon: Option<String>,
    pub has_dropdown: bool,
    pub container_attributes: Attributes,
    pub input_attributes: Attributes,
}

impl RenderContext {
    pub fn new(
        element_id: String,
        addon: Option<String>,
        entries: &[MenuEntry],
        appearance: &Appearance,
        mut input_attributes: Attributes,
        mut container_attributes: Attributes,
    ) -> Self {
        input_attributes.set("id", element_id.as_str());
        if let Some(size) = appearance.size {
            input_attributes.add_class(&format!("input-{size}"));
            container_attributes.add_class(&format!("input-group-{size}"));
        }
        if appearance.readonly {
            input_attributes.set("readonly", true);
        }
        if let Some(placeholder) = appearance.placeholder.as_deref().filter(|p| !p.is_empty()) {
            input_attributes.set("placeholder", placeholder);
        }
        input_attributes.add_class(INPUT_CLASS);
        container_attributes.add_class(CONTAINER_CLASS);

        let has_dropdown = addon.is_some() && entries.iter().any(MenuEntry::is_rendered);
        Self {
            element_id,
            addon,
            has_dropdown,
            container_attributes,
            input_attributes,
        }
    }

    pub fn has_addon(&self) -> bool {
        self.addon.is_some()
    }
}

/// Renders the bare `<input>` element.
pub fn render_input(source: &InputSource, ctx: &RenderContext) -> String {
    let mut attrs = ctx.input_attributes.clone();
    attrs.set("type", "text");
    attrs.set("name", source.name());
    if let Some(value) = source.value() {
        attrs.set("value", value);
    }
    html::tag("input", "", &attrs)
}

/// Renders the input, wrapped with addon and dropdown when an addon is set.
pub fn compose(
    ctx: &RenderContext,
    source: &InputSource,
    template: &Template,
    entries: &[MenuEntry],
) -> String {
    let input = render_input(source, ctx);
    let Some(addon) = &ctx.addon else {
        return input;
    };
    let dropdown = if ctx.has_dropdown {
        dropdown::render_trigger(entries).unwrap_or_default()
    } else {
        String::new()
    };
    let body = template.render(&input, addon, &dropdown);
    html::tag("div", &body, &ctx.container_attributes)
}
