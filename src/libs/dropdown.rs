//! # 快捷选择下拉菜单
//!
//! 带 `value` 的条目渲染为链接，值放在 `data-value` 属性中，
//! [`super::script`] 生成的点击处理器会把它写入输入框。
//!
//! - 没有 `value` 的条目保持普通链接
//! - 没有 `url` 的条目渲染为标题
//! - 字符串 `"-"` 渲染为分隔线

use serde::Deserialize;
use serde_json::Value;

use super::html::{self, Attributes};

/// Link attribute the target value is stored under.
pub const VALUE_ATTRIBUTE: &str = "data-value";

const DIVIDER: &str = "-";

fn default_true() -> bool {
    true
}

/// A dropdown item as written in the widget configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDropdownItem {
    /// `"-"` for a divider, any other string is inserted as raw markup
    Markup(String),
    Entry(RawDropdownEntry),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDropdownEntry {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub encode: bool,
    #[serde(default)]
    pub link_options: Attributes,
    #[serde(default)]
    pub options: Attributes,
}

impl RawDropdownEntry {
    pub fn new<L: Into<String>>(label: L) -> Self {
        Self {
            label: Some(label.into()),
            url: None,
            value: None,
            visible: true,
            encode: true,
            link_options: Attributes::new(),
            options: Attributes::new(),
        }
    }

    pub fn url<U: Into<String>>(mut self, url: U) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn value<V: Into<String>>(mut self, value: V) -> Self {
        self.value = Some(Value::String(value.into()));
        self
    }
}

impl From<RawDropdownEntry> for RawDropdownItem {
    fn from(entry: RawDropdownEntry) -> Self {
        RawDropdownItem::Entry(entry)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownItem {
    pub label: String,
    pub target_value: Option<String>,
    pub url: Option<String>,
    pub link_attributes: Attributes,
    pub item_attributes: Attributes,
    pub encode_label: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Item(DropdownItem),
    Divider,
    Markup(String),
}

impl MenuEntry {
    pub fn as_item(&self) -> Option<&DropdownItem> {
        match self {
            MenuEntry::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Hidden items are dropped from the menu; everything else renders.
    pub fn is_rendered(&self) -> bool {
        match self {
            MenuEntry::Item(item) => item.visible,
            MenuEntry::Divider | MenuEntry::Markup(_) => true,
        }
    }
}

fn target_value(value: &Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Turns configured items into menu entries, keeping their order.
pub fn build(raw_items: &[RawDropdownItem]) -> Vec<MenuEntry> {
    raw_items
        .iter()
        .map(|raw| match raw {
            RawDropdownItem::Markup(markup) if markup == DIVIDER => MenuEntry::Divider,
            RawDropdownItem::Markup(markup) => MenuEntry::Markup(markup.clone()),
            RawDropdownItem::Entry(entry) => {
                let mut link_attributes = entry.link_options.clone();
                let mut item_attributes = entry.options.clone();
                item_attributes.remove("value");
                let target_value = target_value(&entry.value);
                if let Some(value) = &target_value {
                    link_attributes.set(VALUE_ATTRIBUTE, value.as_str());
                }
                MenuEntry::Item(DropdownItem {
                    label: entry.label.clone().unwrap_or_default(),
                    target_value,
                    url: entry.url.clone(),
                    link_attributes,
                    item_attributes,
                    encode_label: entry.encode,
                    visible: entry.visible,
                })
            }
        })
        .collect()
}

fn render_entry(entry: &MenuEntry) -> Option<String> {
    match entry {
        MenuEntry::Divider => Some(html::tag(
            "li",
            "",
            &Attributes::new()
                .with("class", "divider")
                .with("role", "separator"),
        )),
        MenuEntry::Markup(markup) => Some(markup.clone()),
        MenuEntry::Item(item) if !item.visible => None,
        MenuEntry::Item(item) => {
            let label = if item.encode_label {
                html::escape(&item.label)
            } else {
                item.label.clone()
            };
            let mut li = item.item_attributes.clone();
            let content = match &item.url {
                Some(url) => {
                    let mut link = item.link_attributes.clone();
                    link.set("href", url.as_str());
                    link.set("tabindex", "-1");
                    html::tag("a", &label, &link)
                }
                None => {
                    li.add_class("dropdown-header");
                    label
                }
            };
            Some(html::tag("li", &content, &li))
        }
    }
}

/// Renders the `<ul class="dropdown-menu">` list.
pub fn render_menu(entries: &[MenuEntry]) -> String {
    let lines: Vec<String> = entries.iter().filter_map(render_entry).collect();
    let body = if lines.is_empty() {
        String::new()
    } else {
        format!("\n{}\n", lines.join("\n"))
    };
    html::tag("ul", &body, &Attributes::new().with("class", "dropdown-menu"))
}

/// Renders the toggle button plus menu, or nothing when no entry would render.
pub fn render_trigger(entries: &[MenuEntry]) -> Option<String> {
    if !entries.iter().any(MenuEntry::is_rendered) {
        return None;
    }
    let button = html::tag(
        "button",
        r#"<span class="caret"></span>"#,
        &Attributes::new()
            .with("type", "button")
            .with("class", "btn btn-default dropdown-toggle")
            .with("data-toggle", "dropdown"),
    );
    let body = format!("\n{}\n{}\n", button, render_menu(entries));
    Some(html::tag(
        "div",
        &body,
        &Attributes::new().with("class", "input-group-btn"),
    ))
}
