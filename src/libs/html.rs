//! # HTML 标签构建
//!
//! 属性按插入顺序输出，但 [`ATTRIBUTE_ORDER`] 中的常用属性总是排在前面，
//! 保证无论调用方以何种顺序设置，输出都稳定。

use serde::Deserialize;
use serde_json::{Map, Value};

/// Attributes rendered before all others, in this order.
pub const ATTRIBUTE_ORDER: &[&str] = &[
    "type",
    "id",
    "class",
    "name",
    "value",
    "href",
    "src",
    "form",
    "action",
    "method",
    "selected",
    "checked",
    "readonly",
    "disabled",
    "multiple",
    "size",
    "maxlength",
    "width",
    "height",
    "rows",
    "cols",
    "alt",
    "title",
    "rel",
    "media",
];

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    /// `true` renders the bare attribute name, `false` omits it
    Flag(bool),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

/// An ordered set of HTML attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in map {
            match value {
                Value::Null => {}
                Value::Bool(b) => attrs.set(name, b),
                Value::String(s) => attrs.set(name, s),
                // `class: ["a", "b"]`
                Value::Array(items) => {
                    let joined = items
                        .iter()
                        .map(|item| match item {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(" ");
                    attrs.set(name, joined)
                }
                other => attrs.set(name, other.to_string()),
            }
        }
        attrs
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, keeping its position if it already exists.
    pub fn set<N: Into<String>, V: Into<AttrValue>>(&mut self, name: N, value: V) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with<N: Into<String>, V: Into<AttrValue>>(mut self, name: N, value: V) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Returns the attribute as text, `None` for flags and missing attributes.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(AttrValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn classes(&self) -> Vec<&str> {
        self.get_str("class")
            .map(|class| class.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Appends whitespace separated CSS classes, skipping ones already present.
    pub fn add_class(&mut self, class: &str) {
        let mut classes: Vec<String> = self.classes().into_iter().map(String::from).collect();
        for token in class.split_whitespace() {
            if !classes.iter().any(|c| c == token) {
                classes.push(token.to_string());
            }
        }
        if !classes.is_empty() {
            self.set("class", classes.join(" "));
        }
    }

    /// Renders the attributes with a leading space before each one.
    pub fn render(&self) -> String {
        let prioritized = ATTRIBUTE_ORDER
            .iter()
            .filter_map(|name| self.entries.iter().find(|(n, _)| n == name));
        let rest = self
            .entries
            .iter()
            .filter(|(n, _)| !ATTRIBUTE_ORDER.contains(&n.as_str()));

        let mut out = String::new();
        for (name, value) in prioritized.chain(rest) {
            match value {
                AttrValue::Flag(false) => {}
                AttrValue::Flag(true) => {
                    out.push(' ');
                    out.push_str(name);
                }
                AttrValue::Text(text) => {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(text));
                    out.push('"');
                }
            }
        }
        out
    }
}

/// Escapes text for use in HTML content and quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders a complete element. `content` is inserted as-is.
pub fn tag(name: &str, content: &str, attrs: &Attributes) -> String {
    if VOID_ELEMENTS.contains(&name) {
        format!("<{name}{}>", attrs.render())
    } else {
        format!("<{name}{}>{content}</{name}>", attrs.render())
    }
}
