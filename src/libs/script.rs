//! # 客户端绑定脚本
//!
//! ```text
//! jQuery('#id')[.parent()].datetimepicker({...});          总是生成
//! ....find('.dropdown-menu a').on('click', ...);           渲染了下拉菜单时
//! ....on('dp.change', handler);                            每个客户端事件一条
//! ```

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{dropdown::VALUE_ATTRIBUTE, markup::RenderContext, options::EffectiveConfig};

/// A JavaScript expression emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct JsExpression(String);

impl JsExpression {
    pub fn new<S: Into<String>>(expression: S) -> Self {
        Self(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JsExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientEvent {
    pub name: String,
    pub handler: JsExpression,
}

/// Event handlers in the order they were configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ClientEvents(Vec<ClientEvent>);

impl TryFrom<Map<String, Value>> for ClientEvents {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        map.into_iter()
            .map(|(name, handler)| match handler {
                Value::String(handler) => Ok(ClientEvent {
                    name,
                    handler: JsExpression(handler),
                }),
                other => Err(format!("handler for `{name}` must be a string, got {other}")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ClientEvents)
    }
}

impl ClientEvents {
    pub fn push<N: Into<String>, H: Into<String>>(&mut self, name: N, handler: H) {
        self.0.push(ClientEvent {
            name: name.into(),
            handler: JsExpression::new(handler),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientEvent> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Quotes `s` as a single-quoted JavaScript string.
fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn element_selector(id: &str) -> String {
    format!("jQuery({})", js_string(&format!("#{id}")))
}

/// The element the picker attaches to: the container when one was rendered.
pub fn target_selector(ctx: &RenderContext) -> String {
    let selector = element_selector(&ctx.element_id);
    if ctx.has_addon() {
        format!("{selector}.parent()")
    } else {
        selector
    }
}

fn serialize_options(config: &EffectiveConfig) -> String {
    if config.is_empty() {
        return String::new();
    }
    // keep `</script>` inside string values from closing the script element
    config.to_json().replace("</", "<\\/")
}

pub fn emit(config: &EffectiveConfig, ctx: &RenderContext, events: &ClientEvents) -> Vec<String> {
    let target = target_selector(ctx);
    let mut statements = vec![format!(
        "{target}.datetimepicker({});",
        serialize_options(config)
    )];

    if ctx.has_dropdown {
        statements.push(format!(
            "{target}.find('.dropdown-menu a').on('click', function (e) {{ e.preventDefault(); {}.val(jQuery(this).attr('{VALUE_ATTRIBUTE}')); }});",
            element_selector(&ctx.element_id)
        ));
    }

    for event in events.iter() {
        statements.push(format!(
            "{target}.on({}, {});",
            js_string(&event.name),
            event.handler
        ));
    }
    statements
}

/// Wraps statements in a document-ready `<script>` element.
pub fn script_block(statements: &[String]) -> String {
    format!(
        "<script>jQuery(function ($) {{\n{}\n}});</script>",
        statements.join("\n")
    )
}
