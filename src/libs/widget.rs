//! # 日期选择器组件
//!
//! 输入组件配置，输出标记和脚本。
//!
//! ```text
//! DatePicker ──merge──> EffectiveConfig ─────────────┐
//!     │                                              ├──> 脚本语句
//!     └──build──> 菜单条目 ──> RenderContext ─────────┤
//!                                                    └──> 标记
//! ```
//!
//! 组件定义通常从 JSON/YAML 反序列化：
//!
//! ```json
//! {
//!   "name": "due",
//!   "language": "ru",
//!   "size": "sm",
//!   "dropdownItems": [{ "label": "Today", "url": "#", "value": "2024-05-01" }],
//!   "clientOptions": { "format": "YYYY-MM-DD" },
//!   "clientEvents": { "dp.change": "function (e) { console.log(e.date); }" }
//! }
//! ```

use std::{fmt, sync::Arc};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{
    dropdown::{self, RawDropdownItem},
    error::WidgetError,
    html::Attributes,
    markup::{self, Appearance, BoundModel, InputSource, RenderContext, Size},
    options::{self, DerivedOptions, EffectiveConfig, OptionMap},
    script::{self, ClientEvents},
    template::Template,
    translations::TranslationRegistry,
};

pub const DEFAULT_ADDON: &str = r#"<span class="input-group-addon" style="border-left: none;"><i class="glyphicon glyphicon-calendar"></i></span>"#;

#[derive(Deserialize)]
#[serde(untagged)]
enum AddonSetting {
    Enabled(bool),
    Markup(String),
}

/// `null`/`false` disable the addon, `true` keeps the default one.
fn deserialize_addon<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<AddonSetting>::deserialize(deserializer)? {
        None | Some(AddonSetting::Enabled(false)) => None,
        Some(AddonSetting::Enabled(true)) => Some(DEFAULT_ADDON.to_string()),
        Some(AddonSetting::Markup(markup)) if markup.is_empty() => None,
        Some(AddonSetting::Markup(markup)) => Some(markup),
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatePicker {
    /// Overrides the id derived from `name`/`model`
    pub id: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
    /// Takes precedence over `name`/`value`
    pub model: Option<BoundModel>,

    #[serde(deserialize_with = "deserialize_addon")]
    pub addon: Option<String>,
    /// Ignored unless `addon` is set
    pub dropdown_items: Vec<RawDropdownItem>,
    pub template: Template,

    pub readonly: bool,
    pub language: Option<String>,
    pub size: Option<Size>,
    pub placeholder: Option<String>,

    pub client_options: OptionMap,
    pub default_client_options: OptionMap,
    pub client_events: ClientEvents,

    /// Input attributes
    pub options: Attributes,
    pub container_options: Attributes,
}

impl Default for DatePicker {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            value: None,
            model: None,
            addon: Some(DEFAULT_ADDON.to_string()),
            dropdown_items: Vec::new(),
            template: Template::default(),
            readonly: false,
            language: None,
            size: None,
            placeholder: None,
            client_options: OptionMap::new(),
            default_client_options: options::default_client_options(),
            client_events: ClientEvents::default(),
            options: Attributes::new(),
            container_options: Attributes::new(),
        }
    }
}

impl DatePicker {
    pub fn standalone<N: Into<String>>(name: N) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn bound(model: BoundModel) -> Self {
        Self {
            model: Some(model),
            ..Self::default()
        }
    }

    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn value<S: Into<String>>(mut self, value: S) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn addon(mut self, addon: Option<&str>) -> Self {
        self.addon = addon.map(String::from);
        self
    }

    pub fn dropdown_item<I: Into<RawDropdownItem>>(mut self, item: I) -> Self {
        self.dropdown_items.push(item.into());
        self
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn placeholder<S: Into<String>>(mut self, placeholder: S) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn client_option<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.client_options.insert(key.into(), value.into());
        self
    }

    pub fn on<N: Into<String>, H: Into<String>>(mut self, event: N, handler: H) -> Self {
        self.client_events.push(event, handler);
        self
    }

    pub fn input_source(&self) -> Result<InputSource, WidgetError> {
        match (&self.model, &self.name) {
            (Some(model), _) if model.attribute.is_empty() => Err(WidgetError::MissingInputSource),
            (Some(model), _) => Ok(InputSource::Bound(model.clone())),
            (None, Some(name)) if name.is_empty() => Err(WidgetError::MissingInputSource),
            (None, Some(name)) => Ok(InputSource::Standalone {
                name: name.clone(),
                value: self.value.clone(),
            }),
            (None, None) => Err(WidgetError::MissingInputSource),
        }
    }

    /// `id`, then `options.id`, then the id derived from the input name.
    fn element_id(&self, source: &InputSource) -> Result<String, WidgetError> {
        let explicit = self
            .id
            .as_deref()
            .or_else(|| self.options.get_str("id"))
            .filter(|id| !id.is_empty());
        let id = match explicit {
            Some(id) => id.to_string(),
            None => source.default_id(),
        };
        if id.is_empty() {
            return Err(WidgetError::EmptyElementId {
                name: source.name(),
            });
        }
        Ok(id)
    }

    /// Merges the client options with defaults and the derived settings.
    pub fn effective_config(&self, env: &RenderEnv) -> EffectiveConfig {
        let tooltip_locale = self.language.as_deref().or(env.language.as_deref());
        let derived = DerivedOptions {
            locale: self.language.clone(),
            ignore_readonly: self.readonly,
            tooltips: Some(env.registry.tooltips(tooltip_locale)),
        };
        options::merge(&self.default_client_options, &self.client_options, &derived)
    }

    pub fn render(&self, env: &RenderEnv) -> Result<RenderedWidget, WidgetError> {
        let source = self.input_source()?;
        let element_id = self.element_id(&source)?;
        let config = self.effective_config(env);
        let entries = dropdown::build(&self.dropdown_items);

        let appearance = Appearance {
            size: self.size,
            readonly: self.readonly,
            placeholder: self.placeholder.clone(),
        };
        let ctx = RenderContext::new(
            element_id,
            self.addon.clone(),
            &entries,
            &appearance,
            self.options.clone(),
            self.container_options.clone(),
        );

        let html = markup::compose(&ctx, &source, &self.template, &entries);
        let script = script::emit(&config, &ctx, &self.client_events);
        debug!(
            "Rendered date picker #{} (addon: {}, dropdown: {})",
            ctx.element_id,
            ctx.has_addon(),
            ctx.has_dropdown
        );

        Ok(RenderedWidget {
            id: ctx.element_id,
            html,
            script,
            config,
        })
    }
}

/// What a render needs besides the widget itself.
#[derive(Debug, Clone)]
pub struct RenderEnv {
    pub registry: Arc<TranslationRegistry>,
    /// Application language, used for tooltips when the widget sets none
    pub language: Option<String>,
}

impl RenderEnv {
    pub fn new(registry: Arc<TranslationRegistry>, language: Option<String>) -> Self {
        Self { registry, language }
    }
}

impl Default for RenderEnv {
    fn default() -> Self {
        Self::new(Arc::new(TranslationRegistry::with_builtin()), None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedWidget {
    pub id: String,
    pub html: String,
    pub script: Vec<String>,
    pub config: EffectiveConfig,
}

impl RenderedWidget {
    pub fn script_block(&self) -> String {
        script::script_block(&self.script)
    }
}

impl fmt::Display for RenderedWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.html)?;
        write!(f, "{}", self.script_block())
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use serde_json::json;

    use super::*;
    use crate::libs::{dropdown::RawDropdownEntry, translations::TranslationKey};

    fn env() -> RenderEnv {
        RenderEnv::default()
    }

    fn from_json(value: Value) -> DatePicker {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_requires_input_source() {
        let err = DatePicker::default().render(&env()).unwrap_err();
        assert!(matches!(err, WidgetError::MissingInputSource));
    }

    #[test]
    fn test_empty_names_are_rejected() {
        let err = DatePicker::standalone("").render(&env()).unwrap_err();
        assert!(matches!(err, WidgetError::MissingInputSource));

        let err = DatePicker::bound(BoundModel::new("Task", ""))
            .render(&env())
            .unwrap_err();
        assert!(matches!(err, WidgetError::MissingInputSource));

        let err = DatePicker::standalone("[]").render(&env()).unwrap_err();
        assert!(matches!(err, WidgetError::EmptyElementId { ref name } if name == "[]"));
    }

    #[test]
    fn test_explicit_id_rescues_underivable_name() {
        let rendered = DatePicker::standalone("[]").id("picker").render(&env()).unwrap();
        assert_eq!(rendered.id, "picker");
        assert!(rendered.script[0].starts_with("jQuery('#picker').parent()"));

        // an empty explicit id counts as unset
        let rendered = DatePicker::standalone("due").id("").render(&env()).unwrap();
        assert_eq!(rendered.id, "due");
    }

    #[test]
    fn test_bad_template_fails_at_configuration() {
        let result = serde_json::from_value::<DatePicker>(json!({
            "name": "due",
            "template": "{input}{dropdown}"
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("has no addon slot"), "{err}");
    }

    #[test]
    fn test_default_render() {
        let rendered = DatePicker::standalone("due").render(&env()).unwrap();
        assert_eq!(rendered.id, "due");
        assert_eq!(
            rendered.html,
            format!(
                r#"<div class="input-group nex-datepicker-container date"><input type="text" id="due" class="form-control" name="due">{DEFAULT_ADDON}</div>"#
            )
        );
        assert_eq!(rendered.script.len(), 1);
        assert!(rendered.script[0].starts_with(
            r#"jQuery('#due').parent().datetimepicker({"sideBySide":true,"useCurrent":false,"#
        ));
        assert_eq!(
            rendered.config.tooltips().unwrap()["today"],
            json!("Go to today")
        );
    }

    #[test]
    fn test_addon_absence() {
        let rendered = DatePicker::standalone("due")
            .addon(None)
            .dropdown_item(RawDropdownEntry::new("X").value("1"))
            .render(&env())
            .unwrap();
        assert_eq!(
            rendered.html,
            r#"<input type="text" id="due" class="form-control" name="due">"#
        );
        assert_eq!(rendered.script.len(), 1);
        assert!(rendered.script[0].starts_with("jQuery('#due').datetimepicker({"));
    }

    #[test]
    fn test_addon_disabled_from_json() {
        for addon in [json!(null), json!(false), json!("")] {
            let picker = from_json(json!({"name": "due", "addon": addon}));
            assert_eq!(picker.addon, None);
        }
        let picker = from_json(json!({"name": "due", "addon": true}));
        assert_eq!(picker.addon.as_deref(), Some(DEFAULT_ADDON));
        let picker = from_json(json!({"name": "due"}));
        assert_eq!(picker.addon.as_deref(), Some(DEFAULT_ADDON));
    }

    #[test]
    fn test_quick_select_dropdown() {
        let picker = from_json(json!({
            "name": "due",
            "addon": "<span class=\"input-group-addon\"></span>",
            "dropdownItems": [{"label": "Yesterday", "url": "#", "value": "2024-01-01"}],
        }));
        let rendered = picker.render(&env()).unwrap();

        assert!(rendered.html.contains(
            r##"<li><a href="#" data-value="2024-01-01" tabindex="-1">Yesterday</a></li>"##
        ));
        assert_eq!(rendered.script.len(), 2);
        assert_snapshot!(
            rendered.script[1],
            @"jQuery('#due').parent().find('.dropdown-menu a').on('click', function (e) { e.preventDefault(); jQuery('#due').val(jQuery(this).attr('data-value')); });"
        );
    }

    #[test]
    fn test_hidden_dropdown_has_no_click_handler() {
        let picker = from_json(json!({
            "name": "due",
            "dropdownItems": [{"label": "Hidden", "url": "#", "value": "2024-01-01", "visible": false}],
        }));
        let rendered = picker.render(&env()).unwrap();
        assert!(!rendered.html.contains("dropdown-menu"));
        assert_eq!(rendered.script.len(), 1);
    }

    #[test]
    fn test_derived_options() {
        let picker = DatePicker::bound(BoundModel::new("Task", "due_at"))
            .language("ru")
            .readonly(true)
            .size(Size::Lg)
            .placeholder("Срок")
            .client_option("format", "DD.MM.YYYY")
            .client_option("sideBySide", false);
        let rendered = picker.render(&env()).unwrap();

        assert_eq!(rendered.id, "task-due_at");
        assert_eq!(rendered.config.locale(), Some("ru"));
        assert_eq!(rendered.config.get("ignoreReadonly"), Some(&json!(true)));
        assert_eq!(rendered.config.get("sideBySide"), Some(&json!(false)));
        assert_eq!(rendered.config.get("format"), Some(&json!("DD.MM.YYYY")));
        assert_eq!(
            rendered.config.tooltips().unwrap()["clear"],
            json!("Очистить")
        );
        assert!(rendered.html.contains(
            r#"<input type="text" id="task-due_at" class="input-lg form-control" name="Task[due_at]" readonly placeholder="Срок">"#
        ));
        assert!(rendered.html.starts_with(
            r#"<div class="input-group-lg input-group nex-datepicker-container date">"#
        ));
    }

    #[test]
    fn test_tooltips_use_application_language() {
        let env = RenderEnv::new(Arc::new(TranslationRegistry::with_builtin()), Some("de".into()));
        let rendered = DatePicker::standalone("due").render(&env).unwrap();
        assert_eq!(rendered.config.locale(), None);
        assert_eq!(
            rendered.config.tooltips().unwrap()[&TranslationKey::Today.to_string()],
            json!("Zu heute springen")
        );
    }

    #[test]
    fn test_explicit_id() {
        let picker = from_json(json!({"name": "due", "options": {"id": "from-options"}}));
        assert_eq!(picker.render(&env()).unwrap().id, "from-options");
        let picker = picker.id("explicit");
        assert_eq!(picker.render(&env()).unwrap().id, "explicit");
    }

    #[test]
    fn test_client_events_follow_init() {
        let picker = from_json(json!({
            "name": "due",
            "addon": null,
            "clientEvents": {"open": "fn1", "close": "fn2"}
        }));
        let script = picker.render(&env()).unwrap().script;
        assert_eq!(script.len(), 3);
        assert!(script[0].contains(".datetimepicker("));
        assert_eq!(script[1], "jQuery('#due').on('open', fn1);");
        assert_eq!(script[2], "jQuery('#due').on('close', fn2);");
    }

    #[test]
    fn test_render_is_idempotent() {
        let picker = DatePicker::standalone("due")
            .dropdown_item(RawDropdownEntry::new("Today").url("#").value("2024-05-01"))
            .on("dp.change", "onChange");
        let first = picker.render(&env()).unwrap();
        let second = picker.render(&env()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_display() {
        let rendered = DatePicker::standalone("due")
            .addon(None)
            .render(&RenderEnv::new(Arc::new(TranslationRegistry::new()), None))
            .unwrap();
        let output = rendered.to_string();
        assert!(output.starts_with("<input type=\"text\" id=\"due\" class=\"form-control\" name=\"due\">\n<script>jQuery(function ($) {\njQuery('#due').datetimepicker({"));
        assert!(output.ends_with("});\n});</script>"));
    }
}
