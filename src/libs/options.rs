//! # 客户端选项合并
//!
//! 插件选项保存为有序的 JSON 对象，本 crate 不认识的选项原样传给插件。
//! 组件自己推导的几个键（`locale`、`ignoreReadonly`、`tooltips`）
//! 由 [`merge`] 叠加在调用方选项之上。

use serde::Serialize;
use serde_json::{Map, Value};

pub type OptionMap = Map<String, Value>;

/// Options applied to every picker unless the caller overrides them.
pub fn default_client_options() -> OptionMap {
    let mut options = OptionMap::new();
    // time picker on the right side of the popup
    options.insert("sideBySide".into(), Value::Bool(true));
    // opening the picker leaves an empty input empty
    options.insert("useCurrent".into(), Value::Bool(false));
    options.insert("allowInputToggle".into(), Value::Bool(true));
    options.insert("toolbarPlacement".into(), Value::String("bottom".into()));
    options.insert("showTodayButton".into(), Value::Bool(true));
    options.insert("showClear".into(), Value::Bool(true));
    options.insert("keepInvalid".into(), Value::Bool(true));
    options.insert("useStrict".into(), Value::Bool(true));
    options
}

/// Recursively merges `overlay` into `base`.
///
/// Objects present on both sides are merged, any other value from `overlay`
/// replaces the one in `base`. Keys already in `base` keep their position.
pub fn deep_merge(base: &mut OptionMap, overlay: &OptionMap) {
    for (key, value) in overlay {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) = (base.get_mut(key), value) {
            deep_merge(existing, incoming);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}

/// Options computed from the widget's own settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedOptions {
    pub locale: Option<String>,
    pub ignore_readonly: bool,
    pub tooltips: Option<OptionMap>,
}

/// The final option set handed to the picker's initialization call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EffectiveConfig {
    options: OptionMap,
}

impl EffectiveConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn locale(&self) -> Option<&str> {
        self.options.get("locale").and_then(Value::as_str)
    }

    pub fn tooltips(&self) -> Option<&OptionMap> {
        self.options.get("tooltips").and_then(Value::as_object)
    }

    pub fn as_map(&self) -> &OptionMap {
        &self.options
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.options.clone()).to_string()
    }
}

impl From<OptionMap> for EffectiveConfig {
    fn from(options: OptionMap) -> Self {
        Self { options }
    }
}

/// Computes `defaults ⊕ overrides ⊕ derived`, later layers winning.
pub fn merge(defaults: &OptionMap, overrides: &OptionMap, derived: &DerivedOptions) -> EffectiveConfig {
    let mut options = defaults.clone();
    deep_merge(&mut options, overrides);

    if let Some(locale) = &derived.locale {
        options.insert("locale".into(), Value::String(locale.clone()));
    }
    if derived.ignore_readonly {
        options.insert("ignoreReadonly".into(), Value::Bool(true));
    }
    if let Some(tooltips) = &derived.tooltips {
        let mut layer = OptionMap::new();
        layer.insert("tooltips".into(), Value::Object(tooltips.clone()));
        deep_merge(&mut options, &layer);
    }

    EffectiveConfig { options }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> OptionMap {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_override_wins_and_defaults_kept() {
        let defaults = map(json!({"sideBySide": true, "useCurrent": false}));
        let overrides = map(json!({"useCurrent": true, "locale": "fr"}));
        let config = merge(&defaults, &overrides, &DerivedOptions::default());

        assert_eq!(
            config.as_map(),
            &map(json!({"sideBySide": true, "useCurrent": true, "locale": "fr"}))
        );
        assert_eq!(config.keys().collect::<Vec<_>>(), ["sideBySide", "useCurrent", "locale"]);
    }

    #[test]
    fn test_nested_maps_merge() {
        let defaults = map(json!({"icons": {"time": "t", "date": "d"}, "format": "L"}));
        let overrides = map(json!({"icons": {"date": "D", "up": "u"}, "format": {"x": 1}}));
        let config = merge(&defaults, &overrides, &DerivedOptions::default());

        assert_eq!(
            config.to_json(),
            r#"{"icons":{"time":"t","date":"D","up":"u"},"format":{"x":1}}"#
        );
    }

    #[test]
    fn test_derived_layers_override_caller() {
        let overrides = map(json!({
            "locale": "de",
            "ignoreReadonly": false,
            "tooltips": {"today": "Heute", "custom": "kept"}
        }));
        let derived = DerivedOptions {
            locale: Some("ru".into()),
            ignore_readonly: true,
            tooltips: Some(map(json!({"today": "Go to today"}))),
        };
        let config = merge(&default_client_options(), &overrides, &derived);

        assert_eq!(config.locale(), Some("ru"));
        assert_eq!(config.get("ignoreReadonly"), Some(&Value::Bool(true)));
        assert_eq!(
            config.tooltips(),
            Some(&map(json!({"today": "Go to today", "custom": "kept"})))
        );
        assert_eq!(config.get("sideBySide"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_empty_inputs() {
        let config = merge(&OptionMap::new(), &OptionMap::new(), &DerivedOptions::default());
        assert!(config.is_empty());
        assert_eq!(config.to_json(), "{}");
    }

    #[test]
    fn test_defaults_order() {
        let config = merge(&default_client_options(), &OptionMap::new(), &DerivedOptions::default());
        assert_eq!(
            config.to_json(),
            r#"{"sideBySide":true,"useCurrent":false,"allowInputToggle":true,"toolbarPlacement":"bottom","showTodayButton":true,"showClear":true,"keepInvalid":true,"useStrict":true}"#
        );
    }
}
