//! # 组件定义文件
//!
//! `render` 命令读取的文件，内容可以是单个组件或组件列表。
//! 格式由扩展名决定：`.json`、`.json5`、`.yaml`/`.yml`。

use std::{fs, path::Path};

use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use datepicker_widget::DatePicker;
use serde_json::Value;

pub fn parse(content: &str, extension: &str) -> Result<Vec<DatePicker>> {
    let value: Value = match extension {
        "json" => serde_json::from_str(content).context("Invalid JSON")?,
        "json5" => json5::from_str(content).context("Invalid JSON5")?,
        "yaml" | "yml" => serde_yaml::from_str(content).context("Invalid YAML")?,
        other => bail!("Unsupported widget definition format: .{}", other),
    };

    let widgets = match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).with_context(|| format!("Invalid widget #{}", i + 1))
            })
            .collect::<Result<Vec<DatePicker>>>()?,
        other => vec![serde_json::from_value(other).context("Invalid widget")?],
    };
    Ok(widgets)
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<DatePicker>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_lowercase();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Error reading widget definition {}", path.display()))?;
    parse(&content, &extension).with_context(|| format!("Error in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use datepicker_widget::RenderEnv;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_yaml_list() {
        let widgets = parse(
            r##"
- name: start
  addon: null
- name: end
  size: sm
  dropdownItems:
    - label: New year
      url: "#"
      value: "2025-01-01"
  clientOptions:
    format: YYYY-MM-DD
"##,
            "yaml",
        )
        .unwrap();
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0].addon, None);
        assert_eq!(widgets[1].dropdown_items.len(), 1);

        let rendered = widgets[1].render(&RenderEnv::default()).unwrap();
        assert!(rendered.html.contains(r#"data-value="2025-01-01""#));
        assert_eq!(rendered.config.get("format"), Some(&Value::from("YYYY-MM-DD")));
    }

    #[test]
    fn test_json5_single() {
        let widgets = parse(
            "{ name: 'due', // trailing comments are fine\n clientEvents: { 'dp.show': 'onShow' }, }",
            "json5",
        )
        .unwrap();
        assert_eq!(widgets.len(), 1);
        let script = widgets[0].render(&RenderEnv::default()).unwrap().script;
        assert_eq!(script[1], "jQuery('#due').parent().on('dp.show', onShow);");
    }

    #[test]
    fn test_client_option_order_is_kept() {
        let widgets = parse(
            r#"{"name": "due", "defaultClientOptions": {}, "clientOptions": {"z": 1, "a": 2}}"#,
            "json",
        )
        .unwrap();
        let config = widgets[0].render(&RenderEnv::default()).unwrap().config;
        assert_eq!(config.keys().collect::<Vec<_>>(), ["z", "a", "tooltips"]);
    }

    #[test]
    fn test_errors() {
        assert!(parse("name = 'due'", "toml").is_err());

        let err = parse("- name: a\n- name: b\n  template: '{input}'\n", "yaml").unwrap_err();
        let report = format!("{:?}", err);
        assert!(report.contains("Invalid widget #2"), "{report}");
        assert!(report.contains("has no addon slot"), "{report}");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("widget.JSON");
        fs::write(&path, r#"{"model": {"formName": "Task", "attribute": "due"}}"#).unwrap();
        let widgets = load(&path).unwrap();
        assert_eq!(widgets[0].render(&RenderEnv::default()).unwrap().id, "task-due");

        assert!(load(dir.path().join("missing.yaml")).is_err());
    }
}
