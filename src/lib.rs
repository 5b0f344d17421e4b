//! # Bootstrap 日期时间选择器渲染
//!
//! 生成 `<input>` 标记（可选地包裹附加按钮和快捷选择下拉菜单），
//! 以及把 `datetimepicker` 插件挂到输入框上的 jQuery 语句。
//!
//! ```rust
//! use datepicker_widget::{DatePicker, RenderEnv};
//!
//! let rendered = DatePicker::standalone("due")
//!     .language("ru")
//!     .render(&RenderEnv::default())
//!     .unwrap();
//! assert!(rendered.html.contains(r#"name="due""#));
//! assert!(rendered.script[0].contains(".datetimepicker("));
//! ```

pub mod libs;

pub use libs::{
    error::WidgetError,
    translations::TranslationRegistry,
    widget::{DatePicker, RenderEnv, RenderedWidget},
};
