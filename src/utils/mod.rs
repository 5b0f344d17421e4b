//! # 工具模块集合
//!
//! 命令行与演示服务共用的启动工具：错误报告和日志记录。
//!
//! ## 模块组织
//!
//! ```text
//! utils/
//! ├── errors.rs  - 错误处理和 Panic Hook 配置
//! ├── logging.rs - 日志记录配置
//! └── mod.rs     - 模块导出声明
//! ```
//!
//! ### 错误处理 (`errors`)
//! - Color-eyre 错误报告
//! - Panic Hook 设置
//! - 调试和生产环境的不同处理策略
//!
//! ### 日志记录 (`logging`)
//! - Tracing 日志系统初始化
//! - 日志级别由 `RUST_LOG` 或 `DATEPICKER_WIDGET_LOGLEVEL` 控制
//! - 日志写入数据目录下的文件，不污染 `render` 命令的标准输出
//!
//! ## 编译条件
//!
//! - `#[cfg(not(tarpaulin_include))]`: 在代码覆盖率测试时排除这两个模块

#[cfg(not(tarpaulin_include))]
pub(crate) mod errors;
#[cfg(not(tarpaulin_include))]
pub(crate) mod logging;
