//! # 错误处理和 Panic 配置模块
//!
//! 安装 color-eyre 的错误报告钩子，并接管 panic。
//!
//! ## 处理流程
//!
//! ```text
//! 发生 Panic
//!     │
//!     ├─ Release: human-panic 生成崩溃转储并提示用户报告问题
//!     ├─ 记录去除 ANSI 转义后的报告到日志
//!     ├─ Debug: better-panic 打印完整堆栈
//!     │
//!     └─ 以 EXIT_FAILURE 退出
//! ```
//!
//! `render` 命令的输出直接写入 stdout，所以报告只走 stderr 和日志文件。
//!
//! ## trace_dbg! 宏
//!
//! 类似 `std::dbg!`，但输出到 tracing 日志而非 stdout：
//!
//! ```rust,ignore
//! let config = trace_dbg!(widget.effective_config(&env));
//! let id = trace_dbg!(level: tracing::Level::INFO, rendered.id);
//! ```

use color_eyre::Result;
use tracing::error;

pub fn init() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(format!(
            "This is a bug. Consider reporting it at {}",
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;
    std::panic::set_hook(Box::new(move |panic_info| {
        #[cfg(not(debug_assertions))]
        {
            use human_panic::{handle_dump, metadata, print_msg};
            let metadata = metadata!();
            let file_path = handle_dump(&metadata, panic_info);
            // prints human-panic message
            print_msg(file_path, &metadata)
                .expect("human-panic: printing error message to console failed");
            eprintln!("{}", panic_hook.panic_report(panic_info)); // prints color-eyre stack trace to stderr
        }
        let msg = format!("{}", panic_hook.panic_report(panic_info));
        error!("Error: {}", strip_ansi_escapes::strip_str(msg));

        #[cfg(debug_assertions)]
        {
            // Better Panic stacktrace that is only enabled when debugging.
            better_panic::Settings::auto()
                .most_recent_first(false)
                .lineno_suffix(true)
                .verbosity(better_panic::Verbosity::Full)
                .create_panic_handler()(panic_info);
        }

        std::process::exit(libc::EXIT_FAILURE);
    }));
    Ok(())
}

/// `std::dbg!` for the log file: emits a `tracing` event (DEBUG unless a
/// level is given) and returns the value.
#[macro_export]
macro_rules! trace_dbg {
        (target: $target:expr, level: $level:expr, $ex:expr) => {
            {
                match $ex {
                        value => {
                                tracing::event!(target: $target, $level, ?value, stringify!($ex));
                                value
                        }
                }
            }
        };
        (level: $level:expr, $ex:expr) => {
                trace_dbg!(target: module_path!(), level: $level, $ex)
        };
        (target: $target:expr, $ex:expr) => {
                trace_dbg!(target: $target, level: tracing::Level::DEBUG, $ex)
        };
        ($ex:expr) => {
                trace_dbg!(level: tracing::Level::DEBUG, $ex)
        };
}
