//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 加载配置和测验数据
//! - 选择视图（终端 / 浏览器）
//! - 输出会话统计
//!
//! ### `command_loop` - 命令循环
//! - 把输入的命令翻译成导航器操作
//!
//! ## 层次关系
//!
//! ```text
//! app (一次答题会话)
//!     ↓
//! command_loop (逐条命令)
//!     ↓
//! workflow::QuizNavigator (显示 / 保存 / 移动 / 提交)
//!     ↓
//! services (markup / submit_client / result_view) + view (MemoryView / BrowserView)
//!     ↓
//! infrastructure (JsExecutor)
//! ```

pub mod app;
pub mod command_loop;

pub use app::App;
pub use command_loop::{run_commands, Command, SessionSummary};
