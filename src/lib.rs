//! # Quiz Runner
//!
//! 测验答题客户端：逐题显示、保存勾选、显示进度、提交答卷
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//! - `browser/` - 连接调试端口或启动无头浏览器
//!
//! ### ② 视图层（View）
//! - `view/` - 答题页的抽象：题目区域、进度条、按钮、提示、sessionStorage
//! - `MemoryView` - 进程内文档
//! - `BrowserView` - 真实页面
//!
//! ### ③ 业务能力层（Services）
//! - `markup` - 题目卡片、进度条 HTML
//! - `submit_client` - 提交答卷（reqwest）
//! - `result_view` - 结果页
//!
//! ### ④ 流程层（Workflow）
//! - `QuizCtx` - 上下文封装（quiz_id + 页面地址）
//! - `QuizNavigator` - 导航流程（show → save → next/previous → submit）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/app` - 一次答题会话
//! - `orchestrator/command_loop` - 命令循环

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod view;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::JsExecutor;
pub use models::{AnswerState, Question, QuizData};
pub use orchestrator::App;
pub use view::{BrowserView, MemoryView, QuizView};
pub use workflow::{QuizCtx, QuizNavigator, SubmitOutcome};
