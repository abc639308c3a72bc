//! 视图层
//!
//! 答题流程与"页面"之间的接缝：
//! - `MemoryView` - 进程内文档，用于终端和测试
//! - `BrowserView` - 通过 `JsExecutor` 操作真实浏览器页面

pub mod browser_view;
pub mod memory;

pub use browser_view::BrowserView;
pub use memory::MemoryView;

use crate::error::AppResult;
use crate::models::question::{AnswerId, Question, QuestionId};
use crate::services::markup::{ButtonState, Toast};

/// 保存测验结果的会话存储键
pub const RESULT_STORAGE_KEY: &str = "quizResults";

/// 答题页视图
///
/// 所有方法都对应页面上的一次 DOM / window 操作
#[allow(async_fn_in_trait)]
pub trait QuizView {
    /// 整体替换题目区域的内容，之前的勾选状态随之丢失
    async fn render_question(&mut self, question: &Question, markup: &str) -> AppResult<()>;

    /// 勾选当前题目中的指定选项
    async fn set_checked(&mut self, question_id: QuestionId, answer_ids: &[AnswerId]) -> AppResult<()>;

    /// 读取当前题目中被勾选的选项（按显示顺序）
    async fn checked_answers(&self, question_id: QuestionId) -> AppResult<Vec<AnswerId>>;

    /// 替换进度区域的内容
    async fn render_progress(&mut self, markup: &str) -> AppResult<()>;

    /// 更新上一题 / 下一题 / 提交按钮
    async fn set_buttons(&mut self, state: ButtonState) -> AppResult<()>;

    /// 显示短暂提示
    async fn show_toast(&mut self, toast: &Toast) -> AppResult<()>;

    /// 写入会话存储
    async fn store_session_item(&mut self, key: &str, value: &str) -> AppResult<()>;

    /// 读取会话存储
    async fn session_item(&self, key: &str) -> AppResult<Option<String>>;

    /// 跳转到指定地址
    async fn navigate(&mut self, url: &str) -> AppResult<()>;

    /// 用户点击一个选项，返回点击后的勾选状态
    async fn toggle_answer(&mut self, question_id: QuestionId, answer_id: AnswerId) -> AppResult<bool>;
}
