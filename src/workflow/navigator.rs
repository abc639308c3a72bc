//! 答题导航 - 流程层
//!
//! 核心职责：在一组题目之间前后移动，离开题目前保存勾选，最后提交
//!
//! 流程顺序：
//! 1. start → 显示第一题
//! 2. next / previous → 保存 → 移动 → 整体重新渲染
//! 3. submit → 保存 → 提交 → 成功则保存结果并跳转，失败则提示

use std::time::Duration;

use serde_json::Value as JsonValue;
use tracing::{debug, error, info, warn};

use crate::error::{AppResult, BusinessError};
use crate::models::answer_state::AnswerState;
use crate::models::question::Question;
use crate::models::quiz_result::SubmitResponse;
use crate::services::markup::{self, ButtonState, Progress, Toast, ToastKind};
use crate::services::submit_client::SubmitClient;
use crate::utils::truncate_text;
use crate::view::{QuizView, RESULT_STORAGE_KEY};
use crate::workflow::quiz_ctx::QuizCtx;

/// 提交失败时显示的提示
pub const SUBMIT_ERROR_MESSAGE: &str = "Error submitting quiz";

/// 默认提示时长
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// 提交结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 提交成功，结果已保存并已跳转
    Completed(JsonValue),
    /// 服务器返回 `success: false`
    Rejected { message: String },
    /// 网络错误或响应无法解析
    Failed { reason: String },
    /// 已经提交成功过，本次没有发送请求
    AlreadySubmitted,
}

/// 答题导航器
///
/// - 持有题目列表、当前索引和作答状态
/// - 通过 `QuizView` 渲染，通过 `SubmitClient` 提交
/// - 当前索引始终位于 [0, 题目数 - 1]
pub struct QuizNavigator<V, C> {
    ctx: QuizCtx,
    questions: Vec<Question>,
    current: usize,
    answers: AnswerState,
    view: V,
    client: C,
    toast_duration: Duration,
    completed: bool,
    /// 提交成功时的作答状态
    submitted: Option<AnswerState>,
}

impl<V: QuizView, C: SubmitClient> QuizNavigator<V, C> {
    /// 创建导航器，题目列表不能为空
    pub fn new(ctx: QuizCtx, questions: Vec<Question>, view: V, client: C) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(BusinessError::EmptyQuiz {
                quiz_id: ctx.quiz_id,
            }
            .into());
        }
        Ok(Self {
            ctx,
            questions,
            current: 0,
            answers: AnswerState::new(),
            view,
            client,
            toast_duration: DEFAULT_TOAST_DURATION,
            completed: false,
            submitted: None,
        })
    }

    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    pub fn ctx(&self) -> &QuizCtx {
        &self.ctx
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn answers(&self) -> &AnswerState {
        &self.answers
    }

    /// 提交成功时发出的作答状态，未成功提交时为 None
    pub fn submitted_answers(&self) -> Option<&AnswerState> {
        self.submitted.as_ref()
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.current, self.questions.len())
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 页面加载：显示第一题
    pub async fn start(&mut self) -> AppResult<()> {
        info!("{} 开始答题，共 {} 道题", self.ctx, self.questions.len());
        self.show(0).await?;
        Ok(())
    }

    /// 显示指定索引的题目，越界时什么也不做并返回 false
    pub async fn show(&mut self, index: usize) -> AppResult<bool> {
        let Some(question) = self.questions.get(index) else {
            debug!("{} 忽略越界的题目索引 {}", self.ctx, index);
            return Ok(false);
        };

        self.current = index;
        let card = markup::question_card(index, question);
        self.view.render_question(question, &card).await?;

        // 恢复之前保存的勾选
        if let Some(selected) = self.answers.get(question.id) {
            if !selected.is_empty() {
                self.view.set_checked(question.id, selected).await?;
            }
        }

        let progress = self.progress();
        self.view.render_progress(&markup::progress_bar(progress)).await?;
        self.view
            .set_buttons(ButtonState::for_position(index, self.questions.len()))
            .await?;

        debug!(
            "{} {} | {}",
            self.ctx,
            progress.label(),
            truncate_text(&question.text, 60)
        );
        Ok(true)
    }

    /// 读取当前题目的勾选并整体覆盖已保存的选择
    pub async fn save_current_answers(&mut self) -> AppResult<()> {
        let question_id = self.questions[self.current].id;
        let checked = self.view.checked_answers(question_id).await?;
        debug!("{} 保存题目 {} 的选择: {:?}", self.ctx, question_id, checked);
        self.answers.record(question_id, checked);
        Ok(())
    }

    /// 下一题；已在最后一题时不做任何事
    pub async fn next(&mut self) -> AppResult<bool> {
        if self.current + 1 >= self.questions.len() {
            return Ok(false);
        }
        self.save_current_answers().await?;
        self.show(self.current + 1).await
    }

    /// 上一题；已在第一题时不做任何事
    pub async fn previous(&mut self) -> AppResult<bool> {
        if self.current == 0 {
            return Ok(false);
        }
        self.save_current_answers().await?;
        self.show(self.current - 1).await
    }

    /// 提交答卷
    ///
    /// 失败时只提示，不回滚、不重试；成功后作答状态被丢弃
    pub async fn submit(&mut self) -> AppResult<SubmitOutcome> {
        if self.completed {
            warn!("{} 答卷已提交，忽略重复提交", self.ctx);
            return Ok(SubmitOutcome::AlreadySubmitted);
        }

        self.save_current_answers().await?;

        info!(
            "{} 📤 正在提交答卷到 {} ({} 道题已保存)",
            self.ctx,
            self.ctx.submit_path(),
            self.answers.len()
        );

        let body = match self.client.submit(self.ctx.quiz_id, &self.answers).await {
            Ok(body) => body,
            Err(e) => {
                error!("{} ❌ 提交请求失败: {}", self.ctx, e);
                self.notify_failure().await?;
                return Ok(SubmitOutcome::Failed {
                    reason: e.to_string(),
                });
            }
        };

        match SubmitResponse::from_json(body) {
            SubmitResponse::Rejected { message } => {
                error!("{} ❌ 服务器拒绝了答卷: {}", self.ctx, message);
                self.notify_failure().await?;
                Ok(SubmitOutcome::Rejected { message })
            }
            SubmitResponse::Accepted(result) => {
                self.view
                    .store_session_item(RESULT_STORAGE_KEY, &result.to_string())
                    .await?;
                self.submitted = Some(std::mem::take(&mut self.answers));
                self.completed = true;

                let result_path = self.ctx.result_path();
                info!("{} ✓ 答卷提交成功，跳转到 {}", self.ctx, result_path);
                self.view.navigate(&result_path).await?;
                Ok(SubmitOutcome::Completed(result))
            }
        }
    }

    async fn notify_failure(&mut self) -> AppResult<()> {
        let toast = Toast::new(SUBMIT_ERROR_MESSAGE, ToastKind::Error, self.toast_duration);
        self.view.show_toast(&toast).await
    }
}
