//! 进程内文档
//!
//! 模拟答题页上的几个区域：题目容器、进度条、三个按钮、提示消息、
//! sessionStorage 和当前地址。

use std::collections::{BTreeSet, HashMap};

use tracing::info;

use crate::error::{AppResult, ViewError};
use crate::models::question::{AnswerId, Question, QuestionId};
use crate::services::markup::{ButtonState, Toast};
use crate::view::QuizView;

/// 当前渲染出的表单
#[derive(Debug, Clone, Default)]
struct RenderedForm {
    question: Option<Question>,
    checked: BTreeSet<AnswerId>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    container_html: String,
    progress_html: String,
    form: RenderedForm,
    buttons: ButtonState,
    toasts: Vec<Toast>,
    session: HashMap<String, String>,
    location: Option<String>,
    render_count: usize,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container_html(&self) -> &str {
        &self.container_html
    }

    pub fn progress_html(&self) -> &str {
        &self.progress_html
    }

    /// 当前显示的题目
    pub fn current_question(&self) -> Option<&Question> {
        self.form.question.as_ref()
    }

    pub fn buttons(&self) -> ButtonState {
        self.buttons
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// 题目区域被整体替换的次数
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// 当前题目的纯文本形式，供终端显示
    pub fn render_text(&self) -> String {
        let Some(question) = &self.form.question else {
            return String::new();
        };
        let mut lines = vec![question.text.clone()];
        for answer in &question.answers {
            let mark = if self.form.checked.contains(&answer.id) { "x" } else { " " };
            lines.push(format!("  [{}] {:>4}  {}", mark, answer.id, answer.text));
        }
        lines.join("\n")
    }

    fn rendered_question(&self, question_id: QuestionId) -> AppResult<&Question> {
        match &self.form.question {
            Some(q) if q.id == question_id => Ok(q),
            Some(_) => Err(ViewError::ElementNotFound {
                selector: format!("input[name=\"q-{}\"]", question_id),
            }
            .into()),
            None => Err(ViewError::NothingRendered.into()),
        }
    }
}

impl QuizView for MemoryView {
    async fn render_question(&mut self, question: &Question, markup: &str) -> AppResult<()> {
        self.container_html = markup.to_string();
        self.form = RenderedForm {
            question: Some(question.clone()),
            checked: BTreeSet::new(),
        };
        self.render_count += 1;
        Ok(())
    }

    async fn set_checked(&mut self, question_id: QuestionId, answer_ids: &[AnswerId]) -> AppResult<()> {
        let question = self.rendered_question(question_id)?;
        // 已不存在的选项直接忽略
        let valid: Vec<AnswerId> = answer_ids
            .iter()
            .copied()
            .filter(|id| question.has_answer(*id))
            .collect();
        self.form.checked.extend(valid);
        Ok(())
    }

    async fn checked_answers(&self, question_id: QuestionId) -> AppResult<Vec<AnswerId>> {
        let question = self.rendered_question(question_id)?;
        Ok(question
            .answers
            .iter()
            .map(|a| a.id)
            .filter(|id| self.form.checked.contains(id))
            .collect())
    }

    async fn render_progress(&mut self, markup: &str) -> AppResult<()> {
        self.progress_html = markup.to_string();
        Ok(())
    }

    async fn set_buttons(&mut self, state: ButtonState) -> AppResult<()> {
        self.buttons = state;
        Ok(())
    }

    async fn show_toast(&mut self, toast: &Toast) -> AppResult<()> {
        info!("🔔 [{}] {}", toast.kind.as_str(), toast.message);
        self.toasts.push(toast.clone());
        Ok(())
    }

    async fn store_session_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.session.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn session_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.session.get(key).cloned())
    }

    async fn navigate(&mut self, url: &str) -> AppResult<()> {
        self.location = Some(url.to_string());
        Ok(())
    }

    async fn toggle_answer(&mut self, question_id: QuestionId, answer_id: AnswerId) -> AppResult<bool> {
        let question = self.rendered_question(question_id)?;
        if !question.has_answer(answer_id) {
            return Err(ViewError::UnknownAnswer {
                question_id,
                answer_id,
            }
            .into());
        }
        if self.form.checked.remove(&answer_id) {
            Ok(false)
        } else {
            self.form.checked.insert(answer_id);
            Ok(true)
        }
    }
}
