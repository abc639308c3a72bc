//! 页面片段构建 - 业务能力层
//!
//! 只负责把题目、进度、提示消息变成 HTML，不关心谁来渲染

use std::time::Duration;

use crate::models::question::Question;

/// 进度信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 当前题目索引（从0开始）
    pub index: usize,
    /// 题目总数
    pub total: usize,
}

impl Progress {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }

    /// (index + 1) / total
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.index + 1) as f64 / self.total as f64
        }
    }

    /// 进度文字，例如 `Question 2 of 5`
    pub fn label(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.total)
    }
}

/// 按钮状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub submit_visible: bool,
}

impl ButtonState {
    pub fn for_position(index: usize, total: usize) -> Self {
        let is_last = index + 1 >= total;
        Self {
            prev_disabled: index == 0,
            next_disabled: is_last,
            submit_visible: is_last,
        }
    }
}

/// 提示消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// 短暂显示的提示消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            duration,
        }
    }

    pub fn class_name(&self) -> String {
        format!("toast toast-{}", self.kind.as_str())
    }
}

/// HTML 转义
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 构建题目卡片
///
/// 每个选项是一个 `name="q-{题目ID}"`、`value="{选项ID}"` 的复选框
pub fn question_card(index: usize, question: &Question) -> String {
    let answers: String = question
        .answers
        .iter()
        .map(|a| {
            format!(
                r#"
                <label class="answer-option">
                    <input type="checkbox" name="{}" value="{}">
                    <span>{}</span>
                </label>"#,
                question.input_name(),
                a.id,
                escape_html(&a.text)
            )
        })
        .collect();

    format!(
        r#"
        <div class="card question-card">
            <div class="card-content">
                <h3>Question {}</h3>
                <p>{}</p>
                <div class="answers-list">{}
                </div>
            </div>
        </div>"#,
        index + 1,
        escape_html(&question.text),
        answers
    )
}

/// 构建进度条
pub fn progress_bar(progress: Progress) -> String {
    format!(
        r#"
        <div class="progress-container">
            <div class="progress-bar">
                <div class="progress-fill" style="width: {}%"></div>
            </div>
            <p>{}</p>
        </div>"#,
        progress.fraction() * 100.0,
        progress.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Answer;

    fn sample_question() -> Question {
        Question {
            id: 4,
            text: "Which is <b>bold</b>?".to_string(),
            answers: vec![
                Answer { id: 10, text: "A & B".to_string() },
                Answer { id: 11, text: "C".to_string() },
            ],
        }
    }

    #[test]
    fn test_progress_label_and_fraction() {
        let p = Progress::new(1, 4);
        assert_eq!(p.label(), "Question 2 of 4");
        assert_eq!(p.fraction(), 0.5);
    }

    #[test]
    fn test_button_state_boundaries() {
        assert_eq!(
            ButtonState::for_position(0, 3),
            ButtonState { prev_disabled: true, next_disabled: false, submit_visible: false }
        );
        assert_eq!(
            ButtonState::for_position(2, 3),
            ButtonState { prev_disabled: false, next_disabled: true, submit_visible: true }
        );
        // 只有一道题时两端同时生效
        assert_eq!(
            ButtonState::for_position(0, 1),
            ButtonState { prev_disabled: true, next_disabled: true, submit_visible: true }
        );
    }

    #[test]
    fn test_question_card_escapes_and_lists_answers() {
        let html = question_card(0, &sample_question());
        assert!(html.contains("<h3>Question 1</h3>"));
        assert!(html.contains("Which is &lt;b&gt;bold&lt;/b&gt;?"));
        assert!(html.contains(r#"name="q-4" value="10""#));
        assert!(html.contains(r#"name="q-4" value="11""#));
        assert!(html.contains("A &amp; B"));
    }

    #[test]
    fn test_progress_bar_width() {
        let html = progress_bar(Progress::new(0, 4));
        assert!(html.contains("width: 25%"));
        assert!(html.contains("<p>Question 1 of 4</p>"));
    }

    #[test]
    fn test_toast_class() {
        let toast = Toast::new("Error submitting quiz", ToastKind::Error, Duration::from_millis(3000));
        assert_eq!(toast.class_name(), "toast toast-error");
    }
}
