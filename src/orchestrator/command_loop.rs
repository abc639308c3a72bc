//! 命令循环 - 编排层
//!
//! 把一行行输入翻译成导航器操作，相当于答题页上的按钮点击

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::error::{AppError, AppResult, ViewError};
use crate::models::question::AnswerId;
use crate::services::submit_client::SubmitClient;
use crate::view::QuizView;
use crate::workflow::{QuizNavigator, SubmitOutcome};

pub const HELP_TEXT: &str = "命令: next|n  prev|p  goto|g <题号>  toggle|t <选项ID>  submit|s  help|h  quit|q";

/// 用户命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    /// 题号从 1 开始
    Goto(usize),
    Toggle(AnswerId),
    Submit,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入，无法识别时返回 None
    pub fn parse(line: &str) -> Option<Command> {
        let mut parts = line.split_whitespace();
        let keyword = parts.next()?.to_ascii_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return None;
        }

        match (keyword.as_str(), arg) {
            ("next" | "n", None) => Some(Command::Next),
            ("prev" | "previous" | "p", None) => Some(Command::Previous),
            ("goto" | "g", Some(n)) => n.parse().ok().filter(|n| *n > 0).map(Command::Goto),
            ("toggle" | "t", Some(id)) => id.parse().ok().map(Command::Toggle),
            ("submit" | "s", None) => Some(Command::Submit),
            ("help" | "h" | "?", None) => Some(Command::Help),
            ("quit" | "q" | "exit", None) => Some(Command::Quit),
            _ => None,
        }
    }
}

/// 会话统计
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// 至少选了一个选项的题目数（提交成功后按提交时的状态统计）
    pub answered: usize,
    pub total: usize,
    /// 最后一次提交的结果
    pub last_submit: Option<SubmitOutcome>,
}

impl SessionSummary {
    pub fn submitted(&self) -> bool {
        matches!(self.last_submit, Some(SubmitOutcome::Completed(_)))
    }
}

/// 读取命令直到退出、输入结束或提交成功
///
/// `on_render` 在每次页面变化后调用，用于把当前题目显示给用户
pub async fn run_commands<V, C, R, F>(
    navigator: &mut QuizNavigator<V, C>,
    input: R,
    mut on_render: F,
) -> AppResult<SessionSummary>
where
    V: QuizView,
    C: SubmitClient,
    R: AsyncBufRead + Unpin,
    F: FnMut(&QuizNavigator<V, C>),
{
    let mut lines = input.lines();
    let mut last_submit = None;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(command) = Command::parse(&line) else {
            warn!("无法识别的命令: {}", line.trim());
            info!("{}", HELP_TEXT);
            continue;
        };

        match command {
            Command::Next => {
                if !navigator.next().await? {
                    info!("已经是最后一题");
                }
            }
            Command::Previous => {
                if !navigator.previous().await? {
                    info!("已经是第一题");
                }
            }
            Command::Goto(number) => {
                let index = number - 1;
                if index < navigator.questions().len() {
                    navigator.save_current_answers().await?;
                    navigator.show(index).await?;
                } else {
                    warn!("题号 {} 超出范围 [1, {}]", number, navigator.questions().len());
                }
            }
            Command::Toggle(answer_id) => {
                let question_id = navigator.current_question().id;
                match navigator.view_mut().toggle_answer(question_id, answer_id).await {
                    Ok(_) => {}
                    Err(AppError::View(e @ ViewError::UnknownAnswer { .. })) => {
                        warn!("{}", e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
            Command::Submit => {
                let outcome = navigator.submit().await?;
                let completed = matches!(outcome, SubmitOutcome::Completed(_));
                last_submit = Some(outcome);
                if completed {
                    break;
                }
            }
            Command::Help => {
                info!("{}", HELP_TEXT);
                continue;
            }
            Command::Quit => break,
        }

        on_render(navigator);
    }

    // 提交成功后按发出的答卷统计
    let answered = navigator
        .submitted_answers()
        .unwrap_or_else(|| navigator.answers())
        .answered_count();

    Ok(SessionSummary {
        answered,
        total: navigator.questions().len(),
        last_submit,
    })
}
