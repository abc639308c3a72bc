//! 结果页 - 业务能力层
//!
//! 把服务器返回的批改结果与题目、选项文字对应起来，生成结果页

use crate::error::{AppResult, BusinessError};
use crate::models::question::{AnswerId, Question};
use crate::models::quiz_result::{QuestionOutcome, QuizResult};
use crate::services::markup::escape_html;
use crate::view::{QuizView, RESULT_STORAGE_KEY};

/// 带文字的单题结果
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeDetail {
    pub outcome: QuestionOutcome,
    /// 题目已不存在时为 None
    pub question_text: Option<String>,
    pub user_answers_text: Vec<String>,
    pub correct_answers_text: Vec<String>,
}

/// 结果页数据
#[derive(Debug, Clone, PartialEq)]
pub struct ResultReport {
    pub total_questions: usize,
    pub correct_count: usize,
    pub incorrect_count: i64,
    pub score: f64,
    pub details: Vec<OutcomeDetail>,
}

impl ResultReport {
    /// 用题目列表补全结果中的文字
    pub fn build(result: &QuizResult, questions: &[Question]) -> Self {
        let details = result
            .results
            .iter()
            .map(|outcome| {
                let question = questions.iter().find(|q| q.id == outcome.question_id);
                OutcomeDetail {
                    outcome: outcome.clone(),
                    question_text: question.map(|q| q.text.clone()),
                    user_answers_text: answer_texts(question, &outcome.user_answers),
                    correct_answers_text: answer_texts(question, &outcome.correct_answers),
                }
            })
            .collect();

        Self {
            total_questions: result.total_questions,
            correct_count: result.correct_count,
            incorrect_count: result.incorrect_count,
            score: result.score(),
            details,
        }
    }

    /// 生成结果页 HTML
    pub fn to_html(&self) -> String {
        let rows: String = self
            .details
            .iter()
            .map(|d| {
                let status = if d.outcome.is_correct { "correct" } else { "incorrect" };
                format!(
                    r#"
            <div class="result-item result-{}">
                <p class="result-question">{}</p>
                <p>Your answers: {}</p>
                <p>Correct answers: {}</p>
            </div>"#,
                    status,
                    escape_html(d.question_text.as_deref().unwrap_or_default()),
                    escape_html(&d.user_answers_text.join(", ")),
                    escape_html(&d.correct_answers_text.join(", "))
                )
            })
            .collect();

        format!(
            r#"
        <div class="card result-card">
            <h2>Score: {:.1}%</h2>
            <p>Correct: {} / {}</p>
            <p>Incorrect: {}</p>
            <div class="result-list">{}
            </div>
        </div>"#,
            self.score, self.correct_count, self.total_questions, self.incorrect_count, rows
        )
    }
}

/// 结果页加载：从会话存储中取出提交时保存的结果
pub async fn load_stored_report(view: &impl QuizView, questions: &[Question]) -> AppResult<ResultReport> {
    let stored = view
        .session_item(RESULT_STORAGE_KEY)
        .await?
        .ok_or_else(|| BusinessError::MissingResult {
            key: RESULT_STORAGE_KEY.to_string(),
        })?;
    let result: QuizResult = serde_json::from_str(&stored)?;
    Ok(ResultReport::build(&result, questions))
}

/// 题目不在当前测验中时不生成选项文本
fn answer_texts(question: Option<&Question>, ids: &[AnswerId]) -> Vec<String> {
    let Some(question) = question else {
        return Vec::new();
    };
    ids.iter()
        .map(|id| {
            question
                .answer(*id)
                .map(|a| a.text.clone())
                .unwrap_or_else(|| format!("Unknown ({})", id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::question::Answer;
    use crate::view::MemoryView;

    fn questions() -> Vec<Question> {
        vec![Question {
            id: 1,
            text: "2 + 2".to_string(),
            answers: vec![
                Answer { id: 5, text: "4".to_string() },
                Answer { id: 6, text: "22".to_string() },
            ],
        }]
    }

    fn result() -> QuizResult {
        QuizResult {
            total_questions: 2,
            correct_count: 1,
            incorrect_count: 1,
            results: vec![
                QuestionOutcome {
                    question_id: 1,
                    is_correct: false,
                    user_answers: vec![6, 8],
                    correct_answers: vec![5],
                },
                QuestionOutcome {
                    question_id: 99,
                    is_correct: true,
                    user_answers: vec![1],
                    correct_answers: vec![1],
                },
            ],
        }
    }

    #[test]
    fn test_build_maps_texts() {
        let report = ResultReport::build(&result(), &questions());
        assert_eq!(report.score, 50.0);
        let first = &report.details[0];
        assert_eq!(first.question_text.as_deref(), Some("2 + 2"));
        assert_eq!(first.user_answers_text, vec!["22", "Unknown (8)"]);
        assert_eq!(first.correct_answers_text, vec!["4"]);
    }

    #[test]
    fn test_unknown_question_has_no_answer_texts() {
        let report = ResultReport::build(&result(), &questions());
        let second = &report.details[1];
        assert!(second.question_text.is_none());
        assert!(second.user_answers_text.is_empty());
        assert!(second.correct_answers_text.is_empty());
        assert_eq!(second.outcome.user_answers, vec![1]);
    }

    #[tokio::test]
    async fn test_load_stored_report() {
        let mut view = MemoryView::new();
        let err = load_stored_report(&view, &questions()).await.unwrap_err();
        assert!(matches!(err, AppError::Business(BusinessError::MissingResult { .. })));

        let stored = serde_json::to_string(&result()).unwrap();
        view.store_session_item(RESULT_STORAGE_KEY, &stored).await.unwrap();
        let report = load_stored_report(&view, &questions()).await.unwrap();
        assert_eq!(report.correct_count, 1);
        assert_eq!(report.details.len(), 2);
    }

    #[test]
    fn test_to_html() {
        let html = ResultReport::build(&result(), &questions()).to_html();
        assert!(html.contains("Score: 50.0%"));
        assert!(html.contains("Correct: 1 / 2"));
        assert!(html.contains("result-incorrect"));
        assert!(html.contains("Your answers: 22, Unknown (8)"));
    }
}
