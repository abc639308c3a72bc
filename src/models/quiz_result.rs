use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::question::{AnswerId, QuestionId};

/// 单题批改结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    pub is_correct: bool,
    #[serde(default)]
    pub user_answers: Vec<AnswerId>,
    #[serde(default)]
    pub correct_answers: Vec<AnswerId>,
}

/// 服务器返回的测验结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub total_questions: usize,
    pub correct_count: usize,
    /// 服务器按 total - correct 计算，可能为负
    pub incorrect_count: i64,
    #[serde(default)]
    pub results: Vec<QuestionOutcome>,
}

impl QuizResult {
    /// 百分制得分，无题目时为 0
    pub fn score(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.correct_count as f64 / self.total_questions as f64 * 100.0
        }
    }
}

/// 提交接口的响应
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResponse {
    /// `success` 字段为 `false`
    Rejected { message: String },
    /// 其他任何 JSON 都视为结果对象
    Accepted(JsonValue),
}

impl SubmitResponse {
    pub fn from_json(body: JsonValue) -> Self {
        if body.get("success").and_then(JsonValue::as_bool) == Some(false) {
            let message = body
                .get("message")
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string();
            SubmitResponse::Rejected { message }
        } else {
            SubmitResponse::Accepted(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejected_response() {
        let resp = SubmitResponse::from_json(json!({"success": false, "message": "db locked"}));
        assert_eq!(
            resp,
            SubmitResponse::Rejected {
                message: "db locked".to_string()
            }
        );
    }

    #[test]
    fn test_success_true_or_missing_is_accepted() {
        assert!(matches!(
            SubmitResponse::from_json(json!({"success": true})),
            SubmitResponse::Accepted(_)
        ));
        assert!(matches!(
            SubmitResponse::from_json(json!({"total_questions": 2})),
            SubmitResponse::Accepted(_)
        ));
        // 只有严格的 false 才算失败
        assert!(matches!(
            SubmitResponse::from_json(json!({"success": 0})),
            SubmitResponse::Accepted(_)
        ));
    }

    #[test]
    fn test_quiz_result_score() {
        let result: QuizResult = serde_json::from_value(json!({
            "total_questions": 4,
            "correct_count": 3,
            "incorrect_count": 1,
            "results": [
                {"question_id": 1, "is_correct": true, "user_answers": [5], "correct_answers": [5]}
            ]
        }))
        .unwrap();
        assert_eq!(result.score(), 75.0);
        assert_eq!(result.results[0].user_answers, vec![5]);
    }

    #[test]
    fn test_score_without_questions() {
        let result = QuizResult {
            total_questions: 0,
            correct_count: 0,
            incorrect_count: 0,
            results: Vec::new(),
        };
        assert_eq!(result.score(), 0.0);
    }
}
