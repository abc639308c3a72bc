use serde::{Deserialize, Serialize};

/// 题目ID
pub type QuestionId = i64;
/// 选项ID
pub type AnswerId = i64;

/// 选项，顺序即显示顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub text: String,
}

/// 题目
///
/// 加载后在整个答题会话中保持不变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    /// 按ID查找选项
    pub fn answer(&self, answer_id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }

    /// 是否包含该选项
    pub fn has_answer(&self, answer_id: AnswerId) -> bool {
        self.answer(answer_id).is_some()
    }

    /// 复选框的 name 属性
    pub fn input_name(&self) -> String {
        format!("q-{}", self.id)
    }
}

/// 一份测验的完整数据（服务器嵌入到页面中的内容）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizData {
    pub quiz_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuizData {
    /// 按ID查找题目
    pub fn question(&self, question_id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_deserialize_without_answers() {
        let q: Question = serde_json::from_str(r#"{"id": 3, "text": "空题"}"#).unwrap();
        assert_eq!(q.id, 3);
        assert!(q.answers.is_empty());
        assert_eq!(q.input_name(), "q-3");
    }

    #[test]
    fn test_answer_lookup() {
        let q = Question {
            id: 1,
            text: "2 + 2 = ?".to_string(),
            answers: vec![
                Answer { id: 5, text: "4".to_string() },
                Answer { id: 6, text: "5".to_string() },
            ],
        };
        assert_eq!(q.answer(6).map(|a| a.text.as_str()), Some("5"));
        assert!(!q.has_answer(7));
    }
}
