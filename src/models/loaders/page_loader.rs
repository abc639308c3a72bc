//! 从服务器渲染的答题页中提取嵌入的测验数据
//!
//! 答题页在脚本里以 `const quizId = 3;` 和 `const questions = [...];`
//! 的形式嵌入数据，答题逻辑运行前这两个全局变量已经存在。

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Deserializer;

use crate::error::{AppResult, ViewError};
use crate::models::question::{Question, QuizData};

static QUIZ_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:const|let|var)\s+quizId\s*=\s*['\x22]?(\d+)").expect("valid quizId regex")
});
static QUESTIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:const|let|var)\s+questions\s*=\s*").expect("valid questions regex")
});

/// 解析页面中嵌入的 `quizId` 和 `questions`
pub fn parse_embedded_quiz(html: &str) -> AppResult<QuizData> {
    let quiz_id = QUIZ_ID_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .ok_or_else(|| ViewError::MissingEmbeddedData {
            detail: "quizId".to_string(),
        })?;

    let start = QUESTIONS_RE
        .find(html)
        .map(|m| m.end())
        .ok_or_else(|| ViewError::MissingEmbeddedData {
            detail: "questions".to_string(),
        })?;

    // 只解析紧随其后的第一个 JSON 值，后面的脚本内容忽略
    let questions = Deserializer::from_str(&html[start..])
        .into_iter::<Vec<Question>>()
        .next()
        .ok_or_else(|| ViewError::MissingEmbeddedData {
            detail: "questions".to_string(),
        })??;

    Ok(QuizData {
        quiz_id,
        title: None,
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<div id="quizContainer"></div>
<script>
    const quizId = 12;
    const questions = [{"id": 1, "text": "a ]; b", "answers": [{"id": 5, "text": "x"}]}, {"id": 2, "text": "c", "answers": []}];
</script>
<script src="/static/js/quiz.js"></script>
</body></html>
"#;

    #[test]
    fn test_parse_embedded_quiz() {
        let quiz = parse_embedded_quiz(PAGE).unwrap();
        assert_eq!(quiz.quiz_id, 12);
        assert_eq!(quiz.questions.len(), 2);
        // 题干里的 "];" 不会截断解析
        assert_eq!(quiz.questions[0].text, "a ]; b");
        assert_eq!(quiz.questions[0].answers[0].id, 5);
    }

    #[test]
    fn test_parse_several_pages() {
        for id in [3, 41] {
            let page = format!("<script>var quizId = '{}'; let questions = [];</script>", id);
            let quiz = parse_embedded_quiz(&page).unwrap();
            assert_eq!(quiz.quiz_id, id);
            assert!(quiz.questions.is_empty());
        }
    }

    #[test]
    fn test_missing_quiz_id() {
        let err = parse_embedded_quiz("<script>const questions = [];</script>").unwrap_err();
        assert!(err.to_string().contains("quizId"));
    }

    #[test]
    fn test_missing_questions() {
        let err = parse_embedded_quiz("<script>let quizId = 4;</script>").unwrap_err();
        assert!(err.to_string().contains("questions"));
    }
}
