//! 答题上下文
//!
//! 封装"我正在答哪一份测验"这一信息，以及由它派生出的页面地址

use std::fmt::Display;

/// 答题上下文
#[derive(Debug, Clone)]
pub struct QuizCtx {
    /// 测验ID
    pub quiz_id: i64,

    /// 页面地址前缀（浏览器中为空，跳转使用站内路径）
    pub base_path: String,
}

impl QuizCtx {
    pub fn new(quiz_id: i64, base_path: impl Into<String>) -> Self {
        Self {
            quiz_id,
            base_path: base_path.into().trim_end_matches('/').to_string(),
        }
    }

    /// 提交地址
    pub fn submit_path(&self) -> String {
        format!("{}/quizzes/{}/submit", self.base_path, self.quiz_id)
    }

    /// 结果页地址
    pub fn result_path(&self) -> String {
        format!("{}/quizzes/{}/result", self.base_path, self.quiz_id)
    }
}

impl Display for QuizCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[测验 #{}]", self.quiz_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let ctx = QuizCtx::new(7, "");
        assert_eq!(ctx.submit_path(), "/quizzes/7/submit");
        assert_eq!(ctx.result_path(), "/quizzes/7/result");

        let ctx = QuizCtx::new(7, "http://host:5000/");
        assert_eq!(ctx.result_path(), "http://host:5000/quizzes/7/result");
        assert_eq!(ctx.to_string(), "[测验 #7]");
    }
}
