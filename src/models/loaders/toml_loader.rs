use crate::error::{AppError, AppResult, FileError};
use crate::models::loaders::page_loader::parse_embedded_quiz;
use crate::models::question::QuizData;
use std::path::Path;
use tokio::fs;

async fn read_quiz_text(path: &Path) -> AppResult<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))
}

/// 从 TOML 文件加载测验数据
pub async fn load_toml_to_quiz(toml_file_path: &Path) -> AppResult<QuizData> {
    let content = read_quiz_text(toml_file_path).await?;
    toml::from_str(&content)
        .map_err(|e| AppError::file_parse_failed(toml_file_path.display().to_string(), e))
}

/// 按扩展名加载测验文件
///
/// - `.toml`: 测验数据
/// - `.json`: 测验数据
/// - `.html` / `.htm`: 服务器渲染的答题页，从脚本中提取嵌入数据
pub async fn load_quiz_file(path: &Path) -> AppResult<QuizData> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);

    let quiz = match extension.as_deref() {
        Some("toml") => load_toml_to_quiz(path).await?,
        Some("json") => {
            let content = read_quiz_text(path).await?;
            serde_json::from_str(&content)
                .map_err(|e| AppError::file_parse_failed(path.display().to_string(), e))?
        }
        Some("html") | Some("htm") => parse_embedded_quiz(&read_quiz_text(path).await?)?,
        _ => {
            return Err(FileError::UnsupportedFormat {
                path: path.display().to_string(),
            }
            .into())
        }
    };

    tracing::info!(
        "成功加载测验 #{}: {} 道题",
        quiz.quiz_id,
        quiz.questions.len()
    );

    Ok(quiz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use std::path::PathBuf;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("quiz_runner_{}_{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_toml_quiz() {
        let path = temp_file(
            "quiz.toml",
            r#"
quiz_id = 7
title = "地理小测"

[[questions]]
id = 1
text = "中国的首都是？"

[[questions.answers]]
id = 5
text = "北京"

[[questions.answers]]
id = 6
text = "上海"

[[questions]]
id = 2
text = "最长的河流？"
answers = [{ id = 9, text = "长江" }]
"#,
        );

        let quiz = load_quiz_file(&path).await.unwrap();
        assert_eq!(quiz.quiz_id, 7);
        assert_eq!(quiz.title.as_deref(), Some("地理小测"));
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].answers[1].text, "上海");
        assert_eq!(quiz.questions[1].answers[0].id, 9);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_load_json_quiz() {
        let path = temp_file(
            "quiz.json",
            r#"{"quiz_id": 3, "questions": [{"id": 1, "text": "Q", "answers": []}]}"#,
        );
        let quiz = load_quiz_file(&path).await.unwrap();
        assert_eq!(quiz.quiz_id, 3);
        assert_eq!(quiz.questions[0].text, "Q");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let path = temp_file("quiz.yaml", "quiz_id: 1");
        let err = load_quiz_file(&path).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::UnsupportedFormat { .. })));
        assert!(err.to_string().contains("不支持的测验文件类型"));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let path = std::env::temp_dir().join("quiz_runner_does_not_exist.toml");
        let err = load_quiz_file(&path).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_malformed_files_report_path() {
        let toml_path = temp_file("broken.toml", "quiz_id = [");
        match load_quiz_file(&toml_path).await.unwrap_err() {
            AppError::File(FileError::ParseFailed { path, .. }) => assert!(path.ends_with("broken.toml")),
            other => panic!("unexpected error: {:?}", other),
        }
        let _ = std::fs::remove_file(toml_path);

        let json_path = temp_file("broken.json", r#"{"quiz_id": "#);
        let err = load_quiz_file(&json_path).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::ParseFailed { .. })));
        let _ = std::fs::remove_file(json_path);
    }

    #[tokio::test]
    async fn test_page_without_embedded_data() {
        let path = temp_file("blank.html", "<html><body></body></html>");
        let err = load_quiz_file(&path).await.unwrap_err();
        assert!(matches!(err, AppError::View(ViewError::MissingEmbeddedData { .. })));
        let _ = std::fs::remove_file(path);
    }
}
