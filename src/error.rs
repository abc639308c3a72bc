use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 页面视图错误（缺失元素、非法选项等）
    #[error("视图错误: {0}")]
    View(#[from] ViewError),
    /// 业务逻辑错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed { port: u16, source: BoxError },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed { source: BoxError },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed { url: String, source: BoxError },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed { source: BoxError },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed { endpoint: String, source: BoxError },
    /// 服务器返回的不是合法 JSON
    #[error("API返回无法解析的响应 ({endpoint}, status={status}): {source}")]
    InvalidBody {
        endpoint: String,
        status: u16,
        source: BoxError,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed { source: BoxError },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed { path: String, source: BoxError },
    /// 测验文件内容解析失败（TOML / JSON）
    #[error("测验文件解析失败 ({path}): {source}")]
    ParseFailed { path: String, source: BoxError },
    /// 不支持的文件类型
    #[error("不支持的测验文件类型: {path}")]
    UnsupportedFormat { path: String },
}

/// 页面视图错误
#[derive(Debug, Error)]
pub enum ViewError {
    /// 页面上找不到需要的元素
    #[error("页面元素不存在: {selector}")]
    ElementNotFound { selector: String },
    /// 当前渲染的题目中没有该选项
    #[error("题目 {question_id} 中没有选项 {answer_id}")]
    UnknownAnswer { question_id: i64, answer_id: i64 },
    /// 尚未渲染任何题目
    #[error("当前没有已渲染的题目")]
    NothingRendered,
    /// 页面中没有嵌入测验数据
    #[error("页面中没有嵌入测验数据: {detail}")]
    MissingEmbeddedData { detail: String },
}

/// 业务逻辑错误
#[derive(Debug, Error)]
pub enum BusinessError {
    /// 测验没有任何题目
    #[error("测验 {quiz_id} 没有任何题目")]
    EmptyQuiz { quiz_id: i64 },
    /// 会话中没有保存的测验结果
    #[error("会话中没有保存的测验结果 (key: {key})")]
    MissingResult { key: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少测验来源
    #[error("未指定测验来源: 需要 QUIZ_FILE，或在浏览器模式下提供 QUIZ_ID")]
    MissingQuizSource,
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err.url().map(|u| u.to_string()).unwrap_or_default();
        AppError::Api(ApiError::RequestFailed {
            endpoint,
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件解析错误
    pub fn file_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建元素缺失错误
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        AppError::View(ViewError::ElementNotFound {
            selector: selector.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_error_display() {
        let err = AppError::from(ViewError::UnknownAnswer {
            question_id: 1,
            answer_id: 9,
        });
        assert_eq!(err.to_string(), "视图错误: 题目 1 中没有选项 9");
    }

    #[test]
    fn test_serde_error_maps_to_api() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = parse.into();
        assert!(matches!(err, AppError::Api(ApiError::JsonParseFailed { .. })));
        assert!(std::error::Error::source(&err).is_some());
    }
}
