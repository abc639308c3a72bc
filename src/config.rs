/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 测验服务地址
    pub base_url: String,
    /// 终端模式提交时附带的会话 Cookie（如 `session=...`），服务器要求登录
    pub session_cookie: Option<String>,
    /// 测验ID（浏览器模式下用于打开答题页）
    pub quiz_id: Option<i64>,
    /// 测验数据文件（.toml / .json / .html）
    pub quiz_file: Option<String>,
    /// 是否通过浏览器页面渲染
    pub use_browser: bool,
    /// 浏览器模式下是否启动无头浏览器（否则连接调试端口）
    pub headless: bool,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 无头模式使用的浏览器可执行文件
    pub chrome_executable: Option<String>,
    /// 提交请求超时（秒）
    pub request_timeout_secs: u64,
    /// 提示消息显示时长（毫秒）
    pub toast_duration_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            session_cookie: None,
            quiz_id: None,
            quiz_file: None,
            use_browser: false,
            headless: false,
            browser_debug_port: 9222,
            chrome_executable: None,
            request_timeout_secs: 30,
            toast_duration_ms: 3000,
            verbose_logging: false,
            output_log_file: "quiz_runner.log".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("QUIZ_BASE_URL").unwrap_or(default.base_url),
            session_cookie: std::env::var("QUIZ_SESSION_COOKIE").ok().filter(|v| !v.is_empty()).or(default.session_cookie),
            quiz_id: std::env::var("QUIZ_ID").ok().and_then(|v| v.parse().ok()).or(default.quiz_id),
            quiz_file: std::env::var("QUIZ_FILE").ok().or(default.quiz_file),
            use_browser: std::env::var("QUIZ_USE_BROWSER").ok().and_then(|v| v.parse().ok()).unwrap_or(default.use_browser),
            headless: std::env::var("QUIZ_HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().or(default.chrome_executable),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            toast_duration_ms: std::env::var("TOAST_DURATION_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.toast_duration_ms),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 答题页地址
    pub fn take_url(&self, quiz_id: i64) -> String {
        format!("{}/quizzes/{}/take", self.base_url.trim_end_matches('/'), quiz_id)
    }
}
