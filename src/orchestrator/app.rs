//! 应用入口 - 编排层
//!
//! 管理一次答题会话的生命周期：加载测验、选择视图、运行命令循环、输出统计

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::Browser;
use tokio::io::BufReader;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::ConfigError;
use crate::infrastructure::JsExecutor;
use crate::models::loaders::load_quiz_file;
use crate::models::question::QuizData;
use crate::orchestrator::command_loop::{run_commands, SessionSummary, HELP_TEXT};
use crate::services::result_view::load_stored_report;
use crate::services::submit_client::{HttpSubmitClient, PageSubmitClient, SubmitClient};
use crate::utils::logging;
use crate::view::{BrowserView, MemoryView};
use crate::workflow::{QuizCtx, QuizNavigator};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)
            .with_context(|| format!("无法写入日志文件: {}", config.output_log_file))?;

        if config.quiz_file.is_none() && !(config.use_browser && config.quiz_id.is_some()) {
            return Err(ConfigError::MissingQuizSource.into());
        }

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let summary = if self.config.use_browser {
            self.run_in_browser().await?
        } else {
            self.run_in_memory().await?
        };

        logging::log_session_end(
            summary.answered,
            summary.total,
            summary.submitted(),
            &self.config.output_log_file,
        );
        Ok(())
    }

    /// 终端模式：在进程内文档上答题
    async fn run_in_memory(&self) -> Result<SessionSummary> {
        let quiz = self.load_quiz_from_file().await?;
        logging::log_session_start(quiz.quiz_id, quiz.questions.len(), "memory");

        if self.config.session_cookie.is_none() {
            warn!("未设置 QUIZ_SESSION_COOKIE，需要登录的测验服务会把提交重定向到登录页");
        }
        let client = HttpSubmitClient::new(&self.config)?;

        let ctx = QuizCtx::new(quiz.quiz_id, self.config.base_url.as_str());
        let mut navigator = QuizNavigator::new(ctx, quiz.questions, MemoryView::new(), client)?
            .with_toast_duration(self.toast_duration());

        navigator.start().await?;
        info!("{}", HELP_TEXT);
        print_memory_view(&navigator);

        let stdin = BufReader::new(tokio::io::stdin());
        let summary = run_commands(&mut navigator, stdin, print_memory_view).await?;

        if summary.submitted() {
            let report = load_stored_report(navigator.view(), navigator.questions()).await?;
            info!(
                "📊 得分: {:.1}% ({}/{})",
                report.score, report.correct_count, report.total_questions
            );
            if let Some(location) = navigator.view().location() {
                info!("结果页: {}", location);
            }
        }

        Ok(summary)
    }

    /// 浏览器模式：在答题页中渲染
    async fn run_in_browser(&self) -> Result<SessionSummary> {
        let target_url = self.config.quiz_id.map(|id| self.config.take_url(id));

        let (_browser, page): (Browser, _) = if self.config.headless {
            let url = target_url.as_deref().unwrap_or("about:blank");
            browser::launch_headless_browser(url, self.config.chrome_executable.as_deref()).await?
        } else {
            browser::connect_to_browser_and_page(self.config.browser_debug_port, target_url.as_deref())
                .await?
        };

        let view = BrowserView::new(JsExecutor::new(page));

        // 指定了文件时使用文件数据并挂载骨架，否则读取页面嵌入的数据
        let (quiz, base_path) = match &self.config.quiz_file {
            Some(_) => {
                view.mount_skeleton().await?;
                (self.load_quiz_from_file().await?, self.config.base_url.clone())
            }
            None => (view.load_embedded_quiz().await?, String::new()),
        };
        logging::log_session_start(quiz.quiz_id, quiz.questions.len(), "browser");

        // 在页面内提交，请求带上浏览器中的登录 Cookie
        let client = PageSubmitClient::new(view.executor().clone(), base_path.as_str());
        let ctx = QuizCtx::new(quiz.quiz_id, base_path);
        let mut navigator = QuizNavigator::new(ctx, quiz.questions, view, client)?
            .with_toast_duration(self.toast_duration());

        navigator.start().await?;
        info!("{}", HELP_TEXT);

        let stdin = BufReader::new(tokio::io::stdin());
        let summary = run_commands(&mut navigator, stdin, |nav| {
            info!("{}", nav.progress().label());
        })
        .await?;

        if !summary.submitted() {
            warn!("会话结束时答卷尚未提交");
        }
        Ok(summary)
    }

    async fn load_quiz_from_file(&self) -> Result<QuizData> {
        let path = self
            .config
            .quiz_file
            .as_deref()
            .ok_or(ConfigError::MissingQuizSource)?;
        Ok(load_quiz_file(Path::new(path)).await?)
    }

    fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.config.toast_duration_ms)
    }
}

/// 把当前题目打印到终端
fn print_memory_view<C: SubmitClient>(navigator: &QuizNavigator<MemoryView, C>) {
    let view = navigator.view();
    println!("\n{}", navigator.progress().label());
    println!("{}", view.render_text());
    let buttons = view.buttons();
    if buttons.submit_visible {
        println!("(最后一题，输入 submit 提交)");
    }
}
