//! 答卷提交客户端 - 业务能力层
//!
//! 只负责把作答状态发给服务器并取回 JSON，不判断成功与否。
//! 测验服务要求登录：浏览器模式在页面内 fetch 以携带登录 Cookie，
//! 终端模式通过 `QUIZ_SESSION_COOKIE` 手动附带会话 Cookie。

use std::time::Duration;

use reqwest::header::COOKIE;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::infrastructure::{js_string, JsExecutor};
use crate::models::answer_state::AnswerState;

/// 提交能力
#[allow(async_fn_in_trait)]
pub trait SubmitClient {
    /// 发送一次提交请求，返回响应体 JSON
    async fn submit(&self, quiz_id: i64, answers: &AnswerState) -> AppResult<JsonValue>;
}

/// 提交地址: `{base}/quizzes/{quiz_id}/submit`
fn submit_url(base: &str, quiz_id: i64) -> String {
    format!("{}/quizzes/{}/submit", base.trim_end_matches('/'), quiz_id)
}

/// 解析响应体；不看状态码，失败时服务器同样返回 JSON
fn parse_submit_body(endpoint: &str, status: u16, text: &str) -> AppResult<JsonValue> {
    serde_json::from_str(text).map_err(|e| {
        AppError::Api(ApiError::InvalidBody {
            endpoint: endpoint.to_string(),
            status,
            source: Box::new(e),
        })
    })
}

/// 基于 reqwest 的提交客户端
pub struct HttpSubmitClient {
    client: reqwest::Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl HttpSubmitClient {
    /// 创建新的提交客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn submit_url(&self, quiz_id: i64) -> String {
        submit_url(&self.base_url, quiz_id)
    }
}

impl SubmitClient for HttpSubmitClient {
    async fn submit(&self, quiz_id: i64, answers: &AnswerState) -> AppResult<JsonValue> {
        let url = self.submit_url(quiz_id);
        debug!("提交答卷 Payload: {}", answers.to_json_body()?);

        // .json() 会设置 Content-Type: application/json
        let mut request = self.client.post(&url).json(answers);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&url, e))?;

        // 未登录时会被重定向到登录页，报错时使用最终地址
        let final_url = response.url().to_string();
        if final_url != url {
            warn!("提交请求被重定向到 {}，会话可能未登录", final_url);
        }
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&final_url, e))?;

        debug!("提交结果 ({}): {}", status, text);
        parse_submit_body(&final_url, status.as_u16(), &text)
    }
}

/// 页面内 fetch 的返回
#[derive(Debug, Deserialize)]
struct FetchReply {
    status: Option<u16>,
    url: Option<String>,
    text: Option<String>,
    error: Option<String>,
}

/// 在答题页中通过 fetch 提交，随请求带上页面的登录 Cookie
pub struct PageSubmitClient {
    executor: JsExecutor,
    base_path: String,
}

impl PageSubmitClient {
    /// `base_path` 为空时使用相对路径，由页面所在的服务处理
    pub fn new(executor: JsExecutor, base_path: impl Into<String>) -> Self {
        Self {
            executor,
            base_path: base_path.into(),
        }
    }

    pub fn submit_url(&self, quiz_id: i64) -> String {
        submit_url(&self.base_path, quiz_id)
    }
}

impl SubmitClient for PageSubmitClient {
    async fn submit(&self, quiz_id: i64, answers: &AnswerState) -> AppResult<JsonValue> {
        let url = self.submit_url(quiz_id);
        let body = answers.to_json_body()?;
        debug!("页面内提交答卷 Payload: {}", body);

        let reply: FetchReply = self.executor.eval_as(build_submit_script(&url, &body)).await?;
        interpret_fetch_reply(&url, reply)
    }
}

/// 生成页面内提交脚本
fn build_submit_script(url: &str, body: &str) -> String {
    format!(
        r#"
        (async () => {{
            try {{
                const response = await fetch({url}, {{
                    method: 'POST',
                    headers: {{ 'Content-Type': 'application/json' }},
                    credentials: 'include',
                    body: {body}
                }});
                return {{ status: response.status, url: response.url, text: await response.text() }};
            }} catch (error) {{
                return {{ error: error.message }};
            }}
        }})()
        "#,
        url = js_string(url),
        body = js_string(body),
    )
}

fn interpret_fetch_reply(url: &str, reply: FetchReply) -> AppResult<JsonValue> {
    if let Some(error) = reply.error {
        return Err(AppError::Api(ApiError::RequestFailed {
            endpoint: url.to_string(),
            source: error.into(),
        }));
    }

    let endpoint = reply.url.filter(|u| !u.is_empty()).unwrap_or_else(|| url.to_string());
    let status = reply.status.unwrap_or_default();
    debug!("提交结果 ({}): {}", status, reply.text.as_deref().unwrap_or(""));
    parse_submit_body(&endpoint, status, reply.text.as_deref().unwrap_or(""))
}
