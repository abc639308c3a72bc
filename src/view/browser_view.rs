//! 浏览器页面视图
//!
//! 每个操作都转成一段 JS，经 `JsExecutor` 在答题页中执行

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, AppResult, ViewError};
use crate::infrastructure::{js_string, JsExecutor};
use crate::models::question::{AnswerId, Question, QuestionId, QuizData};
use crate::services::markup::{ButtonState, Toast};
use crate::view::QuizView;

const CONTAINER_ID: &str = "quizContainer";
const PROGRESS_ID: &str = "questionProgress";
const PREV_ID: &str = "prevQuestionBtn";
const NEXT_ID: &str = "nextQuestionBtn";
const SUBMIT_ID: &str = "submitQuizBtn";

/// 空白页上挂载的答题页骨架
const SKELETON: &str = r#"
<div id="questionProgress"></div>
<div id="quizContainer"></div>
<div class="quiz-actions">
    <button id="prevQuestionBtn" type="button">Previous</button>
    <button id="nextQuestionBtn" type="button">Next</button>
    <button id="submitQuizBtn" type="button" style="display: none">Submit</button>
</div>"#;

#[derive(Debug, Deserialize)]
struct EmbeddedQuiz {
    #[serde(rename = "quizId")]
    quiz_id: Option<serde_json::Value>,
    questions: Option<Vec<Question>>,
}

#[derive(Debug, Deserialize)]
struct StoredItem {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToggleState {
    found: bool,
    checked: bool,
}

pub struct BrowserView {
    executor: JsExecutor,
}

impl BrowserView {
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &JsExecutor {
        &self.executor
    }

    /// 读取页面脚本中嵌入的 `quizId` 和 `questions` 全局变量
    pub async fn load_embedded_quiz(&self) -> AppResult<QuizData> {
        let embedded: EmbeddedQuiz = self
            .executor
            .eval_as(
                r#"(() => ({
                    quizId: typeof quizId === 'undefined' ? null : quizId,
                    questions: typeof questions === 'undefined' ? null : questions
                }))()"#,
            )
            .await?;

        let quiz_id = embedded
            .quiz_id
            .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
            .ok_or_else(|| ViewError::MissingEmbeddedData {
                detail: "quizId".to_string(),
            })?;
        let questions = embedded.questions.ok_or_else(|| ViewError::MissingEmbeddedData {
            detail: "questions".to_string(),
        })?;

        Ok(QuizData {
            quiz_id,
            title: None,
            questions,
        })
    }

    /// 页面上没有答题区域时（例如 about:blank），挂载骨架
    pub async fn mount_skeleton(&self) -> AppResult<()> {
        let js = format!(
            r#"(() => {{
                if (!document.getElementById({container})) {{
                    const root = document.createElement('div');
                    root.className = 'quiz-root';
                    root.innerHTML = {skeleton};
                    document.body.appendChild(root);
                }}
                return true;
            }})()"#,
            container = js_string(CONTAINER_ID),
            skeleton = js_string(SKELETON),
        );
        self.executor.run(js).await
    }

    /// 执行操作某个元素的脚本，元素不存在时报错
    async fn with_element(&self, id: &str, body: &str) -> AppResult<()> {
        let found: bool = self.executor.eval_as(element_script(id, body)).await?;
        if found {
            Ok(())
        } else {
            Err(AppError::element_not_found(format!("#{}", id)))
        }
    }
}

impl QuizView for BrowserView {
    async fn render_question(&mut self, _question: &Question, markup: &str) -> AppResult<()> {
        self.with_element(CONTAINER_ID, &format!("el.innerHTML = {};", js_string(markup)))
            .await
    }

    async fn set_checked(&mut self, question_id: QuestionId, answer_ids: &[AnswerId]) -> AppResult<()> {
        let ids = serde_json::to_string(answer_ids)?;
        self.executor.run(set_checked_script(question_id, &ids)).await
    }

    async fn checked_answers(&self, question_id: QuestionId) -> AppResult<Vec<AnswerId>> {
        self.executor.eval_as(checked_answers_script(question_id)).await
    }

    async fn render_progress(&mut self, markup: &str) -> AppResult<()> {
        self.with_element(PROGRESS_ID, &format!("el.innerHTML = {};", js_string(markup)))
            .await
    }

    async fn set_buttons(&mut self, state: ButtonState) -> AppResult<()> {
        self.with_element(PREV_ID, &format!("el.disabled = {};", state.prev_disabled))
            .await?;
        self.with_element(NEXT_ID, &format!("el.disabled = {};", state.next_disabled))
            .await?;
        let display = if state.submit_visible { "block" } else { "none" };
        self.with_element(SUBMIT_ID, &format!("el.style.display = '{}';", display))
            .await
    }

    async fn show_toast(&mut self, toast: &Toast) -> AppResult<()> {
        debug!("显示提示: {}", toast.message);
        let js = format!(
            r#"(() => {{
                const toast = document.createElement('div');
                toast.className = {class};
                toast.textContent = {message};
                document.body.appendChild(toast);
                setTimeout(() => {{
                    toast.classList.add('show');
                    setTimeout(() => toast.remove(), {duration});
                }}, 100);
                return true;
            }})()"#,
            class = js_string(&toast.class_name()),
            message = js_string(&toast.message),
            duration = toast.duration.as_millis(),
        );
        self.executor.run(js).await
    }

    async fn store_session_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.executor.run(store_session_script(key, value)).await
    }

    async fn session_item(&self, key: &str) -> AppResult<Option<String>> {
        let item: StoredItem = self.executor.eval_as(session_item_script(key)).await?;
        Ok(item.value)
    }

    async fn navigate(&mut self, url: &str) -> AppResult<()> {
        let js = format!(
            "(() => {{ window.location.href = {}; return true; }})()",
            js_string(url)
        );
        self.executor.run(js).await
    }

    async fn toggle_answer(&mut self, question_id: QuestionId, answer_id: AnswerId) -> AppResult<bool> {
        let state: ToggleState = self
            .executor
            .eval_as(toggle_answer_script(question_id, answer_id))
            .await?;
        if !state.found {
            return Err(ViewError::UnknownAnswer {
                question_id,
                answer_id,
            }
            .into());
        }
        Ok(state.checked)
    }
}

fn element_script(id: &str, body: &str) -> String {
    format!(
        r#"(() => {{
            const el = document.getElementById({id});
            if (!el) return false;
            {body}
            return true;
        }})()"#,
        id = js_string(id),
        body = body,
    )
}

/// 勾选只作用于该题的输入框
fn set_checked_script(question_id: QuestionId, ids_json: &str) -> String {
    format!(
        r#"(() => {{
            for (const id of {ids}) {{
                const input = document.querySelector(`input[name="q-{qid}"][value="${{id}}"]`);
                if (input) input.checked = true;
            }}
            return true;
        }})()"#,
        ids = ids_json,
        qid = question_id,
    )
}

fn checked_answers_script(question_id: QuestionId) -> String {
    format!(
        r#"Array.from(document.querySelectorAll('input[name="q-{}"]:checked')).map(i => parseInt(i.value, 10))"#,
        question_id
    )
}

fn toggle_answer_script(question_id: QuestionId, answer_id: AnswerId) -> String {
    format!(
        r#"(() => {{
            const input = document.querySelector('input[name="q-{qid}"][value="{aid}"]');
            if (!input) return {{ found: false, checked: false }};
            input.click();
            return {{ found: true, checked: input.checked }};
        }})()"#,
        qid = question_id,
        aid = answer_id,
    )
}

fn store_session_script(key: &str, value: &str) -> String {
    format!(
        "(() => {{ sessionStorage.setItem({}, {}); return true; }})()",
        js_string(key),
        js_string(value)
    )
}

/// 包一层对象，避免顶层 null 没有返回值
fn session_item_script(key: &str) -> String {
    format!("({{ value: sessionStorage.getItem({}) }})", js_string(key))
}
