pub mod navigator;
pub mod quiz_ctx;

pub use navigator::{QuizNavigator, SubmitOutcome, DEFAULT_TOAST_DURATION, SUBMIT_ERROR_MESSAGE};
pub use quiz_ctx::QuizCtx;
