pub mod answer_state;
pub mod loaders;
pub mod question;
pub mod quiz_result;

pub use answer_state::AnswerState;
pub use loaders::{load_quiz_file, parse_embedded_quiz};
pub use question::{Answer, AnswerId, Question, QuestionId, QuizData};
pub use quiz_result::{QuestionOutcome, QuizResult, SubmitResponse};
