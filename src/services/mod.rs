pub mod markup;
pub mod result_view;
pub mod submit_client;

pub use markup::{ButtonState, Progress, Toast, ToastKind};
pub use result_view::{load_stored_report, OutcomeDetail, ResultReport};
pub use submit_client::{HttpSubmitClient, PageSubmitClient, SubmitClient};
