pub mod page_loader;
pub mod toml_loader;

pub use page_loader::parse_embedded_quiz;
pub use toml_loader::{load_quiz_file, load_toml_to_quiz};
