//! Static quiz content: the authoring model and on-disk catalog loading.

/// Catalog loading and validation.
pub mod loader;
/// Quiz, question, and answer definitions.
pub mod models;

pub use self::loader::QuizCatalog;
pub use self::models::{Answer, MAX_ANSWERS_PER_QUESTION, Question, Quiz};
