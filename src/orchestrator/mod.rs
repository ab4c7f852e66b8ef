pub mod batch;
pub mod single;

pub use batch::{translate_batch, TranslationRequestField};
pub use single::{translate_single, MAX_TEXT_LENGTH};
