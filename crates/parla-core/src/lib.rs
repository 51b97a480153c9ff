pub mod language;
pub mod request;
pub mod state;

pub use language::LanguageOption;
pub use request::{RequestError, TranslationRequest};
pub use state::{Action, CopyOutcome, Effect, TranslationState};
