// Language pipeline: tokenization, base forms, stop words.
// The model is loaded once at startup and shared read-only through `AppState`.

pub mod model;
pub mod pipeline;
pub mod stopwords;

pub use model::LanguageModel;
pub use pipeline::{normalize, TextPipeline};
