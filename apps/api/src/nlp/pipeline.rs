//! Pipeline trait — the seam between request handling and the language model.
//!
//! `AppState` carries an `Arc<dyn TextPipeline>`; tests swap in a lightweight stub.

/// One token produced by a pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Base form of the token.
    pub lemma: String,
    pub is_stop: bool,
}

pub trait TextPipeline: Send + Sync {
    /// Identifier of the loaded model, for logs and the health endpoint.
    fn name(&self) -> &str;

    fn process(&self, text: &str) -> Vec<Token>;
}

/// Runs `text` through the pipeline, drops stop words and joins the
/// surviving base forms with single spaces.
pub fn normalize(pipeline: &dyn TextPipeline, text: &str) -> String {
    pipeline
        .process(text)
        .into_iter()
        .filter(|t| !t.is_stop)
        .map(|t| t.lemma)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace-splitting pipeline with no stop words, used by handler tests.
#[cfg(test)]
pub(crate) struct WhitespacePipeline;

#[cfg(test)]
impl TextPipeline for WhitespacePipeline {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn process(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .map(|w| Token {
                text: w.to_string(),
                lemma: w.to_lowercase(),
                is_stop: false,
            })
            .collect()
    }
}
