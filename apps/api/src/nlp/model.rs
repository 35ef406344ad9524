//! Language model — resolves a configured identifier to a stemmer and stop-word list.
//!
//! Loaded once in `main`; a name that cannot be resolved stops the process before
//! the listener is bound.

use std::collections::HashSet;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use thiserror::Error;

use crate::nlp::pipeline::{TextPipeline, Token};
use crate::nlp::stopwords;

/// Contractions split into stem and clitic (`do` + `n't`, `we` + `'ve`),
/// then word runs plus single punctuation marks.
const TOKEN_PATTERN: &str =
    r"(?i)(\w+?)(n['‘’]t)\b|['‘’](?:ve|ll|re|m|d|s)\b|\w+|[^\w\s]";

/// Model identifiers accepted for the English pipeline.
const ENGLISH_MODELS: &[&str] = &[
    "en",
    "english",
    "en_core_web_sm",
    "en_core_web_md",
    "en_core_web_lg",
    "en_core_web_trf",
];

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unknown language model '{0}'")]
    UnknownModel(String),

    #[error("Invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub struct LanguageModel {
    name: String,
    stemmer: Stemmer,
    stop_words: HashSet<&'static str>,
    token_re: Regex,
}

impl LanguageModel {
    pub fn load(name: &str) -> Result<Self, ModelError> {
        let normalized = name.trim().to_lowercase();
        if !ENGLISH_MODELS.contains(&normalized.as_str()) {
            return Err(ModelError::UnknownModel(name.to_string()));
        }

        Ok(LanguageModel {
            name: normalized,
            stemmer: Stemmer::create(Algorithm::English),
            stop_words: stopwords::ENGLISH.iter().copied().collect(),
            token_re: Regex::new(TOKEN_PATTERN)?,
        })
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    fn token(&self, text: &str) -> Token {
        let lower = text.to_lowercase();
        let is_stop = self.stop_words.contains(lower.as_str());
        let lemma = if lower.chars().all(|c| c.is_alphanumeric() || c == '_') {
            self.stemmer.stem(&lower).into_owned()
        } else {
            lower
        };

        Token {
            text: text.to_string(),
            lemma,
            is_stop,
        }
    }
}

impl TextPipeline for LanguageModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for caps in self.token_re.captures_iter(text) {
            match (caps.get(1), caps.get(2)) {
                (Some(stem), Some(clitic)) => {
                    tokens.push(self.token(stem.as_str()));
                    tokens.push(self.token(clitic.as_str()));
                }
                _ => tokens.push(self.token(&caps[0])),
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::normalize;

    fn english() -> LanguageModel {
        LanguageModel::load("en_core_web_lg").unwrap()
    }

    #[test]
    fn test_load_accepts_english_identifiers() {
        for name in ["en", "English", " en_core_web_sm "] {
            assert!(LanguageModel::load(name).is_ok(), "{name} should load");
        }
    }

    #[test]
    fn test_load_rejects_unknown_model() {
        let err = LanguageModel::load("fr_core_news_sm").err().unwrap();
        assert!(matches!(err, ModelError::UnknownModel(ref n) if n == "fr_core_news_sm"));
    }

    #[test]
    fn test_process_marks_stop_words_and_base_forms() {
        let tokens = english().process("The engineers were running tests.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["The", "engineers", "were", "running", "tests", "."]);

        assert!(tokens[0].is_stop);
        assert!(tokens[2].is_stop);
        assert!(!tokens[3].is_stop);
        assert_eq!(tokens[3].lemma, "run");
        assert_eq!(tokens[4].lemma, "test");
        assert_eq!(tokens[5].lemma, ".");
    }

    #[test]
    fn test_contractions_split_into_stop_clitics() {
        let tokens = english().process("I don't think we've met");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["I", "do", "n't", "think", "we", "'ve", "met"]);
        assert!(tokens[1].is_stop && tokens[2].is_stop && tokens[5].is_stop);
    }

    #[test]
    fn test_curly_apostrophe_contractions() {
        let model = english();
        assert_eq!(normalize(&model, "You’ll love it, isn’t it"), "love ,");
    }

    #[test]
    fn test_normalize_with_english_model() {
        let model = english();
        assert_eq!(normalize(&model, "Building the APIs"), "build api");
        assert_eq!(normalize(&model, "the and of"), "");
    }

    #[test]
    fn test_stop_word_list_is_loaded() {
        assert!(english().stop_word_count() > 250);
    }
}
