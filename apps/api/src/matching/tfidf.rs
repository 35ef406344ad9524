//! TF-IDF vectorizer over a closed corpus.
//!
//! The corpus is fit fresh for every comparison, so weights are only meaningful
//! within the documents passed to a single `fit_transform` call.
//!
//! Weighting:
//! - terms: runs of 2+ word characters, lowercased
//! - tf: raw counts
//! - idf: `ln((1 + n) / (1 + df)) + 1`
//! - rows are L2-normalised

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;

use crate::errors::MatchError;

fn term_regex() -> &'static Regex {
    static TERM_RE: OnceLock<Regex> = OnceLock::new();
    TERM_RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static term pattern"))
}

fn terms(doc: &str) -> Vec<String> {
    term_regex()
        .find_iter(doc)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// One weighted row per input document; columns follow the sorted vocabulary.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    rows: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }
}

/// Builds the vocabulary from `docs` and returns their weighted vectors.
/// Fails with `EmptyVocabulary` when no document contributes a single term.
pub fn fit_transform(docs: &[&str]) -> Result<TfIdfMatrix, MatchError> {
    let tokenized: Vec<Vec<String>> = docs.iter().map(|d| terms(d)).collect();

    let mut vocabulary: BTreeMap<String, usize> = tokenized
        .iter()
        .flatten()
        .map(|t| (t.clone(), 0))
        .collect();
    if vocabulary.is_empty() {
        return Err(MatchError::EmptyVocabulary);
    }
    for (index, slot) in vocabulary.values_mut().enumerate() {
        *slot = index;
    }

    let n = docs.len() as f64;
    let mut df = vec![0usize; vocabulary.len()];
    let counts: Vec<HashMap<usize, usize>> = tokenized
        .iter()
        .map(|doc_terms| {
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for term in doc_terms {
                *counts.entry(vocabulary[term]).or_insert(0) += 1;
            }
            for column in counts.keys() {
                df[*column] += 1;
            }
            counts
        })
        .collect();

    let idf: Vec<f64> = df
        .iter()
        .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
        .collect();

    let rows = counts
        .into_iter()
        .map(|doc_counts| {
            let mut row = vec![0.0; vocabulary.len()];
            for (column, count) in doc_counts {
                row[column] = count as f64 * idf[column];
            }
            let norm = l2_norm(&row);
            if norm > 0.0 {
                row.iter_mut().for_each(|w| *w /= norm);
            }
            row
        })
        .collect();

    Ok(TfIdfMatrix { rows })
}

fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine of the angle between `a` and `b`; 0.0 when either has zero length.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}
