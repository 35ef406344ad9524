//! Resume ↔ job description similarity.
//!
//! Both texts are normalized through the injected pipeline (base forms, stop words
//! dropped), vectorized as a corpus of exactly two documents and compared by cosine.
//! Scores are therefore only comparable within one resume/description pair.

use crate::errors::MatchError;
use crate::matching::extract::extract_pdf_text;
use crate::matching::tfidf::{cosine_similarity, fit_transform};
use crate::nlp::{normalize, TextPipeline};

/// Similarity of `resume` to `job_description` as a percentage in [0, 100],
/// rounded to two decimals.
pub fn score_texts(
    pipeline: &dyn TextPipeline,
    resume: &str,
    job_description: &str,
) -> Result<f64, MatchError> {
    let resume_clean = normalize(pipeline, resume);
    let job_clean = normalize(pipeline, job_description);

    let matrix = fit_transform(&[resume_clean.as_str(), job_clean.as_str()])?;
    let similarity = cosine_similarity(matrix.row(0), matrix.row(1));

    Ok(round2(similarity * 100.0).clamp(0.0, 100.0))
}

/// Extraction followed by scoring for one uploaded file. Runs inside `spawn_blocking`.
pub fn score_resume(
    pipeline: &dyn TextPipeline,
    pdf_bytes: &[u8],
    job_description: &str,
) -> Result<f64, MatchError> {
    let resume_text = extract_pdf_text(pdf_bytes)?;
    score_texts(pipeline, &resume_text, job_description)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
