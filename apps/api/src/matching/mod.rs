// Resume matching: PDF text extraction, corpus-of-two TF-IDF, request handling.
// Files within a request are processed one at a time, each on the blocking pool.

pub mod extract;
pub mod handlers;
pub mod scorer;
pub mod tfidf;
