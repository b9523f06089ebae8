//! TF-IDF vectorizer over a small, fixed set of documents.
//!
//! Built fresh per call; there is no persistent index. Weighting follows the usual
//! conventions: raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, and
//! L2-normalized rows.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::scoring::stop_words::is_stop_word;

/// Tokens are runs of two or more word characters.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

#[derive(Debug, Error, PartialEq)]
pub enum VectorizeError {
    #[error("no documents to vectorize")]
    NoDocuments,

    #[error("empty vocabulary; documents may only contain stop words")]
    EmptyVocabulary,
}

#[derive(Debug, Clone, Copy)]
pub struct TfidfOptions {
    /// Largest n-gram length (1 = unigrams only, 2 = unigrams and bigrams).
    pub max_ngram: usize,
    /// Vocabulary cap; keeps the terms with the highest total count across documents.
    pub max_features: usize,
}

/// Dense document-term matrix. Features are sorted alphabetically.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    features: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    pub fn row(&self, doc: usize) -> Option<&[f64]> {
        self.rows.get(doc).map(Vec::as_slice)
    }

    /// Features of one document ranked by descending weight. Ties keep alphabetical order.
    pub fn ranked_features(&self, doc: usize) -> Vec<(&str, f64)> {
        let Some(row) = self.rows.get(doc) else {
            return vec![];
        };
        let mut ranked: Vec<(&str, f64)> = self
            .features
            .iter()
            .map(String::as_str)
            .zip(row.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// Fits a vocabulary on `documents` and returns their TF-IDF rows.
pub fn fit_transform(
    documents: &[&str],
    options: &TfidfOptions,
) -> Result<TfidfMatrix, VectorizeError> {
    if documents.is_empty() {
        return Err(VectorizeError::NoDocuments);
    }

    let doc_counts: Vec<HashMap<String, usize>> = documents
        .iter()
        .map(|doc| count_terms(&analyze(doc, options.max_ngram)))
        .collect();

    // BTreeMap keeps candidates alphabetical so the stable sort below breaks ties by term.
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    for counts in &doc_counts {
        for (term, count) in counts {
            *totals.entry(term.as_str()).or_insert(0) += count;
        }
    }

    if totals.is_empty() {
        return Err(VectorizeError::EmptyVocabulary);
    }

    let mut candidates: Vec<(&str, usize)> = totals.into_iter().collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.truncate(options.max_features);

    let mut features: Vec<String> = candidates.iter().map(|(t, _)| t.to_string()).collect();
    features.sort();

    let n_docs = documents.len() as f64;
    let idf: Vec<f64> = features
        .iter()
        .map(|term| {
            let df = doc_counts.iter().filter(|c| c.contains_key(term)).count() as f64;
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    let rows = doc_counts
        .iter()
        .map(|counts| {
            let mut row: Vec<f64> = features
                .iter()
                .zip(&idf)
                .map(|(term, idf)| *counts.get(term).unwrap_or(&0) as f64 * idf)
                .collect();
            l2_normalize(&mut row);
            row
        })
        .collect();

    Ok(TfidfMatrix { features, rows })
}

/// Cosine of the angle between two vectors. Zero vectors give 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Tokenizes, drops stop words, then builds n-grams from what is left.
fn analyze(doc: &str, max_ngram: usize) -> Vec<String> {
    let tokens: Vec<&str> = TOKEN_RE
        .find_iter(doc)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .collect();

    let mut terms: Vec<String> = Vec::new();
    for n in 1..=max_ngram.max(1) {
        if n > tokens.len() {
            break;
        }
        terms.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    terms
}

fn count_terms(terms: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term.clone()).or_insert(0) += 1;
    }
    counts
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|x| *x /= norm);
    }
}
