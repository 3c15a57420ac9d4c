// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TF-IDF similarity index over stored questions.
//!
//! Terms are word n-grams (1..=`max_ngram`) built from runs of two or more
//! word characters. The vocabulary keeps the `max_features` most frequent
//! terms across the corpus. Weights are raw term counts times the smoothed
//! IDF `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalized.
//!
//! The index is rebuilt wholesale on every corpus mutation. For corpora in
//! the low thousands this is cheap; an incremental variant would only need
//! to touch `df` counts and the affected vectors.

use std::collections::HashMap;
use std::sync::LazyLock;

use autodidact_config::model::IndexConfig;
use regex::Regex;

/// Below this many entries no index is built and fuzzy matching is off.
pub const MIN_INDEXED_ENTRIES: usize = 3;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Sparse vector as `(term id, weight)` pairs sorted by term id.
type SparseVector = Vec<(usize, f64)>;

/// Lower-cased word tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// All word n-grams of `tokens` for n in `1..=max_ngram`.
pub fn ngrams(tokens: &[String], max_ngram: usize) -> Vec<String> {
    let mut terms = Vec::new();
    for n in 1..=max_ngram.max(1) {
        if n > tokens.len() {
            break;
        }
        terms.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    terms
}

/// A fitted TF-IDF model plus one vector per indexed question.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
    max_ngram: usize,
}

impl SimilarityIndex {
    /// Fit the model on `questions`, in corpus order.
    ///
    /// Returns `None` when there are fewer than [`MIN_INDEXED_ENTRIES`]
    /// questions.
    pub fn build<S: AsRef<str>>(questions: &[S], config: &IndexConfig) -> Option<Self> {
        if questions.len() < MIN_INDEXED_ENTRIES {
            return None;
        }

        let documents: Vec<Vec<String>> = questions
            .iter()
            .map(|q| ngrams(&tokenize(q.as_ref()), config.max_ngram))
            .collect();

        let mut frequency: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for terms in &documents {
            let mut seen: Vec<&str> = Vec::with_capacity(terms.len());
            for term in terms {
                *frequency.entry(term.as_str()).or_default() += 1;
                if !seen.contains(&term.as_str()) {
                    seen.push(term.as_str());
                    *document_frequency.entry(term.as_str()).or_default() += 1;
                }
            }
        }

        // Most frequent first, alphabetical among equals.
        let mut ranked: Vec<(&str, usize)> = frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(config.max_features);
        // Term ids follow alphabetical order.
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (id, (term, _)) in ranked.iter().enumerate() {
            let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
            vocabulary.insert(term.to_string(), id);
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
        }

        let mut index = Self {
            vocabulary,
            idf,
            vectors: Vec::with_capacity(documents.len()),
            max_ngram: config.max_ngram,
        };
        index.vectors = documents.iter().map(|terms| index.weigh(terms)).collect();
        Some(index)
    }

    /// Number of indexed questions.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in terms {
            if let Some(&id) = self.vocabulary.get(term) {
                *counts.entry(id).or_default() += 1.0;
            }
        }
        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(id, count)| (id, count * self.idf[id]))
            .collect();
        vector.sort_by_key(|(id, _)| *id);

        let norm = norm(&vector);
        if norm > 0.0 {
            for (_, weight) in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }

    /// Best-scoring indexed question for `text` as `(position, cosine)`.
    ///
    /// Ties go to the lowest position. A text sharing no vocabulary with the
    /// corpus scores 0 against everything.
    pub fn query(&self, text: &str) -> Option<(usize, f64)> {
        let probe = self.weigh(&ngrams(&tokenize(text), self.max_ngram));
        let mut best: Option<(usize, f64)> = None;
        for (position, vector) in self.vectors.iter().enumerate() {
            let score = cosine_similarity(&probe, vector);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((position, score)),
            }
        }
        best
    }
}

fn norm(vector: &[(usize, f64)]) -> f64 {
    vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
}

/// Cosine similarity of two sparse vectors sorted by term id.
///
/// Returns 0.0 if either vector has zero norm.
pub fn cosine_similarity(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (norm_a, norm_b) = (norm(a), norm(b));
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let (mut i, mut j, mut dot) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot / (norm_a * norm_b)
}
