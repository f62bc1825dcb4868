//! TF-IDF feature vectorizer
//!
//! Converts raw text into fixed-dimensionality weighted n-gram frequency
//! vectors. The vocabulary is learned once at training time and is immutable
//! afterwards; out-of-vocabulary n-grams contribute zero weight silently.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Maximum number of n-grams retained in the vocabulary
pub const MAX_FEATURES: usize = 5000;

/// N-grams span 1 to 3 tokens
pub const MAX_NGRAM: usize = 3;

/// An n-gram must occur in at least this many documents to be kept
pub const MIN_DOCUMENT_FREQUENCY: usize = 2;

/// Portuguese stop words removed from the token stream before n-gram assembly
const STOPWORDS_PT: &[&str] = &[
    "a", "o", "e", "de", "da", "do", "em", "um", "uma", "os", "as", "dos", "das",
    "para", "com", "por", "no", "na", "ao", "aos", "à", "às", "é", "que", "se",
    "como", "mais", "foi", "tem", "são", "essa", "esse", "isso", "esta", "este",
    "muito", "já", "também", "só", "pelo", "pela", "ou", "quando", "mesmo", "sem",
];

/// Fitted TF-IDF vectorizer
///
/// `fit` builds the vocabulary (n-gram → column index) and the smoothed
/// inverse document frequency per column; `transform` produces an
/// L2-normalized tf-idf vector of fixed dimensionality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// N-gram → column index
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column
    idf: Vec<f64>,
    /// Number of documents seen during fitting
    n_documents: usize,
}

impl TfidfVectorizer {
    /// Fit a vectorizer on a training corpus
    ///
    /// Counts document frequency per n-gram, discards n-grams below the
    /// minimum document frequency, retains at most [`MAX_FEATURES`] n-grams
    /// by global frequency, and computes `idf = ln((1+N)/(1+df)) + 1`.
    /// Column indices are assigned in lexicographic n-gram order so fitting
    /// is deterministic.
    pub fn fit(documents: &[String]) -> Self {
        let n_documents = documents.len();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut global_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let grams = extract_ngrams(doc);
            let unique: HashSet<&String> = grams.iter().collect();
            for gram in &grams {
                *global_frequency.entry(gram.clone()).or_insert(0) += 1;
            }
            for gram in unique {
                *document_frequency.entry(gram.clone()).or_insert(0) += 1;
            }
        }

        // min_df filter, then cap to the most frequent n-grams overall.
        let mut retained: Vec<String> = document_frequency
            .iter()
            .filter(|(_, &df)| df >= MIN_DOCUMENT_FREQUENCY)
            .map(|(gram, _)| gram.clone())
            .collect();

        if retained.len() > MAX_FEATURES {
            retained.sort_by(|a, b| {
                global_frequency[b]
                    .cmp(&global_frequency[a])
                    .then_with(|| a.cmp(b))
            });
            retained.truncate(MAX_FEATURES);
        }
        retained.sort();

        let vocabulary: HashMap<String, usize> = retained
            .into_iter()
            .enumerate()
            .map(|(idx, gram)| (gram, idx))
            .collect();

        let mut idf = vec![0.0; vocabulary.len()];
        for (gram, &idx) in &vocabulary {
            let df = document_frequency[gram] as f64;
            idf[idx] = ((1.0 + n_documents as f64) / (1.0 + df)).ln() + 1.0;
        }

        Self {
            vocabulary,
            idf,
            n_documents,
        }
    }

    /// Transform a text into an L2-normalized tf-idf vector
    ///
    /// Out-of-vocabulary n-grams are ignored; an empty or fully
    /// out-of-vocabulary text yields the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut weights = vec![0.0; self.vocabulary.len()];

        for gram in extract_ngrams(text) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                weights[idx] += 1.0;
            }
        }

        for (idx, weight) in weights.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        let norm: f64 = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in &mut weights {
                *weight /= norm;
            }
        }

        weights
    }

    /// Transform a whole corpus
    pub fn transform_all(&self, documents: &[String]) -> Vec<Vec<f64>> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Size of the fitted vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

/// Tokenize to lowercase words, drop stop words, assemble 1..=3-gram strings
///
/// Stop words are removed from the token stream before n-gram assembly, so a
/// bigram can span a removed stop word.
fn extract_ngrams(text: &str) -> Vec<String> {
    let tokens: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 2)
        .filter(|w| !STOPWORDS_PT.contains(w))
        .map(str::to_string)
        .collect();

    let mut grams = Vec::new();
    for n in 1..=MAX_NGRAM {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "solicito acesso aos documentos do processo".to_string(),
            "solicito acesso aos relatórios anuais".to_string(),
            "meu nome completo consta no cadastro".to_string(),
            "meu nome completo foi divulgado".to_string(),
        ]
    }

    #[test]
    fn test_fit_builds_vocabulary() {
        let vectorizer = TfidfVectorizer::fit(&corpus());
        assert!(vectorizer.vocabulary_size() > 0);
        assert_eq!(vectorizer.n_documents(), 4);
    }

    #[test]
    fn test_min_df_drops_singletons() {
        let vectorizer = TfidfVectorizer::fit(&corpus());
        // "divulgado" appears in a single document.
        let features = vectorizer.transform("divulgado");
        assert!(features.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_transform_dimensionality_is_fixed() {
        let vectorizer = TfidfVectorizer::fit(&corpus());
        let a = vectorizer.transform("solicito acesso");
        let b = vectorizer.transform("texto completamente diferente");
        assert_eq!(a.len(), vectorizer.vocabulary_size());
        assert_eq!(b.len(), vectorizer.vocabulary_size());
    }

    #[test]
    fn test_out_of_vocabulary_is_silent_zero() {
        let vectorizer = TfidfVectorizer::fit(&corpus());
        let features = vectorizer.transform("xyzabc qwerty");
        assert!(features.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let vectorizer = TfidfVectorizer::fit(&corpus());
        let features = vectorizer.transform("solicito acesso aos documentos");
        let norm: f64 = features.iter().map(|w| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let a = TfidfVectorizer::fit(&corpus());
        let b = TfidfVectorizer::fit(&corpus());
        assert_eq!(a.vocabulary, b.vocabulary);
    }

    #[test]
    fn test_stop_words_removed_from_unigrams() {
        let docs = vec![
            "de acesso para documentos".to_string(),
            "de acesso para relatórios".to_string(),
        ];
        let vectorizer = TfidfVectorizer::fit(&docs);
        // "de" and "para" are stop words; "acesso" survives in both docs.
        let hit = vectorizer.transform("acesso");
        assert!(hit.iter().any(|&w| w > 0.0));
        let miss = vectorizer.transform("de para");
        assert!(miss.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_ngrams_up_to_three_tokens() {
        let grams = extract_ngrams("acesso documentos processo");
        assert!(grams.contains(&"acesso documentos".to_string()));
        assert!(grams.contains(&"acesso documentos processo".to_string()));
    }

    #[test]
    fn test_empty_text_yields_zero_vector() {
        let vectorizer = TfidfVectorizer::fit(&corpus());
        let features = vectorizer.transform("");
        assert!(features.iter().all(|&w| w == 0.0));
    }
}
