use ndarray::Array1;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{ChatbotError, Result};

/// Term index built from a training corpus.
///
/// Indices follow the ascending lexicographic order of the terms, so the
/// same corpus always yields the same layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Vocabulary { terms, index }
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[cfg(test)]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Inverse document frequency per training term: `ln(N / df)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdfTable {
    weights: FxHashMap<String, f64>,
}

impl IdfTable {
    /// Weight of `term`, 0 for terms never seen during training.
    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }
}

/// Builds the vocabulary and IDF table from tokenized training documents.
///
/// Everything is derived from `documents` alone; nothing carries over from a
/// previous call.
pub fn fit(documents: &[Vec<String>]) -> Result<(Vocabulary, IdfTable)> {
    if documents.is_empty() {
        return Err(ChatbotError::EmptyCorpus);
    }

    let doc_count = documents.len() as f64;
    let mut doc_freq: FxHashMap<&str, usize> = FxHashMap::default();

    for tokens in documents {
        let unique: FxHashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    let mut terms: Vec<String> = doc_freq.keys().map(|term| term.to_string()).collect();
    terms.sort();

    let weights = doc_freq
        .iter()
        .map(|(term, &df)| (term.to_string(), (doc_count / df as f64).ln()))
        .collect();

    Ok((Vocabulary::from_sorted(terms), IdfTable { weights }))
}

/// Encodes a token list as a TF-IDF vector in the space of `vocabulary`.
///
/// Shared by training documents and queries so both land in the same space.
/// An empty token list gives the all-zero vector.
pub fn encode(tokens: &[String], vocabulary: &Vocabulary, idf: &IdfTable) -> Array1<f64> {
    let mut tfidf = Array1::<f64>::zeros(vocabulary.len());
    if tokens.is_empty() {
        return tfidf;
    }

    let mut term_freq: FxHashMap<&str, f64> = FxHashMap::default();
    for token in tokens {
        *term_freq.entry(token.as_str()).or_insert(0.0) += 1.0;
    }

    let tokens_count = tokens.len() as f64;
    for (term, count) in term_freq {
        if let Some(i) = vocabulary.index_of(term) {
            tfidf[i] = (count / tokens_count) * idf.weight(term);
        }
    }

    tfidf
}

/// A fitted vocabulary and IDF table, used to encode queries after training.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfVectorizer {
    vocabulary: Vocabulary,
    idf: IdfTable,
}

impl TfIdfVectorizer {
    /// Fits on `documents` and returns the vectorizer together with the
    /// encoded documents, in input order.
    pub fn fit_transform(documents: &[Vec<String>]) -> Result<(Self, Vec<Array1<f64>>)> {
        let (vocabulary, idf) = fit(documents)?;
        let vectorizer = TfIdfVectorizer { vocabulary, idf };
        let vectors = documents
            .iter()
            .map(|tokens| vectorizer.transform(tokens))
            .collect();
        Ok((vectorizer, vectors))
    }

    pub fn transform(&self, tokens: &[String]) -> Array1<f64> {
        encode(tokens, &self.vocabulary, &self.idf)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}
