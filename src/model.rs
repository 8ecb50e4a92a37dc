use ndarray::Array1;

use crate::error::Result;
use crate::knowledge::KnowledgeEntry;
use crate::similarity::best_match;
use crate::tokenizer::tokenize;
use crate::vectorizer::TfIdfVectorizer;

/// Everything produced by one training pass.
///
/// A model is never edited after construction. Retraining builds a new one,
/// so the vectorizer, the question vectors and the entries they were built
/// from always belong to the same generation.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    vectorizer: TfIdfVectorizer,
    question_vectors: Vec<Array1<f64>>,
    entries: Vec<KnowledgeEntry>,
}

impl TrainedModel {
    pub fn train(entries: Vec<KnowledgeEntry>) -> Result<Self> {
        let documents: Vec<Vec<String>> = entries
            .iter()
            .map(|entry| tokenize(&entry.question))
            .collect();
        let (vectorizer, question_vectors) = TfIdfVectorizer::fit_transform(&documents)?;

        Ok(TrainedModel {
            vectorizer,
            question_vectors,
            entries,
        })
    }

    /// Closest stored entry for `text` and its cosine similarity.
    pub fn closest(&self, text: &str) -> Result<(&KnowledgeEntry, f64)> {
        let query = self.vectorizer.transform(&tokenize(text));
        let (index, score) = best_match(&query, &self.question_vectors)?;
        Ok((&self.entries[index], score))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary().len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
