use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::history::{ConversationLog, ConversationRecord};
use crate::knowledge::{KnowledgeEntry, QaPair};
use crate::model::TrainedModel;

/// Scores must be strictly above this to count as a match.
pub const MATCH_THRESHOLD: f64 = 0.30;

pub const NOT_TRAINED_MESSAGE: &str = "Chatbot is not trained yet.";
pub const FALLBACK_MESSAGE: &str = "I'm sorry, I don't have information about that. \
Please contact the university administration for more details.";

pub fn is_confident(score: f64) -> bool {
    score > MATCH_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub answer: String,
    pub similarity_score: f64,
    pub matched_question: Option<String>,
    pub category: Option<String>,
}

impl Answer {
    fn matched(entry: &KnowledgeEntry, score: f64) -> Self {
        Answer {
            answer: entry.answer.clone(),
            similarity_score: score,
            matched_question: Some(entry.question.clone()),
            category: Some(entry.category.clone()),
        }
    }

    fn unmatched(message: &str, score: f64) -> Self {
        Answer {
            answer: message.to_string(),
            similarity_score: score,
            matched_question: None,
            category: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_questions: usize,
    pub knowledge_base_size: usize,
    pub avg_similarity: f64,
    pub is_trained: bool,
    pub vocabulary_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub is_trained: bool,
    pub knowledge_base_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub entries: usize,
    pub vocabulary_size: usize,
}

/// Question-answering engine over a growing knowledge base.
///
/// Training publishes a fresh [`TrainedModel`] in one swap. Queries clone the
/// current `Arc` and never see a half-built model. Writers are serialized by
/// `updates`; the conversation log has its own lock.
pub struct Retriever {
    entries: RwLock<Vec<KnowledgeEntry>>,
    model: RwLock<Option<Arc<TrainedModel>>>,
    history: ConversationLog,
    updates: Mutex<()>,
}

impl Retriever {
    pub fn new() -> Self {
        Retriever {
            entries: RwLock::new(Vec::new()),
            model: RwLock::new(None),
            history: ConversationLog::new(),
            updates: Mutex::new(()),
        }
    }

    /// Appends entries. The current model, if any, keeps serving until the
    /// next call to [`Retriever::train`].
    pub fn add_entries(&self, entries: Vec<KnowledgeEntry>) {
        let _guard = self.updates.lock();
        self.append(entries);
    }

    /// Rebuilds the model from every entry currently held.
    pub fn train(&self) -> Result<TrainingSummary> {
        let _guard = self.updates.lock();
        self.rebuild()
    }

    /// Adds entries and retrains without letting another writer in between.
    pub fn add_and_train(&self, entries: Vec<KnowledgeEntry>) -> Result<TrainingSummary> {
        let _guard = self.updates.lock();
        self.append(entries);
        self.rebuild()
    }

    fn append(&self, entries: Vec<KnowledgeEntry>) {
        let mut current = self.entries.write();
        current.extend(entries);
        info!("Knowledge base now holds {} Q&A pairs", current.len());
    }

    fn rebuild(&self) -> Result<TrainingSummary> {
        let snapshot = self.entries.read().clone();
        let model = TrainedModel::train(snapshot)
            .inspect_err(|e| warn!("Training skipped: {e}"))?;

        let summary = TrainingSummary {
            entries: model.len(),
            vocabulary_size: model.vocabulary_size(),
        };
        *self.model.write() = Some(Arc::new(model));

        info!(
            "Trained on {} Q&A pairs, vocabulary size {}",
            summary.entries, summary.vocabulary_size
        );
        Ok(summary)
    }

    fn current_model(&self) -> Option<Arc<TrainedModel>> {
        self.model.read().clone()
    }

    pub fn is_trained(&self) -> bool {
        self.model.read().is_some()
    }

    /// Answers `text` from the closest stored question.
    ///
    /// Below-threshold scores produce the fallback message, not an error.
    pub fn answer(&self, text: &str) -> Result<Answer> {
        let Some(model) = self.current_model() else {
            return Ok(Answer::unmatched(NOT_TRAINED_MESSAGE, 0.0));
        };

        let (entry, score) = model.closest(text)?;
        let answer = if is_confident(score) {
            Answer::matched(entry, score)
        } else {
            Answer::unmatched(FALLBACK_MESSAGE, score)
        };
        debug!("Query {:?} best match {:?} scored {:.4}", text, entry.question, score);

        self.history.append(ConversationRecord {
            timestamp: Utc::now(),
            question: text.to_string(),
            matched_question: Some(entry.question.clone()),
            similarity_score: score,
        });

        Ok(answer)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total_questions: self.history.len(),
            knowledge_base_size: self.entries.read().len(),
            avg_similarity: self.history.average_similarity(),
            is_trained: self.is_trained(),
            vocabulary_size: self
                .current_model()
                .map_or(0, |model| model.vocabulary_size()),
        }
    }

    /// Entries grouped by category, in first-seen order.
    pub fn topics_by_category(&self) -> IndexMap<String, Vec<QaPair>> {
        let mut topics: IndexMap<String, Vec<QaPair>> = IndexMap::new();
        for entry in self.entries.read().iter() {
            topics
                .entry(entry.category.clone())
                .or_default()
                .push(QaPair::from(entry));
        }
        topics
    }

    pub fn history(&self) -> Vec<ConversationRecord> {
        self.history.snapshot()
    }

    pub fn health(&self) -> Health {
        Health {
            status: "healthy",
            is_trained: self.is_trained(),
            knowledge_base_size: self.entries.read().len(),
        }
    }

    /// Ends the engine's lifetime and hands back the conversation log.
    pub fn teardown(self) -> Vec<ConversationRecord> {
        info!("Shutting down after {} queries", self.history.len());
        self.history.into_records()
    }
}

impl Default for Retriever {
    fn default() -> Self {
        Self::new()
    }
}
