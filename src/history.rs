use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// One answered query as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationRecord {
    pub timestamp: DateTime<Utc>,
    pub question: String,
    pub matched_question: Option<String>,
    pub similarity_score: f64,
}

/// Append-only log of conversation records, in arrival order.
#[derive(Debug, Default)]
pub struct ConversationLog {
    records: Mutex<Vec<ConversationRecord>>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: ConversationRecord) {
        self.records.lock().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Mean similarity over every logged query, 0.0 when nothing is logged.
    pub fn average_similarity(&self) -> f64 {
        let records = self.records.lock();
        if records.is_empty() {
            return 0.0;
        }
        let total: f64 = records.iter().map(|r| r.similarity_score).sum();
        total / records.len() as f64
    }

    pub fn snapshot(&self) -> Vec<ConversationRecord> {
        self.records.lock().clone()
    }

    pub fn into_records(self) -> Vec<ConversationRecord> {
        self.records.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(question: &str, score: f64) -> ConversationRecord {
        ConversationRecord {
            timestamp: Utc::now(),
            question: question.to_string(),
            matched_question: None,
            similarity_score: score,
        }
    }

    #[test]
    fn test_empty_log_average_is_zero() {
        let log = ConversationLog::new();
        assert_eq!(log.len(), 0);
        assert_eq!(log.average_similarity(), 0.0);
    }

    #[test]
    fn test_records_keep_arrival_order() {
        let log = ConversationLog::new();
        log.append(record("first", 0.2));
        log.append(record("second", 0.6));

        let questions: Vec<_> = log.snapshot().into_iter().map(|r| r.question).collect();
        assert_eq!(questions, vec!["first", "second"]);
        assert!((log.average_similarity() - 0.4).abs() < 1e-12);
        assert_eq!(log.into_records().len(), 2);
    }
}
