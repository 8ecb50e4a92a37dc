use serde::Serialize;
use serde_json::Value;

use crate::error::{ChatbotError, Result};

/// One question/answer pair and the category it was filed under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeEntry {
    pub category: String,
    pub question: String,
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        KnowledgeEntry {
            category: category.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Question/answer view of an entry, as listed per topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl From<&KnowledgeEntry> for QaPair {
    fn from(entry: &KnowledgeEntry) -> Self {
        QaPair {
            question: entry.question.clone(),
            answer: entry.answer.clone(),
        }
    }
}

/// Flattens a `{category: [{question, answer}, ...]}` document into entries.
///
/// Categories and pairs keep their document order. Every pair is validated
/// here so bad data is reported before it reaches training.
pub fn entries_from_grouped(data: &Value) -> Result<Vec<KnowledgeEntry>> {
    let categories = data.as_object().ok_or_else(|| ChatbotError::MalformedEntry {
        category: String::new(),
        index: 0,
        reason: "knowledge data must be an object of categories".to_string(),
    })?;

    let mut entries = Vec::new();
    for (category, pairs) in categories {
        let pairs = pairs.as_array().ok_or_else(|| ChatbotError::MalformedEntry {
            category: category.clone(),
            index: 0,
            reason: "category must hold a list of question/answer pairs".to_string(),
        })?;

        for (index, pair) in pairs.iter().enumerate() {
            let question = required_str(pair, "question", category, index)?;
            let answer = required_str(pair, "answer", category, index)?;
            entries.push(KnowledgeEntry::new(category.as_str(), question, answer));
        }
    }

    Ok(entries)
}

fn required_str<'a>(pair: &'a Value, field: &str, category: &str, index: usize) -> Result<&'a str> {
    match pair.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ChatbotError::MalformedEntry {
            category: category.to_string(),
            index,
            reason: format!("'{field}' must be a string"),
        }),
        None => Err(ChatbotError::MalformedEntry {
            category: category.to_string(),
            index,
            reason: format!("missing '{field}'"),
        }),
    }
}
