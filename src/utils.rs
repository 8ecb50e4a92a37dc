use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use crate::history::ConversationRecord;
use crate::knowledge::{KnowledgeEntry, QaPair, entries_from_grouped};
use crate::retriever::{Answer, Stats};

/// Reads a grouped `{category: [{question, answer}]}` JSON file into entries.
pub async fn load_knowledge(path: impl AsRef<Path>) -> Result<Vec<KnowledgeEntry>> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let data: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let entries = entries_from_grouped(&data)
        .with_context(|| format!("invalid knowledge data in {}", path.display()))?;
    Ok(entries)
}

pub const HELP_TEXT: &str = "\
Commands:
  help          show this menu
  topics        list every question by category
  stats         show chatbot statistics
  history       show this session's questions
  health        show engine status
  :add <file>   load another knowledge file and retrain
  :stage <file> load a knowledge file without retraining
  :retrain      rebuild the model from every loaded entry
  quit          exit

Anything else is treated as a question.";

/// Formats an answer; unmatched answers also suggest the known categories.
pub fn render_answer(answer: &Answer, topics: &IndexMap<String, Vec<QaPair>>) -> String {
    let mut out = format!("Bot: {}\n", answer.answer);
    match (&answer.matched_question, &answer.category) {
        (Some(question), Some(category)) => {
            let _ = write!(
                out,
                "   matched [{category}] \"{question}\" (score {:.3})",
                answer.similarity_score
            );
        }
        _ => {
            let _ = write!(out, "   no confident match (score {:.3})", answer.similarity_score);
            if !topics.is_empty() {
                out.push_str("\n   Try asking about:");
                for category in topics.keys() {
                    let _ = write!(out, "\n      - {category}");
                }
                out.push_str("\n   Type 'help' for more options");
            }
        }
    }
    out
}

pub fn render_topics(topics: &IndexMap<String, Vec<QaPair>>) -> String {
    if topics.is_empty() {
        return "No topics loaded.".to_string();
    }
    let mut out = String::from("Available topics:\n");
    for (category, pairs) in topics {
        let _ = writeln!(out, "\n{}:", category.to_uppercase());
        for pair in pairs {
            let _ = writeln!(out, "  - {}", pair.question);
        }
    }
    out
}

pub fn render_stats(stats: &Stats, topics: &IndexMap<String, Vec<QaPair>>) -> String {
    let mut out = format!(
        "Questions asked: {}\nKnowledge base size: {}\nAverage similarity: {:.3}\nTrained: {}\nVocabulary size: {}\nCategories: {}",
        stats.total_questions,
        stats.knowledge_base_size,
        stats.avg_similarity,
        stats.is_trained,
        stats.vocabulary_size,
        topics.len()
    );
    for (category, pairs) in topics {
        let _ = write!(out, "\n  - {category}: {} questions", pairs.len());
    }
    out
}

pub fn render_history(records: &[ConversationRecord]) -> String {
    if records.is_empty() {
        return "No questions asked yet.".to_string();
    }
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{} {:?} -> {} ({:.3})",
            record.timestamp.format("%H:%M:%S"),
            record.question,
            record.matched_question.as_deref().unwrap_or("no match"),
            record.similarity_score
        );
    }
    out
}
