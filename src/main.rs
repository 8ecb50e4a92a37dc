mod config;
mod error;
mod history;
mod knowledge;
mod model;
mod retriever;
mod similarity;
mod tokenizer;
mod utils;
mod vectorizer;

use anyhow::Result;
use config::AppConfig;
use retriever::Retriever;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

async fn load_file(retriever: &Retriever, path: &str, retrain: bool) -> Result<String> {
    let entries = utils::load_knowledge(path).await?;
    let count = entries.len();
    if !retrain {
        retriever.add_entries(entries);
        return Ok(format!("Staged {count} Q&A pairs from {path}; run :retrain to use them"));
    }
    let summary = retriever.add_and_train(entries)?;
    Ok(format!(
        "Loaded {count} Q&A pairs from {path}: {} in total, vocabulary size {}",
        summary.entries, summary.vocabulary_size
    ))
}

/// Runs one REPL line. Commands that touch files start with ':' so that no
/// question is ever mistaken for one.
async fn handle_line(retriever: &Retriever, line: &str) -> Result<String> {
    if let Some(path) = line.strip_prefix(":add ") {
        return load_file(retriever, path.trim(), true).await;
    }
    if let Some(path) = line.strip_prefix(":stage ") {
        return load_file(retriever, path.trim(), false).await;
    }

    let output = match line.to_lowercase().as_str() {
        "help" => utils::HELP_TEXT.to_string(),
        "topics" => utils::render_topics(&retriever.topics_by_category()),
        "stats" => utils::render_stats(&retriever.stats(), &retriever.topics_by_category()),
        "history" => utils::render_history(&retriever.history()),
        "health" => serde_json::to_string_pretty(&retriever.health())?,
        ":retrain" => {
            let summary = retriever.train()?;
            format!(
                "Retrained on {} Q&A pairs, vocabulary size {}",
                summary.entries, summary.vocabulary_size
            )
        }
        _ => utils::render_answer(&retriever.answer(line)?, &retriever.topics_by_category()),
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .init();

    let retriever = Retriever::new();

    println!("Loading knowledge from '{}'...", config.knowledge_path.display());
    match utils::load_knowledge(&config.knowledge_path).await {
        Ok(entries) => {
            if let Err(e) = retriever.add_and_train(entries) {
                warn!("Starting untrained: {e}");
            }
        }
        Err(e) => warn!("Failed to load knowledge: {e:#}"),
    }

    let stats = retriever.stats();
    println!(
        "University chatbot ready: {} Q&A pairs, {} words in vocabulary.",
        stats.knowledge_base_size, stats.vocabulary_size
    );
    println!("Type 'help' for commands, 'quit' to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF (Ctrl+D)
        };
        let line = line.trim();
        if line.is_empty() {
            println!("Please type a question or command...");
            continue;
        }
        if line.eq_ignore_ascii_case("quit") {
            break;
        }

        match handle_line(&retriever, line).await {
            Ok(output) => println!("{output}\n"),
            Err(e) => eprintln!("Error: {e:#}\n"),
        }
    }

    let records = retriever.teardown();
    println!("Goodbye! {} questions answered this session.", records.len());
    Ok(())
}
