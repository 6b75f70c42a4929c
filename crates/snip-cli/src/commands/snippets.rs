//! Snippet commands.

use std::io::{self, IsTerminal, Read};

use serde::Serialize;
use snip_core::models::EntityId;
use snip_core::{Snippet, SnippetDraft};

use super::status_badge;
use crate::app::App;
use crate::commands::sync::refresh_best_effort;
use crate::error::CliError;

pub async fn run_add(
    app: &App,
    title: String,
    content_parts: &[String],
    language: String,
    description: Option<String>,
    tag_ids: Vec<i64>,
) -> Result<(), CliError> {
    let content = resolve_content(content_parts)?;
    let draft = SnippetDraft {
        title,
        content,
        description,
        language,
        tag_ids: tag_ids.into_iter().map(EntityId::new).collect(),
    };

    let snippet = app.snippets.create(draft).await?;
    println!("{}", snippet.id);
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SnippetListItem {
    id: i64,
    title: String,
    language: String,
    sync_status: String,
}

pub async fn run_list(app: &App, as_json: bool, offline: bool) -> Result<(), CliError> {
    if !offline {
        refresh_best_effort(&app.snippets).await;
    }

    let snippets = app.snippets.visible();
    if as_json {
        let items = snippets
            .iter()
            .map(|snippet| snippet_to_list_item(app, snippet))
            .collect::<Vec<SnippetListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_snippet_lines(app, &snippets) {
            println!("{line}");
        }
    }

    Ok(())
}

pub async fn run_show(app: &App, id: i64) -> Result<(), CliError> {
    let id = EntityId::new(id);
    let snippet = app
        .snippets
        .get(id)
        .await?
        .ok_or(CliError::SnippetNotFound(id.get()))?;

    println!("# {} [{}]", snippet.title, snippet.language);
    println!(
        "created {}  status {}",
        snippet.created_at.format("%Y-%m-%d %H:%M"),
        status_badge(app.snippets.status(snippet.id))
    );
    if let Some(description) = &snippet.description {
        println!("{description}");
    }
    println!();
    println!("{}", snippet.content);
    Ok(())
}

pub async fn run_delete(app: &App, id: i64) -> Result<(), CliError> {
    let id = EntityId::new(id);
    app.snippets.delete(id).await?;
    println!("{id}");
    Ok(())
}

fn snippet_to_list_item(app: &App, snippet: &Snippet) -> SnippetListItem {
    SnippetListItem {
        id: snippet.id.get(),
        title: snippet.title.clone(),
        language: snippet.language.clone(),
        sync_status: status_badge(app.snippets.status(snippet.id)).to_string(),
    }
}

fn format_snippet_lines(app: &App, snippets: &[Snippet]) -> Vec<String> {
    snippets
        .iter()
        .map(|snippet| {
            let badge = status_badge(app.snippets.status(snippet.id));
            let title = truncate(&snippet.title, 40);
            format!(
                "{:<15}  {title:<40}  {:<10}  {badge}",
                snippet.id, snippet.language
            )
        })
        .collect()
}

fn resolve_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }
    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }
    Err(CliError::EmptyContent)
}

fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let take_len = max_chars.saturating_sub(3);
    let mut truncated = text.chars().take(take_len).collect::<String>();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_content_trims_and_rejects_empty() {
        assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
        assert_eq!(normalize_content(" \n\t "), None);
    }

    #[test]
    fn normalize_content_keeps_multiline_text() {
        assert_eq!(
            normalize_content("fn main() {}\nfn helper() {}\n"),
            Some("fn main() {}\nfn helper() {}".to_string())
        );
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long snippet title", 10), "a very ...");
    }
}
