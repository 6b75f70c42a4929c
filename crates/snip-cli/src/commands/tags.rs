//! Tag commands.

use serde::Serialize;
use snip_core::models::EntityId;
use snip_core::{Tag, TagDraft};

use super::status_badge;
use crate::app::App;
use crate::commands::sync::refresh_best_effort;
use crate::error::CliError;

pub async fn run_add(app: &App, name: String, hidden: bool) -> Result<(), CliError> {
    let tag = app
        .tags
        .create(TagDraft {
            name,
            is_hidden: hidden,
        })
        .await?;
    println!("{}", tag.id);
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TagListItem {
    id: i64,
    name: String,
    is_hidden: bool,
    sync_status: String,
}

pub async fn run_list(app: &App, as_json: bool, offline: bool) -> Result<(), CliError> {
    if !offline {
        refresh_best_effort(&app.tags).await;
    }

    let tags = app.tags.visible();
    if as_json {
        let items = tags
            .iter()
            .map(|tag| tag_to_list_item(app, tag))
            .collect::<Vec<TagListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for tag in &tags {
            let badge = status_badge(app.tags.status(tag.id));
            let marker = if tag.is_hidden { " (hidden)" } else { "" };
            println!("{:<15}  {:<30}  {badge}{marker}", tag.id, tag.name);
        }
    }

    Ok(())
}

pub async fn run_set_hidden(app: &App, id: i64, hidden: bool) -> Result<(), CliError> {
    let id = EntityId::new(id);
    let tag = app.tags.set_hidden(id, hidden).await.map_err(|error| {
        if matches!(&error, snip_core::Error::NotFound(_)) {
            CliError::TagNotFound(id.get())
        } else {
            CliError::Core(error)
        }
    })?;
    println!("{}", tag.id);
    Ok(())
}

pub async fn run_delete(app: &App, id: i64) -> Result<(), CliError> {
    let id = EntityId::new(id);
    app.tags.delete(id).await?;
    println!("{id}");
    Ok(())
}

fn tag_to_list_item(app: &App, tag: &Tag) -> TagListItem {
    TagListItem {
        id: tag.id.get(),
        name: tag.name.clone(),
        is_hidden: tag.is_hidden,
        sync_status: status_badge(app.tags.status(tag.id)).to_string(),
    }
}
