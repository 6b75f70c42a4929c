//! Sync and status commands.

use std::rc::Rc;

use snip_core::remote::RemoteStore;
use snip_core::sync::{SyncScheduler, RETRY_INTERVAL};
use snip_core::{Syncable, SyncStore};

use crate::app::App;
use crate::error::CliError;

/// Refresh a store's remote view, falling back to the cached view on failure
pub(crate) async fn refresh_best_effort<E, R>(store: &SyncStore<E, R>)
where
    E: Syncable,
    R: RemoteStore<E>,
{
    if let Err(error) = store.refresh().await {
        tracing::warn!(
            kind = E::KIND,
            error = %error,
            "remote refresh failed, showing cached view"
        );
    }
}

pub fn run_status(app: &App) {
    match app.session.current_user() {
        Some(user) => println!("Session: signed in as {} (id {})", user.username, user.id),
        None => println!("Session: guest"),
    }
    println!(
        "Snippets: {} visible, {} queued for retry",
        app.snippets.visible().len(),
        app.snippets.pending_retries()
    );
    println!(
        "Tags: {} visible, {} queued for retry",
        app.tags.visible().len(),
        app.tags.pending_retries()
    );
}

pub async fn run_sync(app: &Rc<App>, watch: bool) -> Result<(), CliError> {
    if !app.session.is_authenticated() {
        return Err(CliError::NotSignedIn);
    }

    let synced = drain_once(app).await?;
    refresh_best_effort(&app.snippets).await;
    refresh_best_effort(&app.tags).await;
    report_cycle(app, synced);

    if !watch {
        return Ok(());
    }

    println!("Watching; retrying every {}s (ctrl-c to stop)", RETRY_INTERVAL.as_secs());
    let scheduler = SyncScheduler::start(RETRY_INTERVAL, {
        let app = Rc::clone(app);
        move || {
            let app = Rc::clone(&app);
            async move {
                match drain_once(&app).await {
                    Ok(synced) => report_cycle(&app, synced),
                    Err(error) => tracing::warn!(error = %error, "retry cycle failed"),
                }
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    scheduler.stop().await;
    Ok(())
}

async fn drain_once(app: &App) -> Result<usize, CliError> {
    let synced = app.snippets.drain_retry_queue().await? + app.tags.drain_retry_queue().await?;
    Ok(synced)
}

fn report_cycle(app: &App, synced: usize) {
    let remaining = app.snippets.pending_retries() + app.tags.pending_retries();
    println!("Synced {synced}, {remaining} still queued");
}
