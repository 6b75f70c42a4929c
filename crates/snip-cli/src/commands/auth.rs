//! Session commands.

use snip_core::AuthUser;

use crate::app::App;
use crate::error::CliError;

pub fn run_login(app: &App, token: String, user_id: i64, username: String) -> Result<(), CliError> {
    app.session.sign_in(
        token,
        AuthUser {
            id: user_id,
            username: username.clone(),
        },
    );
    app.session.persist(app.storage.as_ref())?;
    println!("Signed in as {username}");
    Ok(())
}

pub fn run_logout(app: &App) -> Result<(), CliError> {
    app.session.sign_out();
    app.session.persist(app.storage.as_ref())?;
    println!("Signed out");
    Ok(())
}
