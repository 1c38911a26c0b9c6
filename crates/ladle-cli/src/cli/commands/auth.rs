//! Auth command handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use ladle_core::auth::credentials;

use crate::cli::App;

pub async fn signup(app: &App, email: &str) -> Result<()> {
    let password = read_password()?;

    if !app.session.sign_up(email, &password).await {
        anyhow::bail!("Sign up failed");
    }

    let session = app.session.snapshot();
    println!("✓ Account created for {}", email);
    if let Some(token) = session.token {
        println!("  Logged in (token: {})", credentials::mask_token(&token));
        println!(
            "  Credentials saved to: {}",
            credentials::credentials_path().display()
        );
    }

    Ok(())
}

pub async fn login(app: &App, email: &str) -> Result<()> {
    // Logging in over an existing session just replaces it
    if let Some(existing) = app.session.snapshot().token {
        println!(
            "Already logged in (token: {}), replacing session.",
            credentials::mask_token(&existing)
        );
    }

    let password = read_password()?;

    if !app.session.login(email, &password).await {
        anyhow::bail!("Login failed");
    }

    let session = app.session.snapshot();
    let token = session.token.unwrap_or_default();
    println!("✓ Logged in as {}", email);
    println!("  Token: {}", credentials::mask_token(&token));
    println!(
        "  Credentials saved to: {}",
        credentials::credentials_path().display()
    );

    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    let was_authenticated = app.session.is_authenticated();
    app.session.logout();

    if was_authenticated {
        println!("✓ Logged out");
        println!(
            "  Credentials removed from: {}",
            credentials::credentials_path().display()
        );
    } else {
        println!("Not logged in (no credentials found).");
    }

    Ok(())
}

pub fn status(app: &App) -> Result<()> {
    let session = app.session.snapshot();

    if session.is_authenticated {
        println!(
            "Logged in as user {}",
            session.user_id.as_deref().unwrap_or("unknown")
        );
        if let Some(token) = &session.token {
            println!("  Token: {}", credentials::mask_token(token));
        }
    } else {
        println!("Not logged in.");
    }
    println!("  Backend: {}", app.base_url);

    Ok(())
}

/// Reads the password from stdin: prompted on a terminal, piped otherwise.
fn read_password() -> Result<String> {
    if io::stdin().is_terminal() {
        print!("Password: ");
        io::stdout().flush()?;
    }

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    let password = input.trim_end_matches(['\r', '\n']);

    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    Ok(password.to_string())
}
