//! authstash - a demo login/signup front end.
//!
//! This binary stands in for the UI screens: it drives the auth facade
//! from the terminal with interactive prompts. Registered accounts live
//! only as long as the process; a session saved with `--remember`
//! survives across runs.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use authstash_core::auth::{AuthClient, CredentialStore, SessionStore};
use authstash_core::config::Config;
use authstash_core::error::AuthError;
use authstash_core::utils::password_strength;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("authstash starting");

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);

    let mut config = Config::load()?;
    let sessions = SessionStore::detect(&config);
    let mut client = AuthClient::new(CredentialStore::seeded(), sessions);
    if let Some(ms) = config.simulated_latency_ms {
        client = client.with_latency(Duration::from_millis(ms));
    }

    match command {
        Some("login") => {
            let remember = args.iter().any(|a| a == "--remember");
            login(&mut client, &mut config, remember).await
        }
        Some("signup") => signup(&mut client).await,
        Some("whoami") => whoami(&client),
        Some("logout") => {
            client.logout();
            println!("Logged out.");
            Ok(())
        }
        Some("status") => status(&client, &config),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    eprintln!("Usage: authstash <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login [--remember]   Sign in (demo accounts: admin/admin123, user/user123, teste/teste123)");
    eprintln!("  signup               Create a new account (lives for this process only)");
    eprintln!("  whoami               Show the current session user");
    eprintln!("  logout               Clear the session from both scopes");
    eprintln!("  status               Show session and storage status");
}

async fn login(client: &mut AuthClient, config: &mut Config, remember: bool) -> Result<()> {
    // Get credentials from env vars or prompt, prefilling the last username
    let default_user = std::env::var("AUTHSTASH_USERNAME")
        .ok()
        .or_else(|| config.last_username.clone());
    let username = prompt_with_default("Username", default_user.as_deref())?;

    let password = match std::env::var("AUTHSTASH_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => rpassword::prompt_password("Password: ")?,
    };

    if username.is_empty() || password.is_empty() {
        println!("Username and password required.");
        return Ok(());
    }

    println!("\nAuthenticating...");
    let outcome = client.sign_in(&username, &password, remember).await;

    if outcome.success {
        config.last_username = Some(username.clone());
        if let Err(e) = config.save() {
            warn!(error = %e, "Failed to save config");
        }

        println!("Login successful. Welcome, {}!", username);
        if remember {
            println!("Session saved to the persistent scope; it survives restarts.");
        }
    } else {
        println!("Invalid username or password.");
    }
    Ok(())
}

async fn signup(client: &mut AuthClient) -> Result<()> {
    println!("=== Create account ===\n");

    let username = prompt("Username")?;
    let email = prompt("Email")?;

    let password = rpassword::prompt_password("Password: ")?;
    let strength = password_strength(&password);
    if !strength.is_strong() {
        println!(
            "Note: weak password ({}/5). Missing: {}.",
            strength.score,
            strength.missing.join(", ")
        );
    }

    let confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != confirm {
        println!("Passwords do not match.");
        return Ok(());
    }

    let outcome = client.register(&username, &password, &email).await;
    println!("{}.", outcome.message);
    if outcome.success {
        println!("Log in with `authstash login`. New accounts last for this process; the demo accounts are always available.");
    }
    Ok(())
}

fn whoami(client: &AuthClient) -> Result<()> {
    match client.current_user() {
        Ok(Some(user)) => println!("{} <{}>", user.username, user.email),
        Ok(None) => println!("Not logged in."),
        Err(AuthError::MalformedSession(_)) => {
            println!("Stored session is corrupted. Run `authstash logout` to clear it.");
        }
        Err(e) => println!("Failed to read session: {}", e),
    }
    Ok(())
}

fn status(client: &AuthClient, config: &Config) -> Result<()> {
    println!("Authenticated: {}", client.is_authenticated());
    match config.session_dir() {
        Ok(dir) => println!("Persistent scope: {}", dir.display()),
        Err(_) => println!("Persistent scope: unavailable"),
    }
    println!("Registered users: {}", client.credentials().len());
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_with_default(label: &str, default: Option<&str>) -> Result<String> {
    let Some(default) = default else {
        return prompt(label);
    };

    print!("{} [{}]: ", label, default);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input.to_string())
    }
}
