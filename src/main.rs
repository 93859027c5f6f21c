//! Chronos - Entry Point
//!
//! Sets up logging and a single-threaded runtime, loads or starts a game,
//! then interleaves the live ticker with lines typed on stdin.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chronos::auth::{self, InMemoryCredentials, SessionToken};
use chronos::command::CommandResult;
use chronos::core::config::GameConfig;
use chronos::core::error::Result;
use chronos::core::types::now_millis;
use chronos::persistence::{self, JsonFileStore, RemoteStore, SaveBlob, StateStore};
use chronos::session::Session;
use chronos::simulation::TickOutcome;
use chronos::ui::display::{self, HELP_TEXT};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

/// Chronos - explore time-distorted locations and collect the three keys
#[derive(Parser, Debug)]
#[command(name = "chronos")]
#[command(about = "A text adventure where every location bends time differently")]
struct Args {
    /// Save file
    #[arg(long, default_value = "chronos-save.json")]
    save: PathBuf,

    /// TOML file overriding game constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for the portal layout
    #[arg(long)]
    seed: Option<u64>,

    /// Ignore any saved game
    #[arg(long)]
    fresh: bool,

    /// Base URL of a remote store to mirror saves to (else CHRONOS_REMOTE_URL)
    #[arg(long)]
    remote_url: Option<String>,

    /// Player name for the remote store
    #[arg(long, requires_all = ["secret", "email"])]
    user: Option<String>,

    #[arg(long, requires = "user")]
    secret: Option<String>,

    /// Player email, used to register the player before logging in
    #[arg(long, requires = "user")]
    email: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Game text goes to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chronos=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: GameConfig) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let token = login(&args);

    let remote = match &args.remote_url {
        Some(url) => Some(RemoteStore::new(url, token)),
        None => RemoteStore::from_env(token).ok(),
    }
    .map(Arc::new);
    if let Some(remote) = &remote {
        tracing::info!("Mirroring saves to {}", remote.state_url());
    }

    let mut store = JsonFileStore::new(args.save.clone());
    if args.fresh {
        store.clear()?;
    }
    let mut session = persistence::resume(&store, config, seed, now_millis());

    println!("\n=== CHRONOS ===");
    println!("Collect the three time keys and reach the treasure vault.");
    println!();
    println!("{}", HELP_TEXT);
    println!();
    println!("{}", display::render_location(session.graph().get(session.state().location)));
    if let Some(report) = session.report() {
        println!("{}", display::render_report(report));
    } else if session.state().awaiting_answer {
        if let Some(question) = &session.state().current_question {
            println!("QUESTION: {}", question);
        }
    }
    save(&mut store, &session, remote.as_ref());

    let mut ticker = tokio::time::interval(Duration::from_millis(session.config().tick_period_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick(), if session.is_active() => {
                let outcome = session.tick(now_millis());
                if outcome == TickOutcome::Expired {
                    println!("\nTime's up! The location's countdown reached zero.");
                    print_report(&session);
                }
                if outcome != TickOutcome::Inactive {
                    save(&mut store, &session, remote.as_ref());
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                match input {
                    "" => continue,
                    "quit" | "q" => break,
                    "status" | "s" => {
                        println!("{}", display::render_status(session.state(), session.graph()));
                        continue;
                    }
                    "reset" => {
                        session.reset(now_millis());
                        ticker.reset();
                        println!("{}", display::render_location(session.graph().get(session.state().location)));
                    }
                    _ => {
                        let was_active = session.is_active();
                        let result = session.submit(input, now_millis());
                        print_result(&result, &session);
                        if was_active && !session.is_active() {
                            print_report(&session);
                        }
                    }
                }
                save(&mut store, &session, remote.as_ref());
            }
        }
    }

    save(&mut store, &session, remote.as_ref());
    tracing::info!("Chronos shutting down");
    Ok(())
}

/// Sign in when a player was named; the game runs without a token otherwise
fn login(args: &Args) -> Option<SessionToken> {
    let (Some(user), Some(secret), Some(email)) = (&args.user, &args.secret, &args.email) else {
        return None;
    };

    let mut credentials = InMemoryCredentials::new();
    match auth::sign_in(&mut credentials, email, user, secret) {
        Ok(token) => {
            tracing::info!("Logged in as {}", user);
            Some(token)
        }
        Err(e) => {
            tracing::warn!("Login failed for {}: {}", user, e);
            None
        }
    }
}

fn print_result(result: &CommandResult, session: &Session) {
    match result {
        CommandResult::Applied(events) => {
            for event in events {
                println!("{}", display::render_event(event, session.graph()));
            }
        }
        CommandResult::Rejected(reason) => println!("{}", display::render_rejection(reason)),
    }
}

fn print_report(session: &Session) {
    if let Some(report) = session.report() {
        println!("\n{}", display::render_report(report));
        println!("Type 'reset' to play again or 'quit' to exit.");
    }
}

/// Write the save file and mirror it remotely; failures are only logged
fn save(store: &mut JsonFileStore, session: &Session, remote: Option<&Arc<RemoteStore>>) {
    if let Err(e) = persistence::persist(store, session) {
        tracing::warn!("Failed to save game to {}: {}", store.path().display(), e);
    }

    if let Some(remote) = remote {
        let remote = Arc::clone(remote);
        let blob = SaveBlob::capture(session);
        tokio::spawn(async move {
            if let Err(e) = remote.push(&blob).await {
                tracing::warn!("Remote mirror failed: {}", e);
            }
        });
    }
}
