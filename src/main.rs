//! Shogi-Rules command-line front end.
//!
//! ## Usage
//!
//! - `shogi-rules` - Show a demo
//! - `shogi-rules play` - Run the text protocol on stdin/stdout
//! - `shogi-rules selfplay --games 10 --seed 1 --policy capture` - Self-play games
//! - `shogi-rules demo` - Show a demo

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use shogi_rules::agent::PolicyKind;
use shogi_rules::protocol::Session;
use shogi_rules::selfplay::{self, Config, DEFAULT_MAX_PLIES};
use shogi_rules::{GameEngine, Move, sfen};

/// Shogi-Rules: a 9x9 shogi legality engine
#[derive(Parser)]
#[command(name = "shogi-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the line protocol on stdin/stdout for a UI or a terminal
    Play {
        /// Seed for the `genmove` policy
        #[arg(long)]
        seed: Option<u64>,
        /// Policy behind `genmove` (random, capture)
        #[arg(long, default_value = "random")]
        policy: PolicyKind,
    },
    /// Play games against itself and print a summary
    Selfplay {
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = DEFAULT_MAX_PLIES)]
        max_plies: usize,
        /// Start from this SFEN instead of the standard opening
        #[arg(long)]
        sfen: Option<String>,
        /// Policy both sides play with (random, capture)
        #[arg(long, default_value = "random")]
        policy: PolicyKind,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Some(Commands::Play { seed, policy }) => {
            let mut session = Session::new(policy.build(seed));
            let stdin = io::stdin();
            session
                .run(stdin.lock(), io::stdout())
                .context("protocol session failed")?;
        }
        Some(Commands::Selfplay {
            games,
            seed,
            max_plies,
            sfen: start_sfen,
            policy,
        }) => {
            let start = match start_sfen {
                Some(text) => {
                    sfen::parse(&text).with_context(|| format!("bad --sfen {text:?}"))?
                }
                None => GameEngine::new(),
            };
            let config = Config {
                games,
                seed,
                max_plies,
                start,
                policy,
            };
            let summary = selfplay::run(&config);
            let json = serde_json::to_string_pretty(&summary).context("encoding summary")?;
            writeln!(io::stdout(), "{json}")?;
        }
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .target(env_logger::Target::Stderr)
    .init();
}

fn run_demo() -> Result<()> {
    println!("Shogi-Rules: 9x9 shogi legality engine\n");

    let mut game = GameEngine::new();
    println!("=== Opening ===");
    println!("{}", game.board());
    println!("{} legal moves for {}\n", game.legal_actions().len(), game.side_to_move());

    println!("=== A few moves ===");
    for text in ["7g7f", "3c3d", "8h2b", "3a2b", "B*4e"] {
        let mv: Move = text.parse().with_context(|| format!("parsing {text}"))?;
        let accepted = game.apply(mv);
        println!("{text}: {}", if accepted { "ok" } else { "rejected" });
    }
    println!("\n{}", game.board());
    println!("sfen: {}", game.to_sfen());
    println!("status: {:?}", game.status());
    Ok(())
}
