//! CLI command: `chiko chat`
//!
//! Line-based REPL. Replies stream to stdout as they arrive; logs go to
//! stderr. Commands: `/persona <id>`, `/personas`, `/clear`, `/quota`, `/exit`.

use crate::app;
use anyhow::Result;
use chiko_core::{Personality, Transcript, TurnOutcome, GREETING};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Run the chat REPL
pub async fn run(persona: Personality) -> Result<()> {
    let config = app::load_config()?;
    let orchestrator = app::build_orchestrator(&config)?;

    let mut personality = persona;
    let mut transcript = Transcript::with_greeting();
    print_model_line(personality, GREETING);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            match handle_command(command, &mut personality, &mut transcript) {
                CommandResult::Continue => continue,
                CommandResult::ShowQuota => {
                    let stats = orchestrator.quota_stats();
                    println!(
                        "  Kuota: {}/{} per menit tersisa ({:.0}% terpakai){}",
                        stats.remaining,
                        stats.limit,
                        stats.percent_used,
                        if stats.is_low { " !!" } else { "" }
                    );
                    continue;
                }
                CommandResult::Exit => break,
            }
        }

        print!("{} Chiko: ", personality.icon());
        std::io::stdout().flush()?;

        let mut printed = 0usize;
        let outcome = orchestrator
            .converse(&mut transcript, line, personality, |message| {
                let content = message.content.as_str();
                if let Some(delta) = content.get(printed..) {
                    print!("{}", delta);
                    let _ = std::io::stdout().flush();
                }
                printed = content.len();
            })
            .await?;

        match outcome {
            TurnOutcome::Completed(_) => println!(),
            TurnOutcome::Failed { partial, error, notice } => {
                if partial.is_some() {
                    println!();
                    print!("{} Chiko: ", personality.icon());
                }
                println!("{}", notice.content);
                debug!(kind = ?error.kind(), "Turn ended with an error message");
            }
        }
    }

    println!("Sampai jumpa, Bro!");
    Ok(())
}

enum CommandResult {
    Continue,
    ShowQuota,
    Exit,
}

fn handle_command(
    command: &str,
    personality: &mut Personality,
    transcript: &mut Transcript,
) -> CommandResult {
    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(n, a)| (n, a.trim()));

    match name {
        "exit" | "quit" | "q" => CommandResult::Exit,
        "clear" => {
            *transcript = Transcript::with_greeting();
            print_model_line(*personality, GREETING);
            CommandResult::Continue
        }
        "quota" => CommandResult::ShowQuota,
        "personas" => {
            for p in Personality::ALL {
                let marker = if p == *personality { "*" } else { " " };
                println!("  {} {:<13} {}", marker, p.id(), p);
            }
            CommandResult::Continue
        }
        "persona" => {
            match Personality::from_id(arg) {
                Some(p) => {
                    *personality = p;
                    println!("  Mode: {}", p);
                }
                None => println!("  Persona nggak dikenal: '{}'. Coba /personas", arg),
            }
            CommandResult::Continue
        }
        other => {
            println!("  Perintah nggak dikenal: /{}", other);
            CommandResult::Continue
        }
    }
}

fn print_model_line(personality: Personality, content: &str) {
    println!("{} Chiko: {}", personality.icon(), content);
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
