//! CLI module for Chiko
//!
//! Provides commands:
//! - `chat`: interactive streaming chat
//! - `image generate` / `image edit`: image generation and photo studio
//! - `quota`: client-side usage against the free-tier limits

use chiko_core::{ImageStyle, Personality, ToneFilter};
use chiko_llm::AspectRatio;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod chat;
pub mod image;
pub mod quota;

/// Chiko AI Assistant CLI
#[derive(Parser, Debug)]
#[command(name = "chiko")]
#[command(about = "Chiko - santuy AI assistant (chat, image generation, photo studio)")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with Chiko (streams replies)
    Chat {
        /// Personality id: friendly, professional, funny, expert
        #[arg(short, long, default_value = "friendly")]
        persona: Personality,
    },
    /// Generate or edit images
    #[command(subcommand)]
    Image(ImageCommand),
    /// Show client-side quota usage
    Quota {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Refresh every second
        #[arg(short, long)]
        watch: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Generate an image from a prompt
    Generate(GenerateArgs),
    /// Edit an existing image with a photo studio tool
    Edit(EditArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// What to draw
    pub prompt: String,
    /// Style: realistic, cinematic, anime, cyberpunk, watercolor, pixel-art, 3d
    #[arg(short, long, default_value = "realistic")]
    pub style: ImageStyle,
    /// Aspect ratio: 1:1, 4:5, 9:16, 16:9
    #[arg(short, long, default_value = "1:1")]
    pub ratio: AspectRatio,
    /// Output file (defaults to a timestamped name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Source image file (png, jpeg, webp)
    pub input: PathBuf,
    /// Edit tool
    #[arg(short, long, value_enum, default_value_t = ToolArg::Enhance)]
    pub tool: ToolArg,
    /// Color grading for the tone tool
    #[arg(short, long, default_value = "Cinematic")]
    pub filter: ToneFilter,
    /// Description for the remove / outfit tools
    #[arg(short = 'd', long)]
    pub description: Option<String>,
    /// Free-form instruction (overrides --tool)
    #[arg(long)]
    pub prompt: Option<String>,
    /// Output file (defaults to a timestamped name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolArg {
    Tone,
    Remove,
    Outfit,
    Enhance,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Chat { persona }) => chat::run(persona).await,
        Some(Commands::Image(ImageCommand::Generate(args))) => image::generate(args).await,
        Some(Commands::Image(ImageCommand::Edit(args))) => image::edit(args).await,
        Some(Commands::Quota { json, watch }) => quota::run(json, watch).await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
