// gen-podcast - Generate an AI podcast episode from a topic

mod assets;
mod audio;
mod config;
mod pipeline;
mod prompts;
mod script;

use anyhow::{Context, Result};
use audio::FfmpegTimeline;
use clap::{Parser, Subcommand};
use config::PodcastConfig;
use indicatif::{ProgressBar, ProgressStyle};
use openai_client::{OpenAiClient, resolve_api_key};
use pipeline::PodcastMaker;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gen-podcast")]
#[command(about = "Generate an AI podcast episode from a topic", long_about = None)]
#[command(version)]
struct Args {
    /// Topic of the podcast episode
    topic: Option<String>,

    /// Episode length descriptor (e.g. short, medium, long)
    #[arg(short, long)]
    length: Option<String>,

    /// Comma-separated key points the episode must cover
    #[arg(short, long)]
    key_points: Option<String>,

    /// OpenAI API key (default: OPENAI_API_KEY, then 1Password)
    #[arg(long)]
    api_key: Option<String>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Configuration subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key to set (e.g. script_model)
        key: String,
        /// New value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Handle config subcommands
    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    // Load configuration
    let config = PodcastConfig::load().context("Failed to load configuration")?;

    let topic = match args.topic {
        Some(topic) => topic,
        None => prompt_line("Podcast topic: ")?,
    };
    if topic.is_empty() {
        anyhow::bail!("No topic provided");
    }

    let key_points = match args.key_points {
        Some(raw) => parse_key_points(&raw),
        None => parse_key_points(&prompt_line("Key points (comma-separated, optional): ")?),
    };

    let length = match args.length {
        Some(length) => length,
        None => {
            let entered = prompt_line("Episode length [medium]: ")?;
            if entered.is_empty() {
                "medium".to_string()
            } else {
                entered
            }
        }
    };

    let api_key = resolve_api_key(args.api_key).context("Failed to resolve API key")?;
    let client = OpenAiClient::new(api_key);
    let mut maker = PodcastMaker::new(
        Box::new(client.clone()),
        Box::new(client),
        Box::new(FfmpegTimeline::new()),
        &config,
    );

    if args.debug {
        eprintln!("Topic: {}", topic);
        eprintln!("Length: {}", length);
        eprintln!("Key points: {:?}", key_points);
        eprintln!("Assets: {}", config.assets_dir.display());
        eprintln!("Output: {}", config.output_dir.display());
    }

    let pb = spinner("Generating podcast script...");
    let script = maker
        .generate_script(&topic, &length, &key_points)
        .await
        .context("Failed to generate podcast script")?;
    let speak_count = script.speak_count();
    let sfx_count = script.sfx_count();
    let warnings = script.warnings().to_vec();
    pb.finish_with_message("Script generated");

    eprintln!(
        "Script: {} spoken lines, {} sound effects",
        speak_count, sfx_count
    );
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    let pb = spinner("Synthesizing and assembling audio...");
    let compiled = maker
        .assemble_audio()
        .await
        .context("Failed to assemble audio")?;
    pb.finish_with_message("Audio assembled");

    let pb = spinner("Naming the episode...");
    let final_path = maker
        .finalize(&compiled)
        .await
        .context("Failed to finalize podcast")?;
    pb.finish_with_message("Done!");

    // Get output file size
    let metadata = tokio::fs::metadata(&final_path).await?;
    let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);

    eprintln!("Podcast saved: {} ({:.1} MB)", final_path.display(), size_mb);

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn prompt_line(prompt: &str) -> Result<String> {
    eprint!("{}", prompt);
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

fn parse_key_points(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|point| point.trim())
        .filter(|point| !point.is_empty())
        .map(|point| point.to_string())
        .collect()
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = PodcastConfig::load()?;
            println!("Configuration file: {:?}", PodcastConfig::config_path()?);
            println!();
            println!("assets_dir = {:?}", config.assets_dir);
            println!("staging_dir = {:?}", config.staging_dir);
            println!("output_dir = {:?}", config.output_dir);
            println!("script_model = \"{}\"", config.script_model);
            println!("title_model = \"{}\"", config.title_model);
            println!("tts_model = \"{}\"", config.tts_model);
        }
        ConfigAction::Set { key, value } => {
            let mut config = PodcastConfig::load()?;
            match key.as_str() {
                "assets_dir" => config.assets_dir = PathBuf::from(value),
                "staging_dir" => config.staging_dir = PathBuf::from(value),
                "output_dir" => config.output_dir = PathBuf::from(value),
                "script_model" => config.script_model = value.clone(),
                "title_model" => config.title_model = value.clone(),
                "tts_model" => config.tts_model = value.clone(),
                _ => anyhow::bail!("Unknown configuration key: {}", key),
            }
            config.save()?;
            println!("Configuration updated: {} = {}", key, value);
        }
    }
    Ok(())
}
