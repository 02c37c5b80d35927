//! tapeworks - run the effects offline or live in the terminal
//!
//! Run with: cargo run -- play wavefolder

mod audio;
mod render;
mod signal;
mod ui;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result as EyreResult};
use std::path::PathBuf;
use tapeworks::{AtomicParams, EffectKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tapeworks")]
#[command(author, version, about = "Wave folding, gramophone, reverb and tape-loop effects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every effect and its parameters
    List,

    /// Process a WAV file offline
    Render {
        /// easyverb, gramophony, wavefolder or reels
        effect: EffectKind,
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        /// Parameter override, e.g. --set THRESHOLD=0.2 (repeatable)
        #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_key_val)]
        set: Vec<(String, f32)>,
        /// Processing block size
        #[arg(long, default_value_t = 512)]
        block: usize,
    },

    /// Play through the default output device with a live UI
    Play {
        effect: EffectKind,
        /// Loop this WAV instead of the built-in pluck
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, f32), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter '{}' (expected ID=VALUE)", s))?;
    let value = value
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("invalid value for {}: {}", key, e))?;
    if !value.is_finite() {
        return Err(format!("invalid value for {}: must be a finite number", key));
    }
    Ok((key.trim().to_ascii_uppercase(), value))
}

/// Build a parameter store for `kind` with `overrides` applied.
pub fn params_with_overrides(kind: EffectKind, overrides: &[(String, f32)]) -> EyreResult<AtomicParams> {
    let params = AtomicParams::new(kind.params());
    for (id, value) in overrides {
        let stored = params
            .set(id, *value)
            .ok_or_else(|| eyre!("{} has no parameter '{}'", kind, id))?;
        if stored != *value {
            tracing::warn!(id = id.as_str(), requested = value, stored, "parameter clamped to range");
        }
    }
    Ok(params)
}

fn list() {
    for kind in EffectKind::ALL {
        println!("{}", kind);
        for spec in kind.params() {
            println!(
                "  {:<16} {:<22} [{} .. {}]  default {}",
                spec.id, spec.name, spec.min, spec.max, spec.default
            );
        }
        println!();
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            list();
            Ok(())
        }
        Command::Render {
            effect,
            input,
            output,
            set,
            block,
        } => {
            let params = params_with_overrides(effect, &set)?;
            render::run(effect, &input, &output, &params, block)
        }
        Command::Play { effect, input } => audio::run(effect, input.as_deref()),
    }
}
