use std::error::Error;
use std::io;

use clap::Parser;
use tracing::{debug, warn};

use maybe_core::app::env;
use maybe_core::app::tracing::AppTracingBuilder;

use crate::probe::{ProcessEnvironment, Probe, ProbeConfig};

mod probe;

/// Resolve environment variables, falling back to defaults when they are absent.
#[derive(Parser, Debug)]
#[command(name = "maybe-probe", version)]
struct Args {
  /// Names of the environment variables to resolve.
  #[arg(required = true)]
  names: Vec<String>,
  /// Value used for absent variables. Falls back to `MAYBE_PROBE_DEFAULT` when not given.
  #[arg(long)]
  default: Option<String>,
  /// Treat variables set to the empty string as present.
  #[arg(long)]
  allow_empty: bool,
  /// Only resolve the name at this position.
  #[arg(long)]
  index: Option<usize>,
  /// Fail when any of these variables resolves to absent. May be repeated.
  #[arg(long)]
  required: Vec<String>,
}

impl From<Args> for ProbeConfig {
  fn from(args: Args) -> Self {
    Self {
      names: args.names,
      default: args.default.into(),
      allow_empty: args.allow_empty,
      index: args.index.into(),
      required: args.required,
    }
  }
}

fn main() -> Result<(), Box<dyn Error>> {
  let args = Args::parse();
  // Loaded before tracing is initialized, as the `.env` file may set the console filter.
  let dotenv = env::load_dotenv_into_env();
  let tracing = AppTracingBuilder::default()
    .with_fallback_directives("warn")
    .build()?;
  match dotenv {
    Ok(path) => debug!(directives = tracing.directives(), dotenv_loaded = path.is_present(), "initialized tracing"),
    Err(cause) => warn!(%cause, "could not load .env file; continuing with the process environment"),
  }

  let probe = Probe::new(ProcessEnvironment, ProbeConfig::from(args));
  let stdout = io::stdout();
  probe.run(&mut stdout.lock())?;
  Ok(())
}
