use std::path::PathBuf;
use std::process::ExitCode;
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use lr0::report::Report;
use lr0::{Automaton, Config, RawGrammar};

/// Builds the LR(0) automaton of a grammar.
#[derive(Debug, Parser)]
#[command(name = "lr0", version, about)]
struct Cli {
  /// Grammar file: JSON, or one `A -> x y` rule per line with --rules
  file: PathBuf,

  /// Read the grammar as plain rules instead of JSON
  #[arg(long)]
  rules: bool,

  /// Output format
  #[arg(short, long, value_enum, default_value_t = Format::Text)]
  format: Format,

  /// JSON file with construction settings
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Warn when the automaton has more states than this
  #[arg(long, value_name = "N")]
  threshold: Option<usize>,

  /// Give up when the automaton needs more states than this
  #[arg(long, value_name = "N")]
  max_states: Option<usize>,

  /// Increase logging verbosity (-v: debug, -vv+: trace)
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
  Text,
  Json,
  Dot,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
    )
    .with_writer(std::io::stderr)
    .init();

  match run(&cli) {
    Ok(output) => {
      print!("{}", output);
      ExitCode::SUCCESS
    }
    Err(e) => {
      eprintln!("error: {}", e);
      ExitCode::FAILURE
    }
  }
}

fn directive_for_verbosity(v: u8) -> &'static str {
  match v {
    0 => "lr0=info",
    1 => "lr0=debug",
    _ => "lr0=trace",
  }
}

fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
  let mut config = match &cli.config {
    Some(path) => Config::from_path(path)?,
    None => Config::default(),
  };
  if let Some(threshold) = cli.threshold {
    config.state_count_warning_threshold = threshold;
  }
  if cli.max_states.is_some() {
    config.max_states = cli.max_states;
  }

  let raw = if cli.rules {
    RawGrammar::rules_from_path(&cli.file)?
  } else {
    RawGrammar::from_path(&cli.file)?
  };

  let automaton = lr0::build(&raw, &config)?;
  if cli.format != Format::Text {
    // the text listing already ends with them
    for advisory in automaton.advisories() {
      eprintln!("warning: {}", advisory);
    }
  }

  let output = match cli.format {
    Format::Text => automaton.to_string(),
    Format::Json => {
      let mut json = Report::new(&automaton).to_json()?;
      json.push('\n');
      json
    }
    Format::Dot => dot(&automaton)?,
  };
  Ok(output)
}

#[cfg(feature = "dot")]
fn dot(automaton: &Automaton) -> Result<String, Box<dyn std::error::Error>> {
  Ok(lr0::graphviz::to_dot(automaton)?)
}

#[cfg(not(feature = "dot"))]
fn dot(_: &Automaton) -> Result<String, Box<dyn std::error::Error>> {
  Err("built without the `dot` feature".into())
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
  }

  #[test]
  fn parses_flags() {
    let cli = Cli::try_parse_from([
      "lr0", "g.json", "--format", "json", "--threshold", "10", "-vv",
    ]).unwrap();

    assert_eq!(cli.format, Format::Json);
    assert_eq!(cli.threshold, Some(10));
    assert_eq!(cli.verbose, 2);
    assert!(!cli.rules);
  }
}
