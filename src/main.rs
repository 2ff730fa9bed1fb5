mod commands;
mod core;
mod release;

use clap::Parser;
use core::error::{PodError, print_error};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Bump, tag, push and publish the CocoaPods specs of this repository
#[derive(Parser)]
#[command(name = "pod-release")]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Pods to release, matched case-insensitively against *.podspec names
  #[arg(long, num_args = 1.., value_name = "NAME", default_value = release::plan::ALL_PODS)]
  pods: Vec<String>,

  /// Target version/tag (default: latest git tag with its minor bumped)
  #[arg(long)]
  version: Option<String>,

  /// Commit message (default: "new pod release version <version>")
  #[arg(long)]
  message: Option<String>,

  /// Run as if started in this directory
  #[arg(short = 'C', long = "dir", value_name = "PATH")]
  dir: Option<PathBuf>,

  /// Show the release plan without changing anything
  #[arg(long)]
  dry_run: bool,

  /// Output the dry-run plan in JSON format
  #[arg(long, requires = "dry_run")]
  json: bool,

  /// Tag and push, but skip `pod repo push`
  #[arg(long)]
  no_publish: bool,

  /// Don't echo commands and their output
  #[arg(short, long)]
  quiet: bool,

  /// Log debug details to stderr (overridden by RUST_LOG)
  #[arg(short, long)]
  verbose: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Initialize tracing on stderr so stdout carries only release output
fn init_tracing(verbose: bool) {
  let default = if verbose { "pod_release=debug" } else { "pod_release=warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let dir = match cli.dir {
    Some(dir) => dir,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        eprintln!("Error: Failed to get current directory: {}", e);
        std::process::exit(1);
      }
    },
  };

  let ws = match core::context::Workspace::build(&dir) {
    Ok(ws) => ws,
    Err(e) => handle_error(e),
  };

  let opts = commands::ReleaseOptions {
    args: release::ReleaseArgs {
      pods: cli.pods,
      version: cli.version,
      message: cli.message,
    },
    dry_run: cli.dry_run,
    json: cli.json,
    no_publish: cli.no_publish,
    quiet: cli.quiet,
  };

  if let Err(err) = commands::run_release(&ws, &opts) {
    handle_error(err);
  }
}

fn handle_error(err: PodError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
