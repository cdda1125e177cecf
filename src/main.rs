use anstyle::{AnsiColor, Color, Style};
use clap::{Parser, Subcommand};
use lz::git::GitError;
use lz::styling::{ERROR_EMOJI, eprintln};
use std::process;

mod commands;

#[derive(Parser)]
#[command(name = "lz")]
#[command(about = "Browse git status across many repositories", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Enable verbose output (show git commands and debug info)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the status of every repository in this directory
    #[command(visible_alias = "g")]
    #[command(after_help = "\
DISCOVERY:
  The current directory and its immediate subdirectories are searched for
  repositories. When input is piped, one record per line is read instead:
  a display name, a tab, then the repository path.

COLUMNS:
  Branch   Current branch (HEAD when detached)
  Age      Time since the last commit
  ↑N / ∅   Commits ahead of upstream, or no upstream configured
  ↓N       Commits behind upstream
  ≡N       Stash entries
  @tag     Most recent reachable tag

FILES:
  ?  untracked      M  modified       A  added
  D  deleted        R  renamed        ~  other

KEYS:
  ↑/↓ k/j   move                  → l enter   open diff
  g/G       first/last            ← h         back
  e         open in $VISUAL/$EDITOR
  q         quit                  Esc         back/quit")]
    Git {
        /// Print the list once instead of browsing it
        #[arg(long, short = 'l')]
        list: bool,
    },
}

/// One character per thread (0-9, then a-z), so interleaved rayon workers
/// can be told apart in `-v` output.
fn thread_tag() -> char {
    let id = format!("{:?}", std::thread::current().id());
    id.trim_start_matches("ThreadId(")
        .trim_end_matches(')')
        .parse::<u32>()
        .ok()
        .and_then(|n| char::from_digit(n % 36, 36))
        .unwrap_or('?')
}

/// Commands in bold, failures in red.
fn line_style(msg: &str) -> Style {
    if msg.starts_with("$ ") {
        Style::new().bold()
    } else if msg.starts_with("  ! ") {
        Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)))
    } else {
        Style::new()
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --verbose flag or RUST_LOG env var
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "off" }),
    )
    .format(|buf, record| {
        use std::io::Write;

        let msg = record.args().to_string();
        let dim = Style::new().dimmed();
        let style = line_style(&msg);
        writeln!(buf, "{dim}[{}]{dim:#} {style}{msg}{style:#}", thread_tag())
    })
    .init();

    let result = match cli.command {
        Commands::Git { list } => commands::handle_git(list),
    };

    if let Err(e) = result {
        // Typed errors carry their own styling and exit code
        let exit_code = match e.downcast_ref::<GitError>() {
            Some(git_error) => {
                eprintln!("{git_error}");
                git_error.exit_code()
            }
            None => {
                eprintln!("{ERROR_EMOJI} {e:#}");
                1
            }
        };
        process::exit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_style() {
        assert_eq!(line_style("$ git -C /src/api status"), Style::new().bold());
        assert_eq!(
            line_style("  ! git log failed in /src/api: fatal"),
            Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)))
        );
        assert_eq!(line_style("Found 3 repositories"), Style::new());
    }

    #[test]
    fn test_thread_tag_is_stable_per_thread() {
        let tag = thread_tag();
        assert_ne!(tag, '?');
        assert_eq!(thread_tag(), tag);
    }
}
