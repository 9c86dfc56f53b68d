use clap::Parser;
use eyre::Result;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use todolist::{Filter, Format, Session, View};
use tracing::Level;

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "TodoList - in-memory task list with a recoverable trash")]
#[command(version)]
struct Cli {
    /// Filter selected at startup (all, completed, incomplete, removed)
    #[arg(short, long, default_value = "all")]
    filter: Filter,

    /// How the view is rendered after each command
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Disable ANSI colour in text output
    #[arg(long)]
    no_color: bool,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::INFO }
    }

    /// Colour applies to log lines as well as the rendered view
    fn log_ansi(&self) -> bool {
        !self.no_color
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing; stdout belongs to the rendered view
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(cli.log_level())
        .with_ansi(cli.log_ansi())
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut stdout = io::stdout().lock();
    let mut session = Session::new(View::with_filter(cli.filter), cli.format);

    match cli.script {
        Some(path) => session.run_file(&path, &mut stdout)?,
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            session = session.with_prompt(interactive);
            session.run(stdin.lock(), &mut stdout)?;
        }
    }

    Ok(())
}
