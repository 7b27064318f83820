//! jsondb Shell Binary
//!
//! Interactive command loop over a jsondb database.

use std::io::{self, BufRead, Write};

use clap::Parser;
use jsondb::shell::{Command, Outcome, Session};
use jsondb::Database;
use tracing_subscriber::{fmt, EnvFilter};

/// jsondb shell
#[derive(Parser, Debug)]
#[command(name = "jsondb")]
#[command(about = "Embedded file-backed JSON document store")]
#[command(version)]
struct Args {
    /// Database directory to load at startup
    #[arg(short, long)]
    db: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(short, long, default_value = "warn,jsondb=info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr so they never interleave with command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    tracing::debug!("jsondb v{}", jsondb::VERSION);

    let mut session = match args.db {
        Some(path) => match Database::load(&path) {
            Ok(db) => Session::with_database(db),
            Err(e) => {
                tracing::error!("Failed to load database {}: {}", path, e);
                fatal(&format!("load failed: {}", e));
            }
        },
        None => Session::new(),
    };

    if let Err(e) = run(&mut session) {
        fatal(&format!("read error: {}", e));
    }
}

/// Read-eval-print loop. Command errors are printed and the loop goes on;
/// only a failure to read stdin ends it with an error.
fn run(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    println!("enter commands (type 'help' for list, 'quit' to exit)");

    loop {
        print!("{}", session.prompt());
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            print!("\njsondb: bye\n\n");
            return Ok(());
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                report(&e);
                continue;
            }
        };

        match session.execute(command) {
            Ok(Outcome::Continue(Some(message))) => println!("{}", message),
            Ok(Outcome::Continue(None)) => {}
            Ok(Outcome::Quit) => {
                print!("\njsondb: bye\n\n");
                return Ok(());
            }
            Err(e) => report(&e),
        }
    }
}

fn report(error: &jsondb::JsonDbError) {
    println!();
    println!("jsondb: {}", error);
    println!();
}

fn fatal(message: &str) -> ! {
    println!();
    println!("jsondb: {}", message);
    println!();
    std::process::exit(1);
}
