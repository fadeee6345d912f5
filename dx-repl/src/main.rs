mod error;
mod session;

use clap::Parser;
use dx_parser::DEFAULT_MAX_DEPTH;
use env_logger::Env;
use log::LevelFilter;
use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::{fs, io::{self, IsTerminal, Read}, path::PathBuf, process::ExitCode};

/// Parse, evaluate and differentiate expressions in `x`.
///
/// Each line is either an expression, which becomes the current expression, or a command acting
/// on the current expression. Type `:help` for the list of commands.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Read lines from this file instead of stdin.
    file: Option<PathBuf>,

    /// Maximum nesting depth of an expression.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Value of `x` used when printing a new expression.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    at: f64,

    /// Print debug logs.
    #[arg(short, long)]
    verbose: bool,
}

/// Processes one line of input, printing the output or reporting the error. Returns false if the
/// line failed.
fn read_eval(input: &str, session: &mut Session) -> bool {
    match session.process(input) {
        Ok(output) => {
            println!("{}", output.trim_end());
            true
        },
        Err(err) => {
            if let Err(io_err) = err.report_to_stderr(input) {
                log::error!("could not print report for `{}`: {}", err, io_err);
            }
            false
        },
    }
}

/// Processes every non-empty line of the given text.
fn run_lines(text: &str, session: &mut Session) -> ExitCode {
    let mut ok = true;
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        ok &= read_eval(line, session);
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Runs the interactive mode until end of input or Ctrl-C.
fn repl(session: &mut Session) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        rl.add_history_entry(input)?;
        read_eval(input, session);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let mut session = Session::new(args.at, args.max_depth);

    if let Some(path) = args.file {
        // run lines from a file
        match fs::read_to_string(&path) {
            Ok(text) => run_lines(&text, &mut session),
            Err(err) => {
                eprintln!("could not read {}: {}", path.display(), err);
                ExitCode::FAILURE
            },
        }
    } else if !io::stdin().is_terminal() {
        // read lines from stdin
        let mut text = String::new();
        match io::stdin().read_to_string(&mut text) {
            Ok(_) => run_lines(&text, &mut session),
            Err(err) => {
                eprintln!("could not read stdin: {}", err);
                ExitCode::FAILURE
            },
        }
    } else {
        // run the repl / interactive mode
        match repl(&mut session) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            },
        }
    }
}
