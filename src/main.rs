use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use kb::{Flow, Session, SessionOptions};

/// kb evaluates a homoiconic knowledge-base language and prints every
/// expression next to its result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells kb to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Leaves node identities out of the printed trees.
    #[arg(short, long)]
    test: bool,

    /// Script, or path with `--file`. Reads standard input when absent.
    contents: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut session = Session::new(SessionOptions { test_mode: args.test });
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match args.contents {
        Some(contents) => {
            let script = if args.file {
                fs::read_to_string(&contents).unwrap_or_else(|_| {
                    eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                    std::process::exit(1);
                })
            } else {
                contents
            };
            session.run(&script, &mut out).map(|_| ())
        },
        None => repl(&mut session, &mut out),
    };

    if let Err(e) = result.and_then(|()| out.flush()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Feeds standard input to the session until `.end` or end of input.
fn repl(session: &mut Session, out: &mut impl Write) -> io::Result<()> {
    for line in io::stdin().lock().lines() {
        if session.feed_line(&line?, out)? == Flow::Halt {
            return Ok(());
        }
        out.flush()?;
    }
    session.finish(out)
}
