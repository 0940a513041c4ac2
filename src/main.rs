#![forbid(unsafe_code)]

use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

#[derive(Debug, Parser)]
#[command(name = "mdroff", version)]
struct Cli {
    /// Markdown man page source to convert
    #[arg(value_name = "MARKDOWN_FILE")]
    input: PathBuf,

    /// Write the man page to a file instead of displaying it
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("mdroff: {error}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = fs::read_to_string(&cli.input)
        .map_err(|err| format!("{}: {err}", cli.input.display()))?;
    let man_page = mdroff::convert_markdown_to_roff(&markdown)?;

    match &cli.output {
        Some(path) => fs::write(path, &man_page)?,
        None => {
            if io::stdout().is_terminal() {
                view_man_page(&man_page)?;
            } else {
                print!("{man_page}");
            }
        }
    }
    Ok(())
}

/// Displays the man page with `man -l -`, falling back to stdout when the
/// pager cannot be spawned.
fn view_man_page(man_page: &str) -> io::Result<()> {
    match Command::new("man")
        .args(["-l", "-"])
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(mut stdin) = child.stdin.take() {
                // A broken pipe just means the pager quit early.
                let _ = stdin.write_all(man_page.as_bytes());
            }
            child.wait()?;
            Ok(())
        }
        Err(_) => {
            print!("{man_page}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
