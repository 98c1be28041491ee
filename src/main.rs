use clap::Parser;
use greenbar::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
