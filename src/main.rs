use clap::Parser;

use prevent_dangling_todos::cli::Cli;
use prevent_dangling_todos::commands::run_check;

fn main() {
    let cli = Cli::parse();
    std::process::exit(run_check(&cli));
}
