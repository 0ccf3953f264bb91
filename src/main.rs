use clap::Parser;
use std::process;
use yearsort::cli::{Cli, run};
use yearsort::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) => {
            if summary.failed > 0 {
                OutputFormatter::error(&format!("total errors: {}", summary.failed));
                process::exit(1);
            }
        }
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            process::exit(2);
        }
    }
}
