// Tue Jan 13 2026 - Alex

use colored::Colorize;
use reflect_sdk_generator::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}
