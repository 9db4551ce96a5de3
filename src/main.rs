use std::process;

use clap::Parser;

fn main() {
    env_logger::init();

    let args = rsa_lab::cli::Args::parse();
    if let Err(e) = rsa_lab::cli::run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
