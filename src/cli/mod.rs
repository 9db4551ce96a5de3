// Command Line Front End
// Demonstration, benchmark and interactive glue over the RSA core

pub mod bench;
pub mod demo;
pub mod interactive;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::rsa::config::DEFAULT_ROUNDS;

/// Default key size for the demonstration modes
pub const DEFAULT_DEMO_BITS: u64 = 1024;

#[derive(Parser, Debug)]
#[command(name = "rsa-lab", about = "Textbook RSA: primes, keys, encryption")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a key pair and round-trip a message and a number
    Demo {
        #[arg(short = 'b', long = "bits", default_value_t = DEFAULT_DEMO_BITS)]
        bits: u64,

        #[arg(short = 'm', long = "message", default_value = "Hello, RSA!")]
        message: String,

        /// Seed the generator for reproducible output
        #[arg(long = "seed")]
        seed: Option<u64>,
    },

    /// The p = 61, q = 53, e = 17 textbook example
    Textbook,

    /// Generate a single prime
    Prime {
        #[arg(short = 'b', long = "bits", default_value_t = 512)]
        bits: u64,

        #[arg(short = 'k', long = "kind", value_enum, default_value_t = PrimeKind::Plain)]
        kind: PrimeKind,

        /// Miller-Rabin rounds
        #[arg(long = "rounds", default_value_t = DEFAULT_ROUNDS)]
        rounds: u32,
    },

    /// Time key generation and string encryption across key sizes
    Bench {
        #[arg(long = "sizes", value_delimiter = ',', default_values_t = vec![512u64, 1024, 2048])]
        sizes: Vec<u64>,

        #[arg(long = "iterations", default_value_t = 1)]
        iterations: u32,
    },

    /// Menu-driven encrypt/decrypt session on stdin
    Interactive {
        #[arg(short = 'b', long = "bits", default_value_t = DEFAULT_DEMO_BITS)]
        bits: u64,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrimeKind {
    Plain,
    Safe,
    Strong,
}

/// Seeded generator when a seed is given, OS entropy otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Demo { bits, message, seed } => demo::run_demo(&mut out, bits, &message, seed),
        Command::Textbook => demo::run_textbook(&mut out),
        Command::Prime { bits, kind, rounds } => demo::run_prime(&mut out, bits, kind, rounds),
        Command::Bench { sizes, iterations } => bench::run_benchmark(&mut out, &sizes, iterations),
        Command::Interactive { bits } => {
            let stdin = std::io::stdin();
            interactive::run_interactive(stdin.lock(), &mut out, bits)
        }
    }
}
