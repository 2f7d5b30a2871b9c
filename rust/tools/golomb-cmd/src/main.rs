use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "golomb-cmd")]
#[command(about = "Command-line utility for building and querying Golomb-Rice coded sets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Hash function selection shared by the commands that hash values
#[derive(Args, Clone)]
pub(crate) struct HashArgs {
    /// Hash algorithm: murmur3_32 or xxh32
    #[arg(long = "hash", default_value = golomb_filter::MURMUR3_32_ALGORITHM)]
    algorithm: String,

    /// Hash function seed
    #[arg(long, default_value_t = 0)]
    seed: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a filter from a file of newline-separated values
    Build {
        /// Golomb-Rice parameter; false positive rate is about 2^-power
        #[arg(short, long, default_value_t = golomb_filter::DEFAULT_POWER)]
        power: u32,

        #[command(flatten)]
        hash: HashArgs,

        /// File with one value per line
        #[arg(short, long)]
        input: String,

        /// Output file for the encoded filter
        output: String,
    },

    /// Test values for membership in an encoded filter
    Query {
        /// Golomb-Rice parameter the filter was built with
        #[arg(short, long, default_value_t = golomb_filter::DEFAULT_POWER)]
        power: u32,

        #[command(flatten)]
        hash: HashArgs,

        /// Exact bit length of the encoded filter (trailing padding is skipped if omitted)
        #[arg(long)]
        bit_len: Option<usize>,

        /// Encoded filter file
        filter_path: String,

        /// Values to test
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Decode a filter and display summary information
    Inspect {
        /// Golomb-Rice parameter the filter was built with
        #[arg(short, long, default_value_t = golomb_filter::DEFAULT_POWER)]
        power: u32,

        /// Exact bit length of the encoded filter (trailing padding is skipped if omitted)
        #[arg(long)]
        bit_len: Option<usize>,

        /// Increase verbosity (-v lists the members)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        /// Encoded filter file
        filter_path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            power,
            hash,
            input,
            output,
        } => commands::build::run(commands::filter_config(power, hash), input, output),
        Commands::Query {
            power,
            hash,
            bit_len,
            filter_path,
            values,
        } => commands::query::run(
            commands::filter_config(power, hash),
            bit_len,
            filter_path,
            values,
        ),
        Commands::Inspect {
            power,
            bit_len,
            verbose,
            filter_path,
        } => commands::inspect::run(power, bit_len, verbose, filter_path),
    }
}
