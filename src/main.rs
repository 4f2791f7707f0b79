use std::io::{self, Read, Write};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use huffpack::{CodecConfig, CompressedArtifact, Encoder, HuffmanError, TableFormat};

#[derive(Parser)]
#[command(name = "huffpack", version)]
#[command(about = "Huffman-compress stdin to stdout", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum TableArg {
    /// Store symbol, length and code bits for every entry.
    Explicit,
    /// Store only symbol and length; codes are reassigned canonically.
    Canonical,
}

impl From<TableArg> for TableFormat {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Explicit => TableFormat::Explicit,
            TableArg::Canonical => TableFormat::Canonical,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compress stdin into an artifact on stdout
    Compress {
        #[arg(long, value_enum, default_value_t = TableArg::Explicit)]
        table: TableArg,
    },
    /// Decompress an artifact from stdin
    Decompress,
    /// Print the code assigned to every symbol of stdin
    Codes {
        #[arg(long, value_enum, default_value_t = TableArg::Explicit)]
        table: TableArg,
        /// Also print the encoded payload as a bit string
        #[arg(long)]
        payload: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("logger already initialised");
    }
}

fn encoder(table: TableArg) -> Encoder {
    Encoder::new(CodecConfig {
        table_format: table.into(),
    })
}

fn main() -> Result<(), HuffmanError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Compress { table } => {
            let bytes = encoder(table).encode(&input)?.to_bytes();
            info!(input = input.len(), output = bytes.len(), "compressed");
            stdout.write_all(&bytes)?;
        }
        Commands::Decompress => {
            let artifact = CompressedArtifact::from_bytes(&input)?;
            let bytes = huffpack::decode(&artifact)?;
            info!(input = input.len(), output = bytes.len(), "decompressed");
            stdout.write_all(&bytes)?;
        }
        Commands::Codes { table, payload } => {
            let artifact = encoder(table).encode(&input)?;
            for (symbol, code) in artifact.table().iter() {
                let shown = if symbol.is_ascii_graphic() {
                    format!("'{}'", symbol as char)
                } else {
                    format!("{symbol:#04x}")
                };
                writeln!(stdout, "{shown:>6} {code}")?;
            }
            if payload {
                writeln!(stdout, "{}", artifact.payload_bit_string())?;
            }
        }
    }

    stdout.flush()?;
    Ok(())
}
