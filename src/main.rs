use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use huffman_codec::{CodecConfig, HuffmanCodec, Package, SymbolUnit};

#[derive(Parser)]
#[command(name = "huffc")]
#[command(about = "Huffman encode, decode and compare files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "JSON config file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file into a package
    Encode {
        input: PathBuf,
        #[arg(short, long, help = "Package path (defaults to <INPUT>.huff)")]
        output: Option<PathBuf>,
        #[arg(long, help = "Symbol unit: byte or char (overrides config)")]
        unit: Option<SymbolUnit>,
        #[arg(long, help = "Also write the code table listing to this path")]
        dictionary: Option<PathBuf>,
        #[arg(long, help = "Print the code table listing")]
        print_dictionary: bool,
    },
    /// Decode a package back into the original bytes
    Decode {
        package: PathBuf,
        #[arg(short, long, help = "Output path (defaults to stdout)")]
        output: Option<PathBuf>,
    },
    /// Compare Huffman output size against LZ4 and zlib
    Compare {
        input: PathBuf,
        #[arg(long, help = "Symbol unit: byte or char (overrides config)")]
        unit: Option<SymbolUnit>,
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Print the code table of a file
    Dictionary {
        input: PathBuf,
        #[arg(long, help = "Symbol unit: byte or char (overrides config)")]
        unit: Option<SymbolUnit>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "huffman_codec=debug,huffc=debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => CodecConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CodecConfig::default(),
    };

    match cli.command {
        Commands::Encode {
            input,
            output,
            unit,
            dictionary,
            print_dictionary,
        } => {
            let codec = codec_for(&config, unit)?;
            let data = read_input(&input)?;
            let compressed = codec.compress(&data)?;
            let output = output.unwrap_or_else(|| input.with_extension("huff"));
            compressed
                .package
                .write_to(&output)
                .with_context(|| format!("writing package to {}", output.display()))?;
            info!(
                input = %input.display(),
                output = %output.display(),
                original = compressed.original_size,
                compressed = compressed.compressed_size,
                bits = compressed.metadata.bit_len,
                "encoded file"
            );

            let listing = compressed.package.dictionary();
            if let Some(path) = dictionary {
                fs::write(&path, &listing)
                    .with_context(|| format!("writing dictionary to {}", path.display()))?;
            }
            if print_dictionary {
                print!("{}", listing);
            }
        }
        Commands::Decode { package, output } => {
            let loaded = Package::read_from(&package)
                .with_context(|| format!("reading package {}", package.display()))?;
            let data = loaded.decode_bytes()?;
            match output {
                Some(path) => {
                    fs::write(&path, &data)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(output = %path.display(), bytes = data.len(), "decoded package");
                }
                None => {
                    use std::io::Write;
                    std::io::stdout().write_all(&data)?;
                }
            }
        }
        Commands::Compare { input, unit, json } => {
            let codec = codec_for(&config, unit)?;
            let data = read_input(&input)?;
            let report = codec.report(&data)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
        Commands::Dictionary { input, unit } => {
            let codec = codec_for(&config, unit)?;
            let data = read_input(&input)?;
            print!("{}", codec.compress(&data)?.package.dictionary());
        }
    }

    Ok(())
}

fn codec_for(config: &CodecConfig, unit: Option<SymbolUnit>) -> Result<HuffmanCodec> {
    let mut config = config.clone();
    if let Some(unit) = unit {
        config.symbol_unit = unit;
    }
    Ok(HuffmanCodec::new(config)?)
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}
