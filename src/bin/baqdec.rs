//! baqdec CLI - Sentinel-1 compressed echo decoding utility.
//!
//! Walks a file of Instrument Source Packets, expands the FDBAQ-compressed
//! echo samples, and writes the reconstructed I/Q channels as raw f32.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use baqdec_rs::isp::{IspReader, SignalType};
use baqdec_rs::{ChannelLayout, CodeTables, PacketDecoder};

/// Sentinel-1 FDBAQ radar echo decoder
#[derive(Parser)]
#[command(name = "baqdec")]
#[command(author = "baqdec-rs contributors")]
#[command(version)]
#[command(about = "Decode block-adaptive quantized radar echo packets", long_about = None)]
#[command(after_help = "EXAMPLES:
    baqdec decode -i capture.dat -o samples.f32
    baqdec decode -i capture.dat -o samples.f32 --layout alternating
    baqdec info -i capture.dat

OUTPUT FORMAT:
    decode writes little-endian f32 values per echo packet: the full I
    channel followed by the full Q channel.

For more information, visit: https://github.com/rad-medica/baqdec-rs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode the echo packets of an ISP file to raw I/Q samples
    ///
    /// Non-echo packets (noise, calibration) are skipped. A packet that
    /// fails to decode is reported on stderr and the batch continues.
    #[command(visible_alias = "d")]
    Decode {
        /// Input file of concatenated Instrument Source Packets
        #[arg(short, long, help = "Path to the input packet file")]
        input: PathBuf,

        /// Output file for reconstructed samples
        #[arg(short, long, help = "Path for the raw f32 output file")]
        output: PathBuf,

        /// Distribution of decoded values over the I and Q channels
        #[arg(short, long, default_value = "contiguous", value_enum)]
        layout: Layout,
    },

    /// Display per-packet header information and stream totals
    #[command(visible_alias = "i")]
    Info {
        /// Input file of concatenated Instrument Source Packets
        #[arg(short, long, help = "Path to the input packet file")]
        input: PathBuf,

        /// Maximum number of packets to list individually
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Clone, ValueEnum)]
enum Layout {
    /// Values alternate I, Q, I, Q
    Alternating,
    /// I channel first, then Q channel
    Contiguous,
}

impl From<&Layout> for ChannelLayout {
    fn from(layout: &Layout) -> Self {
        match layout {
            Layout::Alternating => ChannelLayout::Alternating,
            Layout::Contiguous => ChannelLayout::Contiguous,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            input,
            output,
            layout,
        } => decode_stream(&input, &output, &layout),
        Commands::Info { input, limit } => show_info(&input, limit),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn decode_stream(
    input: &PathBuf,
    output: &PathBuf,
    layout: &Layout,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let tables = CodeTables::new();
    let decoder = PacketDecoder::new(&tables);
    let layout = ChannelLayout::from(layout);

    let mut out = Vec::new();
    let mut decoded = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for packet in IspReader::new(&data) {
        let packet = packet?;
        if packet.secondary.signal_type != SignalType::Echo {
            skipped += 1;
            continue;
        }

        let count = packet.secondary.samples_per_channel();
        match decoder.decode(packet.source_data, count, layout) {
            Ok(result) => {
                for value in result.i_samples.iter().chain(&result.q_samples) {
                    out.extend_from_slice(&value.to_le_bytes());
                }
                decoded += 1;
            }
            Err(err) => {
                eprintln!(
                    "Warning: packet {} skipped: {}",
                    packet.secondary.space_packet_count, err
                );
                failed += 1;
            }
        }
    }

    fs::write(output, &out)?;
    println!(
        "✓ Decoded {} echo packets to {:?} ({} non-echo skipped, {} failed)",
        decoded, output, skipped, failed
    );
    Ok(())
}

fn show_info(input: &PathBuf, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;

    let mut total = 0usize;
    let mut echo = 0usize;
    let mut total_quads = 0usize;

    for packet in IspReader::new(&data) {
        let packet = packet?;
        total += 1;
        if packet.secondary.signal_type == SignalType::Echo {
            echo += 1;
        }
        total_quads += packet.secondary.number_of_quads as usize;

        if total <= limit {
            println!(
                "packet {:>6}  apid {:#05x}  swath {:>2}  {:?}  baq mode {:>2}  quads {:>5}",
                packet.secondary.space_packet_count,
                packet.primary.apid,
                packet.secondary.swath_number,
                packet.secondary.signal_type,
                packet.secondary.baq_mode,
                packet.secondary.number_of_quads
            );
        }
    }

    if total > limit {
        println!("... {} more packets", total - limit);
    }
    println!(
        "✓ {} packets ({} echo), {} sample quads total",
        total, echo, total_quads
    );
    Ok(())
}
