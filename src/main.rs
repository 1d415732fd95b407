use std::{fs, process::ExitCode, time::Instant};

use clap::{Parser, Subcommand};
use log::{error, info, warn};

use huffman_rust::{properties::Properties, CodecConfig, HuffmanCodec, Layout, MatcherKind, Result};

#[derive(Parser, Debug)]
#[command(about = "Compress and decompress files with a byte-oriented Huffman code")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file and write a `.properties` sidecar next to it
    Compress {
        /// The file to compress
        source_name: String,
        /// The destination of the compressed container
        dest_name: String,
        /// Container layout
        #[arg(short, long, value_enum, default_value_t = Layout::Compact)]
        layout: Layout,
        /// Print the encoding statistics as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Decompress a container produced by `compress`
    Decompress {
        /// The compressed container
        source_name: String,
        /// The destination of the decompressed file
        dest_name: String,
        /// Container layout, overriding the one in the sidecar
        #[arg(short, long, value_enum)]
        layout: Option<Layout>,
        /// Prefix matching strategy
        #[arg(short, long, value_enum)]
        matcher: Option<MatcherKind>,
    },
}

fn compress(source_name: &str, dest_name: &str, layout: Layout, json: bool) -> Result<()> {
    let message = fs::read(source_name)?;
    let codec = HuffmanCodec::new(CodecConfig::new(layout, MatcherKind::default()));

    let comp_time = Instant::now();
    let (container, stats) = codec.encode_with_stats(&message)?;
    let comp_time = comp_time.elapsed().as_nanos();

    fs::write(dest_name, &container)?;
    Properties::from_stats(&stats, codec.config().matcher).store(dest_name)?;
    info!("wrote {}", Properties::path_for(dest_name));

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "compressed {} bytes into {} bytes ({:.1}%) in {}ns",
            stats.original_length,
            stats.container_bytes,
            stats.ratio() * 100.0,
            comp_time
        );
    }

    Ok(())
}

fn decompress(source_name: &str, dest_name: &str, layout: Option<Layout>, matcher: Option<MatcherKind>) -> Result<()> {
    let props = Properties::load_if_present(source_name)?;
    if props.is_none() {
        warn!("no {} found, assuming defaults", Properties::path_for(source_name));
    }

    let mut config = props.as_ref().map(Properties::codec_config).unwrap_or_default();
    if let Some(layout) = layout {
        config.layout = layout;
    }
    if let Some(matcher) = matcher {
        config.matcher = matcher;
    }

    let container = fs::read(source_name)?;

    let decomp_time = Instant::now();
    let message = HuffmanCodec::new(config).decode(&container)?;
    let decomp_time = decomp_time.elapsed().as_nanos();

    let message = match props {
        Some(props) => props.fit_decoded(config.layout, message)?,
        None => message,
    };

    fs::write(dest_name, &message)?;
    println!("decompressed {} bytes in {}ns", message.len(), decomp_time);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Command::Compress { source_name, dest_name, layout, json } => compress(&source_name, &dest_name, layout, json),
        Command::Decompress { source_name, dest_name, layout, matcher } => {
            decompress(&source_name, &dest_name, layout, matcher)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
