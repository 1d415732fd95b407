use std::{hint::black_box, process::ExitCode};

use clap::Parser;
use log::error;
use rand::Rng;
use serde::Serialize;

use huffman_rust::{utils::timer::Timer, CodecConfig, HuffmanCodec, Layout, MatcherKind};

#[derive(Parser, Debug)]
#[command(about = "Time encode and decode over random skewed messages")]
struct Args {
    /// Length of each generated message
    #[arg(short = 'n', long, default_value_t = 1 << 16)]
    message_len: usize,
    /// Number of distinct byte values to draw from
    #[arg(short, long, default_value_t = 32)]
    alphabet: u16,
    /// Container layout
    #[arg(short, long, value_enum, default_value_t = Layout::Wide)]
    layout: Layout,
    /// Print the results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

const N_RUNS: usize = 10;

#[derive(Serialize, Debug)]
struct BenchResult {
    matcher: MatcherKind,
    runs: usize,
    message_len: usize,
    mean_container_bytes: f64,
    mean_encode_ns: f64,
    mean_decode_ns: f64,
}

fn gen_message(len: usize, alphabet: u16) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let x: f64 = rng.gen();
            (x * x * alphabet as f64) as u8
        })
        .collect()
}

/// Legacy bodies over-decode their zero padding, so only the message prefix is compared.
fn round_trips(layout: Layout, message: &[u8], decoded: &[u8]) -> bool {
    match layout {
        Layout::Legacy => decoded.starts_with(message),
        Layout::Compact | Layout::Wide => decoded == message,
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if args.alphabet == 0 || args.alphabet > 256 {
        eprintln!("alphabet must be between 1 and 256");
        return ExitCode::FAILURE;
    }

    let messages: Vec<_> = (0..N_RUNS).map(|_| gen_message(args.message_len, args.alphabet)).collect();
    let mut results = Vec::new();

    for matcher in [MatcherKind::Trie, MatcherKind::LinearScan] {
        let codec = HuffmanCodec::new(CodecConfig::new(args.layout, matcher));
        let mut encode_time = Timer::new();
        let mut decode_time = Timer::new();
        let mut container_bytes = 0;

        for message in messages.iter() {
            let container = match encode_time.time(|| codec.encode(black_box(message))) {
                Ok(container) => container,
                Err(e) => {
                    error!("encode failed: {e}");
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            container_bytes += container.len();

            match decode_time.time(|| codec.decode(black_box(&container))) {
                Ok(decoded) if round_trips(args.layout, message, &decoded) => {}
                Ok(_) => {
                    eprintln!("round trip mismatch with the {matcher} matcher");
                    return ExitCode::FAILURE;
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }

        results.push(BenchResult {
            matcher,
            runs: N_RUNS,
            message_len: args.message_len,
            mean_container_bytes: container_bytes as f64 / N_RUNS as f64,
            mean_encode_ns: encode_time.mean(),
            mean_decode_ns: decode_time.mean(),
        });
    }

    if args.json {
        match serde_json::to_string_pretty(&results) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for r in results.iter() {
            println!("################### {} matcher ###################", r.matcher);
            println!("mean container size {:.0} bytes for {} byte messages", r.mean_container_bytes, r.message_len);
            println!("mean encode time {:.0} ns", r.mean_encode_ns);
            println!("mean decode time {:.0} ns", r.mean_decode_ns);
        }
    }

    ExitCode::SUCCESS
}
