use std::{path::Path, process::ExitCode};

use clap::Parser;
use tracing::{error, info};
use huffzip::{compress_file, utils::logging, ArchiveProperties, ByteStore, FsStore, Result};

#[derive(Parser, Debug)]
#[command(about = "Compress a file into a Huffman archive")]
struct Args {
    /// The file to compress
    source_name: String,
    /// The archive to be written
    dest_name: String,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Print the compression stats as JSON on stdout
    #[arg(short = 's', long = "stats", default_value_t = false)]
    print_stats: bool,
    /// Also write <dest_name>.properties describing the archive
    #[arg(short, long, default_value_t = false)]
    properties: bool,
}

fn run<S: ByteStore>(store: &S, args: &Args) -> Result<()> {
    let dest_name = Path::new(&args.dest_name);
    let stats = compress_file(store, Path::new(&args.source_name), dest_name)?;

    if args.properties {
        let props = ArchiveProperties::from_archive(&store.read_all_bytes(dest_name)?)?;
        props.store(store, dest_name)?;
    }

    info!("compressed {} into {} bytes ({:.1}%) in {}ns",
        stats.input_len, stats.output_len, stats.ratio() * 100.0, stats.total_time());

    if args.print_stats {
        println!("{}", stats.to_json()?);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_level);

    match run(&FsStore, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
