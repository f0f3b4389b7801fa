use std::{path::Path, process::ExitCode};

use clap::Parser;
use tracing::{error, info, warn};
use huffzip::{
    decompress_file, decompress_file_checked, utils::logging,
    ArchiveProperties, ByteStore, FsStore, HuffError, Result,
};

#[derive(Parser, Debug)]
#[command(about = "Restore a file from a Huffman archive")]
struct Args {
    /// The archive to decompress
    source_name: String,
    /// The file to be written
    dest_name: String,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Print the decompression stats as JSON on stdout
    #[arg(short = 's', long = "stats", default_value_t = false)]
    print_stats: bool,
    /// Check the archive against <source_name>.properties before writing
    #[arg(short, long, default_value_t = false)]
    properties: bool,
}

fn run<S: ByteStore>(store: &S, args: &Args) -> Result<()> {
    let source_name = Path::new(&args.source_name);
    let dest_name = Path::new(&args.dest_name);

    let expected = if args.properties {
        match ArchiveProperties::fetch(store, source_name) {
            Ok(props) => Some(props),
            Err(HuffError::Io(e)) => {
                warn!("could not read {}: {}", ArchiveProperties::sidecar_name(source_name).display(), e);
                None
            }
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    let stats = match &expected {
        Some(props) => {
            let stats = decompress_file_checked(store, source_name, dest_name, props)?;
            info!("archive matches {}", ArchiveProperties::sidecar_name(source_name).display());
            stats
        }
        None => decompress_file(store, source_name, dest_name)?,
    };

    info!("decompressed {} bytes into {} in {}ns", stats.input_len, stats.output_len, stats.total_time());

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
