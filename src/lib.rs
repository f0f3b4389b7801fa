//! Static Huffman compression of whole byte buffers.
//!
//! An archive stores only the symbol frequency table and the packed code bits; the tree
//! is rebuilt from the table on both sides with a deterministic tie-break.
//!
//! ```
//! let archive = huffzip::compress(b"abracadabra")?;
//! assert_eq!(huffzip::decompress(&archive)?, b"abracadabra");
//! # Ok::<(), huffzip::HuffError>(())
//! ```

pub mod archive;
pub mod bitstreams;
pub mod codec;
pub mod error;
pub mod huffman;
pub mod properties;
pub mod stats;
pub mod store;
pub mod utils;

pub use codec::{
    compress, decompress, compress_with_stats, decompress_with_stats,
    compress_file, decompress_file, decompress_file_checked,
};
pub use error::{HuffError, Result};
pub use properties::ArchiveProperties;
pub use stats::CompressionStats;
pub use store::{ByteStore, FsStore};
