use std::path::Path;

use tracing::{debug, info};

use crate::{
    archive::ArchiveCodec,
    error::Result,
    huffman::{FrequencyTable, EncodingMap, tree, huffman_encoder, huffman_decoder},
    properties::ArchiveProperties,
    stats::{CompressionStats, PhaseTimers},
    store::ByteStore,
};

/// Compresses `source` into a self-contained archive.
pub fn compress(source: &[u8]) -> Result<Vec<u8>> {
    compress_with_stats(source).map(|(archive, _)| archive)
}

/// Expands an archive produced by [`compress`] into the original bytes.
pub fn decompress(archive: &[u8]) -> Result<Vec<u8>> {
    decompress_with_stats(archive).map(|(original, _)| original)
}

pub fn compress_with_stats(source: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
    let mut timers = PhaseTimers::default();

    let table = timers.frequency.time(|| FrequencyTable::analyze(source));
    let root = timers.tree.time(|| tree::build(&table));
    let map = timers.code_map.time(|| EncodingMap::build(root.as_ref()));
    debug!(symbols = table.len(), input_len = source.len(), "built encoding map");

    let bits = timers.coding.time(|| huffman_encoder::encode(source, &map))?;
    let archive = timers.archive.time(|| ArchiveCodec::serialize(&table, &bits));

    let mut stats = CompressionStats {
        input_len: source.len(),
        output_len: archive.len(),
        symbols: table.len(),
        payload_bits: bits.len(),
        average_code_len: map.average_code_len(&table),
        ..Default::default()
    };
    timers.record(&mut stats);
    debug!(?stats, "compressed");

    Ok((archive, stats))
}

pub fn decompress_with_stats(archive: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
    let mut timers = PhaseTimers::default();

    let (table, bits) = timers.archive.time(|| ArchiveCodec::deserialize(archive))?;
    let root = timers.tree.time(|| tree::build(&table));
    let original = timers.coding.time(|| huffman_decoder::decode(&bits, root.as_ref(), table.total()))?;

    let mut stats = CompressionStats {
        input_len: archive.len(),
        output_len: original.len(),
        symbols: table.len(),
        payload_bits: bits.len(),
        average_code_len: if original.is_empty() { 0.0 } else { bits.len() as f64 / original.len() as f64 },
        ..Default::default()
    };
    timers.record(&mut stats);
    debug!(?stats, "decompressed");

    Ok((original, stats))
}

/// Compresses the file at `source_name` into `dest_name`. Nothing is written on failure.
pub fn compress_file<S: ByteStore>(store: &S, source_name: &Path, dest_name: &Path) -> Result<CompressionStats> {
    let source = store.read_all_bytes(source_name)?;
    let (archive, stats) = compress_with_stats(&source)?;
    store.write_all_bytes(dest_name, &archive)?;

    info!(
        source = %source_name.display(), dest = %dest_name.display(),
        input_len = stats.input_len, output_len = stats.output_len,
        "compressed file"
    );

    Ok(stats)
}

/// Restores the file at `source_name` into `dest_name`. Nothing is written on failure.
pub fn decompress_file<S: ByteStore>(store: &S, source_name: &Path, dest_name: &Path) -> Result<CompressionStats> {
    restore_file(store, source_name, dest_name, None)
}

/// Like [`decompress_file`], but the archive must also match `expected`. The check runs
/// before decoding, so a mismatch leaves `dest_name` untouched.
pub fn decompress_file_checked<S: ByteStore>(
    store: &S,
    source_name: &Path,
    dest_name: &Path,
    expected: &ArchiveProperties,
) -> Result<CompressionStats> {
    restore_file(store, source_name, dest_name, Some(expected))
}

fn restore_file<S: ByteStore>(
    store: &S,
    source_name: &Path,
    dest_name: &Path,
    expected: Option<&ArchiveProperties>,
) -> Result<CompressionStats> {
    let archive = store.read_all_bytes(source_name)?;
    if let Some(expected) = expected {
        expected.verify(&archive)?;
    }

    let (original, stats) = decompress_with_stats(&archive)?;
    store.write_all_bytes(dest_name, &original)?;

    info!(
        source = %source_name.display(), dest = %dest_name.display(),
        input_len = stats.input_len, output_len = stats.output_len,
        "decompressed file"
    );

    Ok(stats)
}
