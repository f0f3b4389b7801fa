use std::{fs, path::Path};

use crate::error::Result;

/// Whole-file byte source and sink used by the file-level operations.
pub trait ByteStore {
    fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_all_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// [`ByteStore`] backed by the local filesystem.
#[derive(Clone, Copy, Default, Debug)]
pub struct FsStore;

impl ByteStore for FsStore {
    fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write_all_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        Ok(fs::write(path, bytes)?)
    }
}
