use std::{collections::HashMap, io::Read, path::{Path, PathBuf}};

use crate::{archive::ArchiveHeader, error::{HuffError, Result}, store::ByteStore};

/// Summary of an archive, stored next to it as a `.properties` file.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct ArchiveProperties {
    pub version: u8,
    pub symbols: usize,
    pub original_length: u64,
    pub payload_bits: u64,
    pub archive_bytes: usize,
}

impl ArchiveProperties {
    pub fn from_archive(archive: &[u8]) -> Result<Self> {
        let header = ArchiveHeader::peek(archive)?;

        Ok(Self {
            version: header.version,
            symbols: header.table.len(),
            original_length: header.table.total(),
            payload_bits: header.total_bits,
            archive_bytes: archive.len(),
        })
    }

    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let p = java_properties::read(reader)
            .map_err(|e| HuffError::format(format!("failed parsing the properties file: {}", e)))?;
        Self::try_from(p)
    }

    /// `<archive_name>.properties`
    pub fn sidecar_name(archive_name: &Path) -> PathBuf {
        let mut name = archive_name.as_os_str().to_owned();
        name.push(".properties");
        PathBuf::from(name)
    }

    /// Writes the sidecar of `archive_name`.
    pub fn store<S: ByteStore>(&self, store: &S, archive_name: &Path) -> Result<()> {
        let text: String = self.clone().into();
        store.write_all_bytes(&Self::sidecar_name(archive_name), text.as_bytes())
    }

    /// Reads the sidecar of `archive_name`.
    pub fn fetch<S: ByteStore>(store: &S, archive_name: &Path) -> Result<Self> {
        let bytes = store.read_all_bytes(&Self::sidecar_name(archive_name))?;
        Self::load(bytes.as_slice())
    }

    /// Fails unless `archive` restores the length and symbol count recorded here.
    pub fn verify(&self, archive: &[u8]) -> Result<()> {
        let actual = Self::from_archive(archive)?;

        if actual.original_length != self.original_length || actual.symbols != self.symbols {
            return Err(HuffError::format(format!(
                "archive holds {} bytes over {} symbols, properties declare {} bytes over {} symbols",
                actual.original_length, actual.symbols, self.original_length, self.symbols
            )));
        }

        Ok(())
    }
}

fn parse_field<T: std::str::FromStr>(value: &HashMap<String, String>, key: &str) -> Result<T> {
    value.get(key)
        .ok_or_else(|| HuffError::format(format!("failed in reading {} from properties", key)))?
        .trim()
        .parse()
        .map_err(|_| HuffError::format(format!("malformed {} in properties", key)))
}

impl TryFrom<HashMap<String, String>> for ArchiveProperties {
    type Error = HuffError;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        Ok(ArchiveProperties {
            version: parse_field(&value, "version")?,
            symbols: parse_field(&value, "symbols")?,
            original_length: parse_field(&value, "originallength")?,
            payload_bits: parse_field(&value, "payloadbits")?,
            archive_bytes: parse_field(&value, "archivebytes")?,
        })
    }
}

impl From<ArchiveProperties> for String {
    fn from(val: ArchiveProperties) -> Self {
        let mut s = String::new();

        s.push_str("#Huffman archive properties\n");
        s.push_str(&format!("version={}\n", val.version));
        s.push_str(&format!("symbols={}\n", val.symbols));
        s.push_str(&format!("originallength={}\n", val.original_length));
        s.push_str(&format!("payloadbits={}\n", val.payload_bits));
        s.push_str(&format!("archivebytes={}\n", val.archive_bytes));

        s
    }
}
