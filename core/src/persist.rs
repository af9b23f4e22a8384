use crate::index::Index;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn index(&self) -> PathBuf { self.root.join("index.bin") }
    fn index_tmp(&self) -> PathBuf { self.root.join("index.bin.tmp") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

pub fn to_bytes(index: &Index) -> Result<Vec<u8>> {
    Ok(bincode::serialize(index)?)
}

pub fn from_bytes(bytes: &[u8]) -> Result<Index> {
    let index: Index = bincode::deserialize(bytes).context("decoding index blob")?;
    index.validate()?;
    Ok(index)
}

/// Write the index blob and its metadata. The blob is renamed into place so a
/// concurrent reader sees either the previous file or the complete new one.
pub fn save_index(paths: &IndexPaths, index: &Index) -> Result<()> {
    create_dir_all(&paths.root)?;
    let bytes = to_bytes(index)?;
    {
        let mut f = File::create(paths.index_tmp())?;
        f.write_all(&bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(paths.index_tmp(), paths.index())?;

    let meta = MetaFile {
        num_docs: index.num_docs() as u32,
        num_terms: index.num_terms() as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        version: FORMAT_VERSION,
    };
    save_meta(paths, &meta)
}

/// Load the persisted index; `Ok(None)` when none has been written yet.
pub fn load_index(paths: &IndexPaths) -> Result<Option<Index>> {
    let mut f = match File::open(paths.index()) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let index = from_bytes(&buf).with_context(|| format!("loading {}", paths.index().display()))?;
    Ok(Some(index))
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}
