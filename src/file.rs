// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::{ExportFormat, ExportOptions};
use crate::error::ExportError;
use crate::member::MemberRecord;

/// Encode `members` in `format`. JSON is an array of objects with every
/// field present; absent values are `null`.
pub fn to_export_bytes(format: ExportFormat, members: &[MemberRecord]) -> Result<Vec<u8>, ExportError> {
    match format.delimiter() {
        Some(sep) => Ok(crate::csv::to_export_string(members, sep)?.into_bytes()),
        None => Ok(serde_json::to_vec_pretty(members)?),
    }
}

/// Write one export file based on ExportOptions (directory, stem, format).
/// Returns the final path written to.
pub fn export_members(
    export: &ExportOptions,
    format: ExportFormat,
    members: &[MemberRecord],
) -> Result<PathBuf, ExportError> {
    let path = export.out_path(format);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let mut out = BufWriter::new(File::create(&path)?); // truncate/overwrite
    match format.delimiter() {
        Some(sep) => crate::csv::write_members(&mut out, members, sep)?,
        None => {
            serde_json::to_writer_pretty(&mut out, members)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;

    info!("Exported {} member(s) to {}", members.len(), path.display());
    Ok(path)
}

/// Every format listed in `export.formats`, in order.
pub fn export_all(export: &ExportOptions, members: &[MemberRecord]) -> Result<Vec<PathBuf>, ExportError> {
    export.formats.iter().map(|f| export_members(export, *f, members)).collect()
}

/// Load a previous export back into records.
pub fn read_export(path: &Path, format: ExportFormat) -> Result<Vec<MemberRecord>, ExportError> {
    let file = File::open(path)?;
    match format.delimiter() {
        Some(sep) => Ok(crate::csv::read_members(file, sep)?),
        None => Ok(serde_json::from_reader(file)?),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
