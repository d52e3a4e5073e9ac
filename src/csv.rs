// src/csv.rs
//
// Delimited (CSV/TSV) encoding of member rows. The header is always `FIELDS`;
// absent fields are empty cells, never "None" or "null".
use std::io::{Read, Write};

use ::csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::member::{FIELDS, MemberRecord};

/* ---------------- Writing ---------------- */

/// Header row, then one row per member.
pub fn write_members<W: Write>(w: W, members: &[MemberRecord], delimiter: u8) -> Result<(), ::csv::Error> {
    let mut out = WriterBuilder::new().delimiter(delimiter).from_writer(w);
    out.write_record(FIELDS)?;
    for m in members {
        out.write_record(m.to_row())?;
    }
    out.flush()?;
    Ok(())
}

/// Whole export as one string (API bodies, clipboard-style use).
pub fn to_export_string(members: &[MemberRecord], delimiter: u8) -> Result<String, ::csv::Error> {
    let mut buf: Vec<u8> = Vec::new();
    write_members(&mut buf, members, delimiter)?;
    Ok(match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    })
}

/* ---------------- Parsing ---------------- */

/// Read an export back. Columns are matched by header name, so a file with
/// reordered or missing columns still loads; unknown columns are ignored.
pub fn read_members<R: Read>(r: R, delimiter: u8) -> Result<Vec<MemberRecord>, ::csv::Error> {
    let mut rdr = ReaderBuilder::new().delimiter(delimiter).flexible(true).from_reader(r);
    let columns = column_map(rdr.headers()?);

    let mut out = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let cells: Vec<&str> = columns
            .iter()
            .map(|idx| idx.and_then(|i| row.get(i)).unwrap_or(""))
            .collect();
        out.push(MemberRecord::from_row(&cells));
    }
    Ok(out)
}

/// For each entry of `FIELDS`, its column index in `headers`.
fn column_map(headers: &StringRecord) -> Vec<Option<usize>> {
    FIELDS
        .iter()
        .map(|f| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(f)))
        .collect()
}
