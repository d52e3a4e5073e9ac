// src/specs/next_data.rs
//! Strategy A: the embedded page-state blob.
//!
//! Server-rendered Next.js pages ship their full state as JSON inside
//! `<script id="__NEXT_DATA__">`. The members array sits at a fixed key path
//! (`props.pageProps.members` by default). Non-object entries are skipped.

use serde_json::Value;
use tracing::debug;

use super::{Page, RawRecord, Strategy};
use crate::config::consts::{NEXT_DATA_ID, NEXT_DATA_MEMBERS_PATH};
use crate::core::html::selector;
use crate::error::StructureError;

const NAME: &str = "next_data";

pub struct NextData {
    pub script_id: &'static str,
    pub key_path: Vec<&'static str>,
}

impl Default for NextData {
    fn default() -> Self {
        Self { script_id: NEXT_DATA_ID, key_path: NEXT_DATA_MEMBERS_PATH.to_vec() }
    }
}

impl NextData {
    fn payload(&self, page: &Page) -> Result<Value, StructureError> {
        let missing = || StructureError::MissingScript { strategy: NAME, id: self.script_id };
        let sel = selector(&format!(r#"script[id="{}"]"#, self.script_id)).ok_or_else(missing)?;
        let script = page.doc.select(&sel).next().ok_or_else(missing)?;
        let raw: String = script.text().collect();

        serde_json::from_str(&raw)
            .map_err(|e| StructureError::Payload { strategy: NAME, message: e.to_string() })
    }
}

impl Strategy for NextData {
    fn name(&self) -> &'static str { NAME }

    fn locate(&self, page: &Page) -> Result<Vec<RawRecord>, StructureError> {
        let payload = self.payload(page)?;
        let members = self
            .key_path
            .iter()
            .try_fold(&payload, |node, key| node.get(key))
            .and_then(Value::as_array)
            .ok_or_else(|| StructureError::KeyPath { strategy: NAME, path: self.key_path.join(".") })?;

        let records: Vec<RawRecord> = members
            .iter()
            .filter_map(|m| match m {
                Value::Object(obj) => Some(RawRecord::Json(obj.clone())),
                other => {
                    debug!("{NAME}: skipping non-object entry {other}");
                    None
                }
            })
            .collect();

        debug!("{NAME}: {} member object(s) in payload", records.len());
        Ok(records)
    }
}
