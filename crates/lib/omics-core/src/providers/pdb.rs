use serde::Serialize;
use serde_json::Value;

use crate::client::{Lookup, ProviderClient};
use crate::error::{Provider, ProviderError};

use super::{number_or_na, or_unknown, text_at};

/// Summary of an RCSB PDB entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdbEntry {
    pub title: String,
    pub method: String,
    #[serde(serialize_with = "number_or_na")]
    pub resolution: Option<f64>,
    pub release_date: String,
}

impl PdbEntry {
    #[must_use]
    pub fn from_json(data: &Value) -> Self {
        Self {
            title: or_unknown(text_at(data, "/struct/title")),
            method: or_unknown(text_at(data, "/exptl/0/method")),
            resolution: data
                .pointer("/rcsb_entry_info/resolution_combined/0")
                .and_then(Value::as_f64),
            release_date: or_unknown(text_at(
                data,
                "/rcsb_accession_info/initial_release_date",
            )),
        }
    }
}

impl ProviderClient {
    /// Fetches entry metadata for a PDB ID.
    ///
    /// # Errors
    /// Returns `ProviderError` on transport failure or an undecodable body.
    pub async fn pdb_entry(&self, pdb_id: &str) -> Result<Lookup<PdbEntry>, ProviderError> {
        let url = self.url(Provider::Pdb, &["entry", pdb_id])?;
        Ok(match self.get_json(Provider::Pdb, url).await? {
            Some(data) => Lookup::Found(PdbEntry::from_json(&data)),
            None => Lookup::NotFound(format!("PDB ID '{pdb_id}' not found.")),
        })
    }
}
