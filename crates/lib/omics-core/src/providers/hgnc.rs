use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::{Lookup, ProviderClient};
use crate::error::{Provider, ProviderError};

/// The raw HGNC record for a gene symbol, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneRecord(pub Map<String, Value>);

impl GeneRecord {
    /// Takes the first document of an HGNC `fetch` response.
    #[must_use]
    pub fn from_json(data: &Value) -> Option<Self> {
        data.pointer("/response/docs/0")
            .and_then(Value::as_object)
            .cloned()
            .map(Self)
    }
}

impl ProviderClient {
    /// Fetches the HGNC record for an approved gene symbol.
    ///
    /// HGNC answers unknown symbols with 200 and an empty document list; that
    /// is reported as not found too.
    ///
    /// # Errors
    /// Returns `ProviderError` on transport failure or an undecodable body.
    pub async fn gene_record(&self, gene_symbol: &str) -> Result<Lookup<GeneRecord>, ProviderError> {
        let url = self.url(Provider::Hgnc, &[gene_symbol])?;
        let record = self
            .get_json(Provider::Hgnc, url)
            .await?
            .as_ref()
            .and_then(GeneRecord::from_json);
        Ok(match record {
            Some(record) => Lookup::Found(record),
            None => Lookup::NotFound(format!("Gene symbol '{gene_symbol}' not found.")),
        })
    }
}
