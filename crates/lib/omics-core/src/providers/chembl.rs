use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::client::{Lookup, ProviderClient};
use crate::error::{Provider, ProviderError};

use super::{non_null_at, text_at};

/// Compound metadata from ChEMBL, joined with its first recorded mechanism.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChemblCompound {
    pub pref_name: Option<String>,
    pub molecular_weight: Option<Value>,
    pub structure: Option<String>,
    pub mechanism_of_action: Option<String>,
    pub target_name: Option<String>,
}

impl ChemblCompound {
    /// Combines a molecule record with the `mechanisms` list of a mechanism query.
    #[must_use]
    pub fn from_json(molecule: &Value, mechanisms: &[Value]) -> Self {
        let first = mechanisms.first();
        Self {
            pref_name: text_at(molecule, "/pref_name"),
            molecular_weight: non_null_at(molecule, "/molecule_properties/full_molweight"),
            structure: text_at(molecule, "/molecule_structures/canonical_smiles"),
            mechanism_of_action: first.and_then(|mechanism| {
                text_at(mechanism, "/mechanism_of_action")
            }),
            target_name: first.and_then(|mechanism| text_at(mechanism, "/target_chembl_id")),
        }
    }
}

impl ProviderClient {
    /// Fetches a ChEMBL molecule and, if it exists, its mechanisms of action.
    ///
    /// # Errors
    /// Returns `ProviderError` on transport failure or an undecodable body.
    pub async fn chembl_compound(
        &self,
        chembl_id: &str,
    ) -> Result<Lookup<ChemblCompound>, ProviderError> {
        let url = self.url(Provider::Chembl, &["molecule", chembl_id])?;
        let Some(molecule) = self.get_json(Provider::Chembl, url).await? else {
            return Ok(Lookup::NotFound(format!("Compound {chembl_id} not found.")));
        };

        let mechanisms = self.chembl_mechanisms(chembl_id).await?;
        Ok(Lookup::Found(ChemblCompound::from_json(&molecule, &mechanisms)))
    }

    async fn chembl_mechanisms(&self, chembl_id: &str) -> Result<Vec<Value>, ProviderError> {
        let mut url = self.url(Provider::Chembl, &["mechanism"])?;
        url.query_pairs_mut()
            .append_pair("molecule_chembl_id", chembl_id);

        match self.get_json(Provider::Chembl, url).await? {
            Some(body) => Ok(body
                .get("mechanisms")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()),
            None => {
                warn!(chembl_id, "mechanism lookup failed, continuing without mechanisms");
                Ok(Vec::new())
            }
        }
    }
}
