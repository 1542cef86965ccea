use serde::Serialize;
use serde_json::Value;

use crate::client::{Lookup, ProviderClient};
use crate::error::{Provider, ProviderError};

use super::UNKNOWN;

const LABEL_IUPAC_NAME: &str = "IUPAC Name";
const LABEL_MOLECULAR_WEIGHT: &str = "Molecular Weight";
const LABEL_SMILES: &str = "SMILES";

/// Basic compound facts from a PubChem PUG REST record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PubchemCompound {
    pub name: String,
    pub molecular_weight: Value,
    pub smiles: String,
}

impl PubchemCompound {
    /// Reads the first compound of a `PC_Compounds` document.
    ///
    /// Properties are matched by their URN label. Anything absent falls back
    /// to `"Unknown"`.
    #[must_use]
    pub fn from_json(data: &Value) -> Self {
        let props = data
            .pointer("/PC_Compounds/0/props")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let text = |label: &str, preferred: Option<&str>| {
            find_prop(props, label, preferred)
                .and_then(|value| value.get("sval"))
                .and_then(Value::as_str)
                .map_or_else(|| UNKNOWN.to_string(), str::to_string)
        };

        Self {
            name: text(LABEL_IUPAC_NAME, Some("Preferred")),
            molecular_weight: find_prop(props, LABEL_MOLECULAR_WEIGHT, None)
                .and_then(scalar)
                .unwrap_or_else(|| Value::String(UNKNOWN.to_string())),
            smiles: text(LABEL_SMILES, None),
        }
    }
}

/// Finds a property's `value` object by URN label, preferring an exact URN name.
fn find_prop<'a>(props: &'a [Value], label: &str, preferred: Option<&str>) -> Option<&'a Value> {
    let mut matching = props
        .iter()
        .filter(|prop| prop.pointer("/urn/label").and_then(Value::as_str) == Some(label));
    let chosen = match preferred {
        Some(name) => {
            let candidates: Vec<&Value> = matching.collect();
            candidates
                .iter()
                .copied()
                .find(|prop| prop.pointer("/urn/name").and_then(Value::as_str) == Some(name))
                .or_else(|| candidates.first().copied())
        }
        None => matching.next(),
    };
    chosen.and_then(|prop| prop.get("value"))
}

fn scalar(value: &Value) -> Option<Value> {
    ["sval", "fval", "ival"]
        .iter()
        .find_map(|key| value.get(*key).filter(|found| !found.is_null()))
        .cloned()
}

impl ProviderClient {
    /// Fetches a compound record by PubChem CID.
    ///
    /// # Errors
    /// Returns `ProviderError` on transport failure or an undecodable body.
    pub async fn pubchem_compound(
        &self,
        pubchem_id: &str,
    ) -> Result<Lookup<PubchemCompound>, ProviderError> {
        let url = self.url(Provider::Pubchem, &[pubchem_id, "JSON"])?;
        Ok(match self.get_json(Provider::Pubchem, url).await? {
            Some(data) => Lookup::Found(PubchemCompound::from_json(&data)),
            None => Lookup::NotFound(format!("PubChem CID '{pubchem_id}' not found.")),
        })
    }
}
