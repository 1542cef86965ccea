use serde::Serialize;
use serde_json::Value;

use crate::client::{Lookup, ProviderClient};
use crate::error::{Provider, ProviderError};

use super::{or_unknown, text_at};

const FUNCTION_COMMENT: &str = "FUNCTION";
const BINDING_SITE_FEATURE: &str = "Binding site";

/// A binding-site feature annotated on a UniProtKB entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingSite {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub ligand: Option<String>,
    pub description: Option<String>,
}

/// Functional summary of a UniProtKB entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniprotEntry {
    pub accession: String,
    pub protein_name: String,
    pub function: Option<String>,
    pub binding_sites: Vec<BindingSite>,
}

impl UniprotEntry {
    #[must_use]
    pub fn from_json(requested: &str, data: &Value) -> Self {
        let protein_name = text_at(data, "/proteinDescription/recommendedName/fullName/value")
            .or_else(|| {
                data.pointer("/proteinDescription/submissionNames")
                    .and_then(Value::as_array)
                    .and_then(|names| {
                        names.iter().find_map(|name| text_at(name, "/fullName/value"))
                    })
            });

        let function_texts: Vec<&str> = array(data, "comments")
            .filter(|comment| {
                comment.get("commentType").and_then(Value::as_str) == Some(FUNCTION_COMMENT)
            })
            .flat_map(|comment| array(comment, "texts"))
            .filter_map(|text| text.get("value").and_then(Value::as_str))
            .collect();

        Self {
            accession: text_at(data, "/primaryAccession").unwrap_or_else(|| requested.to_string()),
            protein_name: or_unknown(protein_name),
            function: if function_texts.is_empty() {
                None
            } else {
                Some(function_texts.join(" "))
            },
            binding_sites: array(data, "features")
                .filter(|feature| {
                    feature.get("type").and_then(Value::as_str) == Some(BINDING_SITE_FEATURE)
                })
                .map(|feature| BindingSite {
                    start: feature.pointer("/location/start/value").and_then(Value::as_i64),
                    end: feature.pointer("/location/end/value").and_then(Value::as_i64),
                    ligand: text_at(feature, "/ligand/name"),
                    description: text_at(feature, "/description")
                        .filter(|description| !description.is_empty()),
                })
                .collect(),
        }
    }
}

fn array<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> + 'a {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

impl ProviderClient {
    /// Fetches a UniProtKB entry by accession.
    ///
    /// # Errors
    /// Returns `ProviderError` on transport failure or an undecodable body.
    pub async fn uniprot_entry(
        &self,
        uniprot_id: &str,
    ) -> Result<Lookup<UniprotEntry>, ProviderError> {
        let mut url = self.url(Provider::Uniprot, &[uniprot_id])?;
        url.query_pairs_mut().append_pair("format", "json");
        Ok(match self.get_json(Provider::Uniprot, url).await? {
            Some(data) => Lookup::Found(UniprotEntry::from_json(uniprot_id, &data)),
            None => Lookup::NotFound(format!("UniProt ID '{uniprot_id}' not found.")),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::Endpoints;

    fn client_for(server: &MockServer) -> ProviderClient {
        ProviderClient::new(Endpoints::uniform(server.uri()), Duration::from_secs(5))
            .expect("client should build")
    }

    #[tokio::test]
    async fn extracts_function_and_binding_sites() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/P69905"))
            .and(query_param("format", "json"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "primaryAccession": "P69905",
                "proteinDescription": {
                    "recommendedName": {"fullName": {"value": "Hemoglobin subunit alpha"}}
                },
                "comments": [
                    {"commentType": "SUBUNIT", "texts": [{"value": "Heterotetramer."}]},
                    {"commentType": "FUNCTION", "texts": [
                        {"value": "Involved in oxygen transport."},
                        {"value": "Carries oxygen to tissues."}
                    ]}
                ],
                "features": [
                    {"type": "Chain", "location": {"start": {"value": 2}, "end": {"value": 142}}},
                    {
                        "type": "Binding site",
                        "location": {"start": {"value": 59}, "end": {"value": 59}},
                        "description": "distal binding residue",
                        "ligand": {"name": "heme b"}
                    }
                ]
            })))
            .mount(&server)
            .await;

        let map = client_for(&server)
            .uniprot_entry("P69905")
            .await
            .expect("lookup should succeed")
            .into_result_map()
            .expect("map");

        assert_eq!(
            Value::Object(map),
            json!({
                "accession": "P69905",
                "protein_name": "Hemoglobin subunit alpha",
                "function": "Involved in oxygen transport. Carries oxygen to tissues.",
                "binding_sites": [{
                    "start": 59,
                    "end": 59,
                    "ligand": "heme b",
                    "description": "distal binding residue"
                }]
            })
        );
    }

    #[test]
    fn sparse_entry_uses_defaults() {
        let entry = UniprotEntry::from_json(
            "A0A000",
            &json!({
                "proteinDescription": {
                    "submissionNames": [{"fullName": {"value": "Uncharacterized protein"}}]
                },
                "features": [{"type": "Binding site", "description": ""}]
            }),
        );
        assert_eq!(entry.accession, "A0A000");
        assert_eq!(entry.protein_name, "Uncharacterized protein");
        assert!(entry.function.is_none());
        assert_eq!(
            entry.binding_sites,
            vec![BindingSite {
                start: None,
                end: None,
                ligand: None,
                description: None,
            }]
        );
    }

    #[tokio::test]
    async fn non_ok_status_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/NOPE"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let lookup = client_for(&server)
            .uniprot_entry("NOPE")
            .await
            .expect("lookup should not fault");
        assert_eq!(lookup, Lookup::NotFound("UniProt ID 'NOPE' not found.".to_string()));
    }
}
