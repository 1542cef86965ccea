use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Provider, ProviderError};

/// String-keyed result returned to callers of every operation.
pub type ResultMap = Map<String, Value>;

pub const DEFAULT_PDB_URL: &str = "https://data.rcsb.org/rest/v1/core";
pub const DEFAULT_CHEMBL_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";
pub const DEFAULT_PUBCHEM_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/cid";
pub const DEFAULT_DRUGBANK_URL: &str = "https://go.drugbank.com/releases/latest";
pub const DEFAULT_UNIPROT_URL: &str = "https://rest.uniprot.org/uniprotkb";
pub const DEFAULT_HGNC_URL: &str = "https://rest.genenames.org/fetch/symbol";

const USER_AGENT: &str = concat!("mcp-omics/", env!("CARGO_PKG_VERSION"));
const JSON: &str = "application/json";

/// Base URLs for each upstream provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub pdb: String,
    pub chembl: String,
    pub pubchem: String,
    pub drugbank: String,
    pub uniprot: String,
    pub hgnc: String,
}

impl Endpoints {
    /// Points every provider at the same base URL. Used for local mirrors and tests.
    #[must_use]
    pub fn uniform(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            pdb: base.clone(),
            chembl: base.clone(),
            pubchem: base.clone(),
            drugbank: base.clone(),
            uniprot: base.clone(),
            hgnc: base,
        }
    }

    #[must_use]
    pub fn base_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::Pdb => self.pdb.as_str(),
            Provider::Chembl => self.chembl.as_str(),
            Provider::Pubchem => self.pubchem.as_str(),
            Provider::Drugbank => self.drugbank.as_str(),
            Provider::Uniprot => self.uniprot.as_str(),
            Provider::Hgnc => self.hgnc.as_str(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            pdb: DEFAULT_PDB_URL.to_string(),
            chembl: DEFAULT_CHEMBL_URL.to_string(),
            pubchem: DEFAULT_PUBCHEM_URL.to_string(),
            drugbank: DEFAULT_DRUGBANK_URL.to_string(),
            uniprot: DEFAULT_UNIPROT_URL.to_string(),
            hgnc: DEFAULT_HGNC_URL.to_string(),
        }
    }
}

/// Outcome of a single provider lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    /// The upstream answered with something other than 200. Carries the
    /// caller-facing message.
    NotFound(String),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound(_) => None,
        }
    }
}

impl<T: Serialize> Lookup<T> {
    /// Renders the lookup as a result mapping: the record's fields, or a
    /// mapping holding only an `error` key.
    ///
    /// # Errors
    /// Returns `ProviderError::Encode` if the record cannot be serialized.
    pub fn into_result_map(self) -> Result<ResultMap, ProviderError> {
        match self {
            Self::Found(record) => match serde_json::to_value(record)? {
                Value::Object(map) => Ok(map),
                other => {
                    let mut map = ResultMap::new();
                    map.insert("value".to_string(), other);
                    Ok(map)
                }
            },
            Self::NotFound(message) => Ok(error_map(message)),
        }
    }
}

/// Builds a mapping whose only key is `error`.
#[must_use]
pub fn error_map(message: impl Into<String>) -> ResultMap {
    let mut map = ResultMap::new();
    map.insert("error".to_string(), Value::String(message.into()));
    map
}

/// HTTP client shared by every provider lookup.
#[derive(Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    endpoints: Arc<Endpoints>,
}

impl ProviderClient {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    /// Returns `ProviderError::Client` if the HTTP client cannot be built.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ProviderError::Client)?;
        Ok(Self {
            http,
            endpoints: Arc::new(endpoints),
        })
    }

    /// Joins path segments onto a provider's base URL, percent-encoding each.
    pub(crate) fn url(&self, provider: Provider, segments: &[&str]) -> Result<Url, ProviderError> {
        let base = self.endpoints.base_for(provider);
        let invalid = |message: String| ProviderError::InvalidUrl {
            url: base.to_string(),
            message,
        };
        let mut url = Url::parse(base).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues a GET, asking for JSON when `json` is set.
    pub(crate) async fn get(
        &self,
        provider: Provider,
        url: Url,
        json: bool,
    ) -> Result<Response, ProviderError> {
        debug!(%provider, %url, "outbound request");
        let mut request = self.http.get(url);
        if json {
            request = request.header(ACCEPT, JSON);
        }
        let response = request
            .send()
            .await
            .map_err(ProviderError::transport(provider))?;
        debug!(%provider, status = %response.status(), "upstream responded");
        Ok(response)
    }

    /// Issues a GET and decodes a JSON body. `None` means a non-200 status.
    pub(crate) async fn get_json(
        &self,
        provider: Provider,
        url: Url,
    ) -> Result<Option<Value>, ProviderError> {
        let response = self.get(provider, url, true).await?;
        if response.status() != StatusCode::OK {
            return Ok(None);
        }
        let body = response
            .bytes()
            .await
            .map_err(ProviderError::transport(provider))?;
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|err| ProviderError::decode(provider, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> ProviderClient {
        ProviderClient::new(Endpoints::uniform(base), Duration::from_secs(5))
            .expect("client should build")
    }

    #[test]
    fn url_encodes_identifier_segment() {
        let client = client("https://example.org/api/");
        let url = client
            .url(Provider::Pdb, &["entry", "a b/c"])
            .expect("url should build");
        assert_eq!(url.as_str(), "https://example.org/api/entry/a%20b%2Fc");
    }

    #[test]
    fn url_rejects_unparseable_base() {
        let client = client("not a url");
        let err = client.url(Provider::Hgnc, &["TP53"]).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidUrl { .. }));
    }

    #[test]
    fn not_found_renders_error_only_map() {
        let lookup: Lookup<ResultMap> = Lookup::NotFound("PDB ID 'X' not found.".to_string());
        let map = lookup.into_result_map().expect("map");
        assert_eq!(Value::Object(map), json!({"error": "PDB ID 'X' not found."}));
    }
}
