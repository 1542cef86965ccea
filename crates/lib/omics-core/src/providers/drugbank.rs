use reqwest::StatusCode;
use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;

use crate::client::{Lookup, ProviderClient};
use crate::error::{Provider, ProviderError};

/// Drug metadata from a DrugBank XML record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugbankDrug {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cas_number: Option<String>,
    pub atc_codes: Vec<String>,
    pub groups: Vec<String>,
}

impl DrugbankDrug {
    /// Parses a DrugBank drug document.
    ///
    /// Elements are matched by local name, so namespaced releases parse the
    /// same as bare ones.
    ///
    /// # Errors
    /// Returns `roxmltree::Error` if the document is not well-formed XML.
    pub fn from_xml(xml: &str) -> Result<Self, roxmltree::Error> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        let root = doc.root_element();

        Ok(Self {
            name: first_text(root, "name"),
            description: first_text(root, "description"),
            cas_number: first_text(root, "cas-number"),
            atc_codes: elements(root, "atc-code")
                .filter_map(|node| {
                    node.attribute("code")
                        .map(str::to_string)
                        .or_else(|| trimmed_text(node))
                })
                .collect(),
            groups: elements(root, "group").filter_map(trimmed_text).collect(),
        })
    }
}

fn elements<'a, 'input: 'a>(
    root: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    root.descendants()
        .skip(1)
        .filter(move |node| node.is_element() && node.has_tag_name(name))
}

fn first_text(root: Node<'_, '_>, name: &str) -> Option<String> {
    elements(root, name)
        .next()
        .map(|node| node.text().unwrap_or_default().trim().to_string())
}

fn trimmed_text(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

impl ProviderClient {
    /// Fetches a drug record by DrugBank ID.
    ///
    /// # Errors
    /// Returns `ProviderError` on transport failure or malformed XML.
    pub async fn drugbank_drug(
        &self,
        drugbank_id: &str,
    ) -> Result<Lookup<DrugbankDrug>, ProviderError> {
        let url = self.url(Provider::Drugbank, &["xml", "drug", drugbank_id])?;
        let response = self.get(Provider::Drugbank, url, false).await?;
        if response.status() != StatusCode::OK {
            return Ok(Lookup::NotFound(format!(
                "DrugBank ID '{drugbank_id}' not found."
            )));
        }

        let body = response
            .text()
            .await
            .map_err(ProviderError::transport(Provider::Drugbank))?;
        let drug = DrugbankDrug::from_xml(&body)
            .map_err(|err| ProviderError::decode(Provider::Drugbank, err))?;
        Ok(Lookup::Found(drug))
    }
}
