use omics_core::Operation;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::OmicsMcp;

/// Parameters for a PDB entry lookup.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdbInfoParams {
    /// Four-character PDB ID, e.g. `7WRL`.
    pub pdb_id: String,
}

/// Parameters for a ChEMBL compound lookup.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ChemblInfoParams {
    /// ChEMBL molecule ID, e.g. `CHEMBL25`.
    pub chembl_id: String,
}

/// Parameters for a PubChem compound lookup.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PubchemInfoParams {
    /// PubChem compound ID (CID), e.g. `2244`.
    pub pubchem_id: String,
}

/// Parameters for a DrugBank drug lookup.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DrugbankInfoParams {
    /// DrugBank accession, e.g. `DB00001`.
    pub drugbank_id: String,
}

/// Parameters for a UniProt entry lookup.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UniprotInfoParams {
    /// UniProtKB accession, e.g. `P69905`.
    pub uniprot_id: String,
}

/// Parameters for an HGNC gene lookup.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GeneInfoParams {
    /// Approved human gene symbol, e.g. `TP53`.
    pub gene_symbol: String,
}

#[tool_router(router = tool_router_lookup, vis = "pub")]
impl OmicsMcp {
    #[tool(description = "Fetch title, experimental method, resolution, and release date for a PDB ID (e.g. '7WRL').")]
    async fn get_pdb_info(
        &self,
        Parameters(params): Parameters<PdbInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::PdbInfo, &params.pdb_id).await
    }

    #[tool(description = "Fetch preferred name, molecular weight, SMILES, mechanism of action, and target for a ChEMBL ID (e.g. 'CHEMBL25').")]
    async fn get_chembl_info(
        &self,
        Parameters(params): Parameters<ChemblInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::ChemblInfo, &params.chembl_id).await
    }

    #[tool(description = "Fetch name, molecular weight, and SMILES for a PubChem CID (e.g. '2244').")]
    async fn get_pubchem_info(
        &self,
        Parameters(params): Parameters<PubchemInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::PubchemInfo, &params.pubchem_id).await
    }

    #[tool(description = "Fetch name, description, CAS number, ATC codes, and groups for a DrugBank ID (e.g. 'DB00001').")]
    async fn get_drugbank_info(
        &self,
        Parameters(params): Parameters<DrugbankInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::DrugbankInfo, &params.drugbank_id).await
    }

    #[tool(description = "Fetch accession, protein name, function, and binding sites for a UniProt ID (e.g. 'P69905').")]
    async fn get_uniprot_info(
        &self,
        Parameters(params): Parameters<UniprotInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::UniprotInfo, &params.uniprot_id).await
    }

    #[tool(description = "Fetch the HGNC record for an approved human gene symbol (e.g. 'TP53').")]
    async fn get_gene_info(
        &self,
        Parameters(params): Parameters<GeneInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::GeneInfo, &params.gene_symbol).await
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use omics_core::{Catalog, Endpoints, ProviderClient};
    use rmcp::model::ErrorCode;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn server_for(base: String) -> OmicsMcp {
        let client = ProviderClient::new(Endpoints::uniform(base), Duration::from_secs(2))
            .expect("client should build");
        OmicsMcp::new(Catalog::new(client))
    }

    fn json_payload(result: &CallToolResult) -> Value {
        let value = serde_json::to_value(result).expect("serialize tool result");
        let text = value["content"][0]["text"]
            .as_str()
            .expect("tool result should carry text content");
        serde_json::from_str(text).expect("tool text should be JSON")
    }

    #[test]
    fn router_exposes_every_catalog_operation() {
        let server = server_for("http://127.0.0.1:9".to_string());
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        for operation in Operation::ALL {
            assert!(
                names.iter().any(|name| name == operation.name()),
                "missing tool {operation}"
            );
        }
        assert!(names.iter().any(|name| name == "health"));
        assert!(names.iter().any(|name| name == "help"));
    }

    #[test]
    fn tool_descriptions_match_catalog() {
        let server = server_for("http://127.0.0.1:9".to_string());
        let tools = server.tool_router.list_all();
        for operation in Operation::ALL {
            let tool = tools
                .iter()
                .find(|tool| tool.name == operation.name())
                .unwrap_or_else(|| panic!("missing tool {operation}"));
            assert_eq!(
                tool.description.as_deref(),
                Some(operation.description()),
                "description drifted for {operation}"
            );
        }
    }

    #[tokio::test]
    async fn not_found_is_a_successful_error_mapping() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/molecule/CHEMBL999999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&upstream)
            .await;

        let server = server_for(upstream.uri());
        let result = server
            .get_chembl_info(Parameters(ChemblInfoParams {
                chembl_id: "CHEMBL999999".to_string(),
            }))
            .await
            .expect("tool should return normally");

        assert_eq!(
            json_payload(&result),
            json!({"error": "Compound CHEMBL999999 not found."})
        );
    }

    #[tokio::test]
    async fn transport_fault_is_an_internal_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");
        drop(listener);

        let server = server_for(format!("http://{addr}"));
        let err = server
            .get_gene_info(Parameters(GeneInfoParams {
                gene_symbol: "TP53".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("HGNC"));
    }
}
