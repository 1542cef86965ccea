//! MCP server implementation for mcp-omics.
//!
//! This crate wires the operation catalog into rmcp tool handlers and exposes
//! the MCP-facing API surface for the database lookups.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use omics_core::{Catalog, Operation};
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

const SERVER_INSTRUCTIONS: &str = r#"mcp-omics looks up records in public bioinformatics databases.

Each lookup tool takes one identifier and returns a flat JSON object:
- `get_pdb_info(pdb_id)`: RCSB PDB entry title, method, resolution, release date.
- `get_chembl_info(chembl_id)`: ChEMBL compound name, weight, SMILES, mechanism, target.
- `get_pubchem_info(pubchem_id)`: PubChem compound name, weight, SMILES.
- `get_drugbank_info(drugbank_id)`: DrugBank name, description, CAS number, ATC codes, groups.
- `get_uniprot_info(uniprot_id)`: UniProt accession, protein name, function, binding sites.
- `get_gene_info(gene_symbol)`: raw HGNC record for a gene symbol.

Notes:
- When the database has no record, the result is `{"error": "..."}` naming the identifier.
- Absent fields are reported as `Unknown`, `N/A`, or null.
- `help` lists the tools, `health` returns `ok`."#;

/// MCP server wrapper around the operation catalog and tool routers.
#[derive(Clone)]
pub struct OmicsMcp {
    tool_router: ToolRouter<Self>,
    catalog: Arc<Catalog>,
}

impl OmicsMcp {
    /// Creates a new server using a catalog by value.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_catalog(Arc::new(catalog))
    }

    /// Creates a new server using a shared catalog handle.
    #[must_use]
    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_lookup()
            + Self::tool_router_context();
        Self {
            tool_router,
            catalog,
        }
    }

    /// Runs one catalog operation and wraps its result mapping as JSON content.
    pub(crate) async fn run(
        &self,
        operation: Operation,
        argument: &str,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .catalog
            .invoke(operation, argument)
            .await
            .map_err(helpers::map_provider_err)?;
        Ok(CallToolResult::success(vec![Content::json(result)?]))
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl OmicsMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for OmicsMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
