use omics_core::Operation;
use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::OmicsMcp;

/// Payload listing the MCP commands this server offers.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        let mut commands = vec![
            "help - List MCP commands and the identifier each lookup expects.".to_string(),
            "health - Health check. Returns 'ok'.".to_string(),
        ];
        commands.extend(Operation::ALL.into_iter().map(|operation| {
            format!(
                "{}({}) - {}",
                operation.name(),
                operation.parameter(),
                operation.description()
            )
        }));
        Self { commands }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl OmicsMcp {
    #[tool(description = "List MCP commands and the identifier each lookup expects.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}
