use std::borrow::Cow;

use omics_core::ProviderError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use tracing::warn;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

pub fn map_provider_err(err: ProviderError) -> ErrorData {
    warn!(error = %err, "provider lookup failed");
    mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string())
}
