//! The MCP-facing half of the Outer Server (§6 RPC surface): a manual
//! `rmcp::ServerHandler` implementation rather than its proc-macro
//! tool-router, since there is no way to compile-check macro expansion here
//! and a hand-written dispatch is easier to audit (mirrors the explicit
//! name-match dispatch in the reference workspace's own MCP gateway).

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use tracing::{error, info};

use crate::state::AppState;
use crate::tool_schema;
use crate::tools::dispatch;

#[derive(Clone)]
pub struct BridgeServer {
    state: Arc<AppState>,
}

impl BridgeServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl ServerHandler for BridgeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Exposes the DAW's parameter, note-editing, humanization, and sample tools \
                 over the MIDI bridge link."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult { next_cursor: None, tools: tool_schema::all() })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name = request.name.to_string();
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Object(Default::default()));

        info!(tool = %name, "tool call");

        match dispatch(&self.state, &name, arguments).await {
            Ok(result) => {
                let text = serde_json::to_string_pretty(&result).unwrap_or_default();
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => {
                error!(tool = %name, error = %e, "tool call failed");
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }
}
