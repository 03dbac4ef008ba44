//! MCP Server implementation that exposes hfgen tools

use hfgen_core::config::DEFAULT_SERVER_NAME;
use hfgen_core::{InferenceGateway, ServerConfig};
use hfgen_tools::{Dispatcher, HuggingFaceGateway, ToolRegistry};
use rmcp::{
    RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, ErrorData, Implementation, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RunningService},
    transport::IntoTransport,
};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::adapter::{AdaptedCatalog, to_mcp_content};
use crate::error::{McpError, McpResult};

const INSTRUCTIONS: &str = "Generates text with models hosted on HuggingFace. \
Call `text_generation` with a `prompt`; `model` and `max_tokens` are optional.";

/// Identity advertised during the initialize handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
    pub instructions: String,
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: INSTRUCTIONS.to_string(),
        }
    }
}

/// MCP Server that exposes the tool catalog to MCP clients.
///
/// A constructed server is ready to serve; [`McpServer::start`] performs the
/// initialize handshake and hands back a [`RunningServer`].
pub struct McpServer {
    dispatcher: Dispatcher,
    catalog: AdaptedCatalog,
    identity: ServerIdentity,
}

impl McpServer {
    /// Build the production server from the process environment.
    ///
    /// # Errors
    ///
    /// Fails with [`McpError::Configuration`] if `HF_TOKEN` is missing or any
    /// optional variable is malformed.
    pub fn from_env() -> McpResult<Self> {
        let config = ServerConfig::from_env()?;
        let gateway = HuggingFaceGateway::new(&config)?;
        Self::new(&config, Arc::new(gateway))
    }

    /// Build a server serving the standard catalog over `gateway`.
    pub fn new(config: &ServerConfig, gateway: Arc<dyn InferenceGateway>) -> McpResult<Self> {
        let registry = ToolRegistry::standard(gateway)?;
        let identity = ServerIdentity {
            name: config.server_name.clone(),
            ..ServerIdentity::default()
        };
        Ok(Self::with_registry(Arc::new(registry))?.with_identity(identity))
    }

    /// Build a server over an arbitrary catalog.
    pub fn with_registry(registry: Arc<ToolRegistry>) -> McpResult<Self> {
        let catalog = AdaptedCatalog::from_registry(&registry)?;
        Ok(Self {
            dispatcher: Dispatcher::new(registry),
            catalog,
            identity: ServerIdentity::default(),
        })
    }

    pub fn with_identity(mut self, identity: ServerIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn catalog(&self) -> &AdaptedCatalog {
        &self.catalog
    }

    /// Perform the initialize handshake over `transport` and start serving.
    pub async fn start<T, E, A>(self, transport: T) -> McpResult<RunningServer>
    where
        T: IntoTransport<RoleServer, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let name = self.identity.name.clone();
        let tools = self.catalog.len();

        let service = self.serve(transport).await.map_err(|e| {
            error!(error = %e, "MCP initialize handshake failed");
            McpError::InitializeError(e.to_string())
        })?;

        info!(server = %name, tools, "MCP server running");
        Ok(RunningServer { service })
    }

    /// Serve via stdio (stdin/stdout) until the client disconnects.
    ///
    /// This is the standard MCP transport, compatible with Claude Desktop and
    /// other MCP clients. Nothing else may write to stdout while serving.
    pub async fn serve_stdio(self) -> McpResult<()> {
        info!(
            server = %self.identity.name,
            version = %self.identity.version,
            tools = self.catalog.len(),
            "Starting MCP server on stdio"
        );

        self.start(rmcp::transport::stdio()).await?.waiting().await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(rmcp::model::ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: self.identity.name.clone(),
                version: self.identity.version.clone(),
                ..Default::default()
            },
            instructions: Some(self.identity.instructions.clone()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        debug!(tools = self.catalog.len(), "Listing tools");
        Ok(ListToolsResult::with_all_items(self.catalog.tools().to_vec()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request.arguments.unwrap_or_default();

        let blocks = tokio::select! {
            result = self.dispatcher.call_tool(&request.name, &arguments) => {
                result.map_err(McpError::from)?
            }
            _ = context.ct.cancelled() => {
                info!(tool = %request.name, "Tool call cancelled by client");
                return Err(McpError::Cancelled.into());
            }
        };

        Ok(CallToolResult::success(to_mcp_content(blocks)))
    }
}

/// A server that has completed the handshake and is serving requests.
pub struct RunningServer {
    service: RunningService<RoleServer, McpServer>,
}

impl RunningServer {
    /// Wait until the client disconnects or the transport closes.
    pub async fn waiting(self) -> McpResult<()> {
        let reason = self
            .service
            .waiting()
            .await
            .map_err(|e| McpError::TransportError(e.to_string()))?;
        info!(?reason, "MCP server stopped");
        Ok(())
    }

    /// Stop serving and release the transport.
    pub async fn cancel(self) -> McpResult<()> {
        let reason = self
            .service
            .cancel()
            .await
            .map_err(|e| McpError::TransportError(e.to_string()))?;
        info!(?reason, "MCP server cancelled");
        Ok(())
    }
}
