//! MCP surface: tool router plus `request://` resources.

use crate::resources::{
    REQUEST_URI_TEMPLATE, RequestCache, render_request, request_id_from_uri, request_uri,
};
use crate::tools::{
    CreateRequestArgs, GetRequestArgs, RequestIdArgs, RequestTools, UpdateRequestArgs,
};
use docdocdoc_api::ApiResult;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    Annotated, CallToolResult, Content, ListResourceTemplatesResult, ListResourcesResult,
    PaginatedRequestParam, RawResource, ReadResourceRequestParam, ReadResourceResult,
    ResourceContents, ResourceTemplate, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde_json::json;
use std::sync::Arc;

const INSTRUCTIONS: &str = "DocDocDoc document requests. Use get_request, create_request, \
update_request, cancel_request and delete_request to manage requests through the DocDocDoc API. \
request://{request_id} shows a summary of a request previously fetched with get_request.";

#[derive(Clone)]
pub struct DocDocDocServer {
    tools: RequestTools,
    tool_router: ToolRouter<Self>,
}

impl DocDocDocServer {
    #[must_use]
    pub fn new(tools: RequestTools) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    fn cache(&self) -> Option<&RequestCache> {
        self.tools.cache().map(Arc::as_ref)
    }
}

#[tool_router]
impl DocDocDocServer {
    #[tool(
        description = "Retrieve a DocDocDoc document request by ID, optionally with its documents, accesses, events and messages",
        annotations(
            title = "Get request",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn get_request(
        &self,
        Parameters(args): Parameters<GetRequestArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(to_call_tool_result(&self.tools.get_request(args).await))
    }

    #[tool(
        description = "Create a new DocDocDoc document request asking someone to provide a document",
        annotations(
            title = "Create request",
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = true
        )
    )]
    async fn create_request(
        &self,
        Parameters(args): Parameters<CreateRequestArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(to_call_tool_result(&self.tools.create_request(args).await))
    }

    #[tool(
        description = "Update an existing DocDocDoc document request; only the provided fields change",
        annotations(
            title = "Update request",
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = false,
            open_world_hint = true
        )
    )]
    async fn update_request(
        &self,
        Parameters(args): Parameters<UpdateRequestArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(to_call_tool_result(&self.tools.update_request(args).await))
    }

    #[tool(
        description = "Cancel a DocDocDoc document request",
        annotations(
            title = "Cancel request",
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = false,
            open_world_hint = true
        )
    )]
    async fn cancel_request(
        &self,
        Parameters(args): Parameters<RequestIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(to_call_tool_result(&self.tools.cancel_request(args).await))
    }

    #[tool(
        description = "Permanently delete a DocDocDoc document request",
        annotations(
            title = "Delete request",
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = false,
            open_world_hint = true
        )
    )]
    async fn delete_request(
        &self,
        Parameters(args): Parameters<RequestIdArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(to_call_tool_result(&self.tools.delete_request(args).await))
    }
}

#[tool_handler]
impl ServerHandler for DocDocDocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self
            .cache()
            .map(RequestCache::ids)
            .unwrap_or_default()
            .into_iter()
            .map(|id| {
                let name = format!("DocDocDoc request {id}");
                Annotated::new(RawResource::new(request_uri(&id), name), None)
            })
            .collect();
        Ok(ListResourcesResult {
            resources,
            ..Default::default()
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let template: ResourceTemplate = serde_json::from_value(json!({
            "uriTemplate": REQUEST_URI_TEMPLATE,
            "name": "DocDocDoc request",
            "description": "Summary of a document request previously fetched with get_request",
            "mimeType": "text/plain"
        }))
        .map_err(|e| McpError::internal_error(format!("resource template: {e}"), None))?;
        Ok(ListResourceTemplatesResult {
            resource_templates: vec![template],
            ..Default::default()
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let Some(request_id) = request_id_from_uri(&request.uri) else {
            return Err(McpError::resource_not_found(
                format!("Unknown resource: {}", request.uri),
                None,
            ));
        };
        let text = render_request(self.cache(), &request_id);
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri.clone())],
        })
    }
}

/// Structured content is the result object itself; the text block carries the same JSON for
/// clients that ignore `structured_content`.
fn to_call_tool_result(result: &ApiResult) -> CallToolResult {
    let structured = result.to_value();
    let text = serde_json::to_string(&structured).unwrap_or_else(|_| structured.to_string());
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(structured),
        is_error: Some(result.is_failure()),
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdocdoc_api::{ApiSettings, DocDocDocApi};

    fn server() -> DocDocDocServer {
        let api = DocDocDocApi::from_settings(ApiSettings::default()).expect("default settings");
        DocDocDocServer::new(RequestTools::new(api, Some(Arc::new(RequestCache::new()))))
    }

    #[test]
    fn registers_the_five_request_tools() {
        let mut names: Vec<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "cancel_request",
                "create_request",
                "delete_request",
                "get_request",
                "update_request"
            ]
        );
    }

    #[test]
    fn annotations_follow_operation_semantics() {
        let tools = server().tool_router.list_all();
        let hints = |name: &str| {
            let tool = tools.iter().find(|t| t.name == name).expect("tool");
            let a = tool.annotations.clone().expect("annotations");
            (a.read_only_hint, a.destructive_hint)
        };
        assert_eq!(hints("get_request"), (Some(true), Some(false)));
        assert_eq!(hints("create_request"), (Some(false), Some(false)));
        for name in ["update_request", "cancel_request", "delete_request"] {
            assert_eq!(hints(name), (Some(false), Some(true)), "{name}");
        }
    }

    #[test]
    fn create_schema_requires_the_four_contact_fields() {
        let tools = server().tool_router.list_all();
        let create = tools
            .iter()
            .find(|t| t.name == "create_request")
            .expect("create_request");
        let required = create
            .input_schema
            .get("required")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        for field in [
            "requested_email",
            "requested_name",
            "requestor_email",
            "requestor_name",
        ] {
            assert!(required.iter().any(|v| v == field), "{field} not required");
        }
        assert!(!required.iter().any(|v| v == "message"));
    }

    #[test]
    fn server_info_advertises_tools_and_resources() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.instructions.is_some_and(|s| s.contains("request://")));
    }

    #[test]
    fn failures_are_flagged_as_tool_errors() {
        let failure = to_call_tool_result(&ApiResult::failure("API_KEY not configured"));
        assert_eq!(failure.is_error, Some(true));
        assert_eq!(
            failure.structured_content,
            Some(json!({ "error": "API_KEY not configured" }))
        );

        let success = to_call_tool_result(&ApiResult::success(json!({ "id": "r1" }), json!({})));
        assert_eq!(success.is_error, Some(false));
        let text = success
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .expect("text content");
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("json text");
        assert_eq!(parsed["data"], json!({ "id": "r1" }));
    }
}
