use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tracing::info;

use crate::{
    config::load_config,
    core::{
        ProjectContext,
        errors::{LocaleError, LocaleErrorKind},
        merge::{MergeOptions, TranslationMap, update_translations},
        resolver::{LocaleText, TranslateOptions, format_count},
        unterminated_issues,
    },
    issues::Severity,
};

use super::types::{
    ConfigDto, GetConfigParams, Pagination, RecordItem, ScanResult, ScanSourcesParams,
    TranslateParams, TranslateResult, TranslatedItem,
};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 200;

#[derive(Clone)]
pub struct LocaleMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LocaleMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LocaleMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the effective rf-locale configuration
    #[tool(description = "Get the effective rf-locale configuration of a project.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;

        let dto = ConfigDto {
            from_file: result.from_file(),
            config_path: result.path.map(|p| p.to_string_lossy().to_string()),
            config: result.config,
        };

        json_result(&dto)
    }

    /// Scan sources for translatable calls
    #[tool(
        description = "Scan the project's sources for translation calls. Returns a paginated list of extracted calls plus error and warning counts."
    )]
    pub async fn scan_sources(
        &self,
        params: Parameters<ScanSourcesParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params
            .0
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = params.0.offset.map(|v| v as usize).unwrap_or(0);

        let ctx = load_project(&params.0.project_root_path)?;
        let scan = ctx
            .scan()
            .map_err(|e| McpError::internal_error(format!("Scan failed: {:#}", e), None))?;

        // Merging into a scratch map yields the same diagnostics as `update`.
        let mut scratch = TranslationMap::new();
        let mut summary = update_translations(&mut scratch, &scan.records, &MergeOptions::default());
        summary.issues.extend(unterminated_issues(&scan));
        let error_count = summary
            .issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warning_count = summary.issues.len() - error_count;

        let total_count = scan.records.len();
        let items: Vec<RecordItem> = scan
            .records
            .iter()
            .skip(offset)
            .take(limit)
            .map(RecordItem::from)
            .collect();
        let has_more = offset + items.len() < total_count;

        info!(files = scan.files_scanned, records = total_count, "mcp scan finished");

        json_result(&ScanResult {
            files_scanned: scan.files_scanned,
            total_count,
            error_count,
            warning_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Translate texts through the configured locales
    #[tool(
        description = "Translate texts into a configured language, falling back through parent languages. Untranslated texts come back unchanged. With a count, each item also carries the plural form rendered for it."
    )]
    pub async fn translate(
        &self,
        params: Parameters<TranslateParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        if params.texts.is_empty() {
            return Err(McpError::invalid_params("texts array cannot be empty", None));
        }

        let ctx = load_project(&params.project_root_path)?;
        let mut resolver = ctx.resolver().map_err(|e| {
            McpError::internal_error(format!("Failed to load translations: {:#}", e), None)
        })?;
        let blank = params.texts.iter().filter(|t| t.trim().is_empty()).count();
        if blank > 0 {
            let error = LocaleError::new(LocaleErrorKind::Validation { count: blank });
            return Err(McpError::invalid_params(
                error.localized(&mut resolver, &params.language),
                None,
            ));
        }

        let options = TranslateOptions {
            domains: params.domains.unwrap_or_default(),
            contexts: params.contexts.unwrap_or_default(),
        };

        let texts: Vec<LocaleText> = params
            .texts
            .iter()
            .map(|raw| LocaleText::parse_argument(raw))
            .collect();
        let items: Vec<TranslatedItem> = resolver
            .translate_each(&params.language, &texts, &options)
            .into_iter()
            .zip(&texts)
            .map(|(translation, text)| TranslatedItem {
                source: text.display(),
                translation: translation.text.display(),
                is_translated: translation.is_translated,
                rendered: params.count.map(|n| format_count(&translation.text, n)),
            })
            .collect();

        json_result(&TranslateResult {
            language: params.language,
            items,
        })
    }
}

fn load_project(root: &str) -> Result<ProjectContext, McpError> {
    ProjectContext::load(Path::new(root))
        .map_err(|e| McpError::internal_error(format!("Failed to initialize: {:#}", e), None))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("JSON serialization failed: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for LocaleMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "rf-locale MCP exposes translation extraction and lookup for a source tree.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. scan_sources - List extracted translation calls (paginated)\n\
                 3. translate - Resolve texts into a configured language\n\n\
                 Run scan_sources first; calls reported with an error are skipped by `rf-locale update`."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            info!("starting MCP server on stdio");
            let service = LocaleMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
