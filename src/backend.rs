//! tower-lsp backend serving the filter-queries tree and insert command.

use serde_json::Value;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionOptions, CompletionParams, CompletionResponse,
    Documentation, ExecuteCommandOptions, ExecuteCommandParams, InitializeParams,
    InitializeResult, InitializedParams, InsertTextFormat, ServerCapabilities,
};
use tower_lsp::{Client, LanguageServer, jsonrpc};
use tracing::{debug, info, warn};

use crate::hierarchy::{self, FilterQueryIndex};
use crate::snippet::{self, SnippetError};
use crate::tree::{ChildrenParams, FilterNode, TreeProvider};

/// Command id the editor invokes to insert a handler snippet.
pub const INSERT_COMMAND: &str = "filterQueries.insert";

/// Notification the client re-renders the tree on. The catalog is static
/// for the process lifetime, so nothing sends this after registration.
#[derive(Debug)]
pub enum TreeDidChange {}

impl Notification for TreeDidChange {
    type Params = ();
    const METHOD: &'static str = "filterQueries/didChange";
}

#[derive(Debug)]
pub struct FilterQueriesBackend {
    client: Client,
    index: &'static FilterQueryIndex,
}

impl FilterQueriesBackend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            index: hierarchy::global(),
        }
    }

    fn provider(&self) -> TreeProvider<'static> {
        TreeProvider::new(self.index)
    }

    /// Handler for the `filterQueries/roots` request.
    pub async fn filter_query_roots(&self) -> jsonrpc::Result<Vec<FilterNode>> {
        let roots = self.provider().roots();
        debug!("filterQueries/roots -> {} families", roots.len());
        Ok(roots)
    }

    /// Handler for the `filterQueries/children` request. Returns `null` for
    /// labels that are already full three-segment paths.
    pub async fn filter_query_children(
        &self,
        params: ChildrenParams,
    ) -> jsonrpc::Result<Option<Vec<FilterNode>>> {
        let children = self.provider().children(&params.label);
        debug!(
            label = %params.label,
            count = children.as_ref().map(Vec::len),
            "filterQueries/children"
        );
        Ok(children)
    }

    /// Tells the client to re-render the tree from `roots()`.
    pub async fn notify_tree_changed(&self) {
        self.client.send_notification::<TreeDidChange>(()).await;
    }
}

fn invalid_params(error: SnippetError) -> jsonrpc::Error {
    jsonrpc::Error {
        code: jsonrpc::ErrorCode::InvalidParams,
        message: error.to_string().into(),
        data: None,
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for FilterQueriesBackend {
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        if let Some(pid) = params.process_id {
            info!("Client process id: {pid}");
        }
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                completion_provider: Some(CompletionOptions::default()),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![INSERT_COMMAND.to_string()],
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!(
            "Server initialized; serving {} filter queries in {} families",
            self.index.docs().len(),
            self.index.groups().count()
        );
    }

    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        Ok(())
    }

    /// Offers every catalog query as a snippet completion, reusing the same
    /// template the insert command produces.
    async fn completion(
        &self,
        _: CompletionParams,
    ) -> jsonrpc::Result<Option<CompletionResponse>> {
        let items = self
            .index
            .docs()
            .iter()
            .map(|doc| CompletionItem {
                label: doc.query.clone(),
                kind: Some(CompletionItemKind::SNIPPET),
                documentation: Some(Documentation::String(doc.description.clone())),
                insert_text: snippet::insert_snippet(&doc.query).ok(),
                insert_text_format: Some(InsertTextFormat::SNIPPET),
                ..Default::default()
            })
            .collect();
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> jsonrpc::Result<Option<Value>> {
        if params.command != INSERT_COMMAND {
            warn!("Unknown command: {}", params.command);
            return Err(jsonrpc::Error::method_not_found());
        }
        let (query, positions) =
            snippet::parse_insert_args(&params.arguments).map_err(invalid_params)?;
        let response = snippet::insert_command(&query, &positions).map_err(invalid_params)?;
        info!(
            "Inserting snippet for {} at {} cursor(s)",
            query,
            response.insertions.len()
        );
        Ok(Some(serde_json::to_value(response).map_err(|e| {
            warn!("Failed to encode insert response: {e}");
            jsonrpc::Error::internal_error()
        })?))
    }
}
