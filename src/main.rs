use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::{debug, info};

use filter_queries_language_server::backend::FilterQueriesBackend;
use filter_queries_language_server::hierarchy;
use filter_queries_language_server::logging::init_logger;

/// Language server backing the grammY filter queries explorer.
#[derive(Debug, Parser)]
#[command(name = "filter-queries-language-server", version, about)]
struct Cli {
    /// Communicate over stdio. This is the only supported transport; the
    /// flag is accepted for editor-client compatibility.
    #[arg(long)]
    stdio: bool,

    /// Override the stderr log level (otherwise RUST_LOG or "info")
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in stderr output
    #[arg(long)]
    no_color: bool,

    /// Disable the session log file in the user cache directory
    #[arg(long)]
    no_file_log: bool,

    /// Process id of the editor that spawned the server
    #[arg(long)]
    client_process_id: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = init_logger(cli.no_color, cli.log_level.as_deref(), !cli.no_file_log)?;

    if cli.stdio {
        debug!("--stdio transport requested");
    }
    if let Some(pid) = cli.client_process_id {
        info!("Serving editor process {pid}");
    }

    // Build the process-wide index before accepting requests.
    let index = hierarchy::global();
    info!(
        "Indexed {} filter queries into {} families",
        index.docs().len(),
        index.groups().count()
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::build(FilterQueriesBackend::new)
        .custom_method("filterQueries/roots", FilterQueriesBackend::filter_query_roots)
        .custom_method(
            "filterQueries/children",
            FilterQueriesBackend::filter_query_children,
        )
        .finish();

    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
