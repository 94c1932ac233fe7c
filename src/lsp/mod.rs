//! Language Server Protocol implementation for the `patched` integration.
//!
//! Built directly into the main binary and started with `patched-lsp server`.

pub mod server;
pub mod types;

pub use server::PatchedLanguageServer;
pub use types::PatchedLspConfig;

use anyhow::Result;
use tokio::net::TcpListener;
use tower_lsp::{LspService, Server};

/// Start the language server on stdio.
pub async fn start_server() -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| PatchedLanguageServer::new(client, None));

    log::info!("starting patched language server on stdio");

    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}

/// Start the language server over TCP (useful for debugging).
pub async fn start_tcp_server(port: u16) -> Result<()> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    log::info!("patched language server listening on 127.0.0.1:{port}");

    loop {
        let (stream, _) = listener.accept().await?;
        let (service, socket) = LspService::new(|client| PatchedLanguageServer::new(client, None));

        tokio::spawn(async move {
            let (read, write) = tokio::io::split(stream);
            Server::new(read, write, socket).serve(service).await;
        });
    }
}
