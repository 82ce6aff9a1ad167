//! Axum-based RPC server.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{self, NodeHandle};
use tessera_node::NodeError;

pub struct RpcServer {
    pub port: u16,
}

impl RpcServer {
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Build the router over a shared node handle.
    pub fn router(node: NodeHandle) -> Router {
        Router::new()
            .route("/identity/create", post(handlers::create_identity))
            .route("/identity/link", post(handlers::link_wallet))
            .route("/identity/primary", post(handlers::set_primary))
            .route("/identity/compromise", post(handlers::mark_compromised))
            .route("/identity/finalize", post(handlers::finalize_compromise))
            .route("/identity/:id", get(handlers::identity_summary))
            .route("/badge/claim", post(handlers::claim_badge))
            .route("/event/:id/claim", post(handlers::claim_token))
            .route("/event/:id/pause", post(handlers::set_paused))
            .route("/bridge/route", post(handlers::set_route))
            .route("/bridge/fee/:dest", get(handlers::estimate_fee))
            .route("/bridge/lock", post(handlers::lock_for_bridge))
            .route("/bridge/transfer", post(handlers::bridge_to_chain))
            .route("/bridge/transfer/:correlation", get(handlers::transfer_status))
            .route("/bridge/stalled", get(handlers::stalled_transfers))
            .with_state(node)
    }

    /// Bind and serve until the task is cancelled.
    pub async fn start(&self, node: NodeHandle) -> Result<(), NodeError> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(addr = %addr, "RPC server listening");
        axum::serve(listener, Self::router(node))
            .await
            .map_err(NodeError::Io)?;
        Ok(())
    }
}
