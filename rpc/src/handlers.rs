//! RPC request handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use tessera_bridge::BridgeTransfer;
use tessera_heritage::BadgeKind;
use tessera_node::{ChainNode, IdentitySummary, NodeError};
use tessera_types::{
    ChainId, CorrelationId, EventId, IdentityId, Signature, Timestamp, TokenId, WalletAddress,
};

use crate::error::RpcError;

/// Shared handle to the single-writer node.
pub type NodeHandle = Arc<Mutex<ChainNode>>;

fn parse_correlation(raw: &str) -> Result<CorrelationId, RpcError> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [chain, token, nonce] = parts.as_slice() else {
        return Err(RpcError::BadRequest(format!(
            "correlation id must be chain:token:nonce, got {raw}"
        )));
    };
    let parse = |s: &str| {
        s.parse::<u64>()
            .map_err(|_| RpcError::BadRequest(format!("invalid number in correlation id: {s}")))
    };
    Ok(CorrelationId::new(
        ChainId::new(parse(chain)?),
        TokenId::new(parse(token)?),
        parse(nonce)?,
    ))
}

// ── Identity ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateIdentityRequest {
    pub wallet: WalletAddress,
}

#[derive(Serialize)]
pub struct CreateIdentityResponse {
    pub identity: IdentityId,
}

pub async fn create_identity(
    State(node): State<NodeHandle>,
    Json(req): Json<CreateIdentityRequest>,
) -> Result<Json<CreateIdentityResponse>, RpcError> {
    let identity = node
        .lock()
        .await
        .create_identity(&req.wallet, Timestamp::now())?;
    Ok(Json(CreateIdentityResponse { identity }))
}

#[derive(Deserialize)]
pub struct LinkWalletRequest {
    pub existing: WalletAddress,
    pub new_wallet: WalletAddress,
    pub sig_existing: Signature,
    pub sig_new: Signature,
}

#[derive(Serialize)]
pub struct LinkWalletResponse {
    pub identity: IdentityId,
}

pub async fn link_wallet(
    State(node): State<NodeHandle>,
    Json(req): Json<LinkWalletRequest>,
) -> Result<Json<LinkWalletResponse>, RpcError> {
    let identity = node.lock().await.link_wallet(
        &req.existing,
        &req.new_wallet,
        &req.sig_existing,
        &req.sig_new,
        Timestamp::now(),
    )?;
    Ok(Json(LinkWalletResponse { identity }))
}

#[derive(Deserialize)]
pub struct SetPrimaryRequest {
    pub wallet: WalletAddress,
}

pub async fn set_primary(
    State(node): State<NodeHandle>,
    Json(req): Json<SetPrimaryRequest>,
) -> Result<Json<serde_json::Value>, RpcError> {
    node.lock()
        .await
        .set_primary_wallet(&req.wallet, Timestamp::now())?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Deserialize)]
pub struct MarkCompromisedRequest {
    pub reporter: WalletAddress,
    pub wallet: WalletAddress,
}

#[derive(Serialize)]
pub struct MarkCompromisedResponse {
    pub dispute_deadline: Timestamp,
}

pub async fn mark_compromised(
    State(node): State<NodeHandle>,
    Json(req): Json<MarkCompromisedRequest>,
) -> Result<Json<MarkCompromisedResponse>, RpcError> {
    let dispute_deadline =
        node.lock()
            .await
            .mark_compromised(&req.reporter, &req.wallet, Timestamp::now())?;
    Ok(Json(MarkCompromisedResponse { dispute_deadline }))
}

#[derive(Deserialize)]
pub struct FinalizeCompromiseRequest {
    pub wallet: WalletAddress,
}

#[derive(Serialize)]
pub struct FinalizeCompromiseResponse {
    pub identity: IdentityId,
    pub suspended: bool,
}

pub async fn finalize_compromise(
    State(node): State<NodeHandle>,
    Json(req): Json<FinalizeCompromiseRequest>,
) -> Result<Json<FinalizeCompromiseResponse>, RpcError> {
    let outcome = node
        .lock()
        .await
        .finalize_compromise(&req.wallet, Timestamp::now())?;
    Ok(Json(FinalizeCompromiseResponse {
        identity: outcome.identity,
        suspended: outcome.suspended,
    }))
}

pub async fn identity_summary(
    State(node): State<NodeHandle>,
    Path(id): Path<u64>,
) -> Result<Json<IdentitySummary>, RpcError> {
    let summary = node
        .lock()
        .await
        .identity_summary(IdentityId::new(id), Timestamp::now())?;
    Ok(Json(summary))
}

// ── Heritage ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ClaimBadgeRequest {
    pub identity: u64,
    pub kind: String,
    pub destination: WalletAddress,
}

pub async fn claim_badge(
    State(node): State<NodeHandle>,
    Json(req): Json<ClaimBadgeRequest>,
) -> Result<Json<serde_json::Value>, RpcError> {
    node.lock().await.claim_badge(
        IdentityId::new(req.identity),
        &BadgeKind::new(req.kind),
        &req.destination,
    )?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

// ── Token events ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ClaimTokenRequest {
    pub wallet: WalletAddress,
}

#[derive(Serialize)]
pub struct ClaimTokenResponse {
    pub token: TokenId,
    pub remaining_supply: u64,
}

pub async fn claim_token(
    State(node): State<NodeHandle>,
    Path(event): Path<u64>,
    Json(req): Json<ClaimTokenRequest>,
) -> Result<Json<ClaimTokenResponse>, RpcError> {
    let event = EventId::new(event);
    let mut node = node.lock().await;
    let token = node.claim(event, &req.wallet, Timestamp::now())?;
    let remaining_supply = node.event(event)?.remaining_supply();
    Ok(Json(ClaimTokenResponse {
        token,
        remaining_supply,
    }))
}

#[derive(Deserialize)]
pub struct SetPausedRequest {
    pub caller: WalletAddress,
    pub paused: bool,
}

pub async fn set_paused(
    State(node): State<NodeHandle>,
    Path(event): Path<u64>,
    Json(req): Json<SetPausedRequest>,
) -> Result<Json<serde_json::Value>, RpcError> {
    node.lock()
        .await
        .set_paused(EventId::new(event), &req.caller, req.paused)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

// ── Bridge ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetRouteRequest {
    pub caller: WalletAddress,
    pub chain_id: u64,
    pub address: WalletAddress,
}

#[derive(Serialize)]
pub struct SetRouteResponse {
    pub changed: bool,
}

pub async fn set_route(
    State(node): State<NodeHandle>,
    Json(req): Json<SetRouteRequest>,
) -> Result<Json<SetRouteResponse>, RpcError> {
    let changed =
        node.lock()
            .await
            .set_bridge_address(&req.caller, ChainId::new(req.chain_id), req.address)?;
    Ok(Json(SetRouteResponse { changed }))
}

#[derive(Serialize)]
pub struct FeeEstimateResponse {
    pub dest_chain: u64,
    pub estimate: u128,
}

pub async fn estimate_fee(
    State(node): State<NodeHandle>,
    Path(dest): Path<u64>,
) -> Result<Json<FeeEstimateResponse>, RpcError> {
    let estimate = node.lock().await.estimate_bridge_fee(ChainId::new(dest));
    Ok(Json(FeeEstimateResponse {
        dest_chain: dest,
        estimate,
    }))
}

#[derive(Deserialize)]
pub struct LockRequest {
    pub event: u64,
    pub caller: WalletAddress,
    pub token: u64,
}

pub async fn lock_for_bridge(
    State(node): State<NodeHandle>,
    Json(req): Json<LockRequest>,
) -> Result<Json<serde_json::Value>, RpcError> {
    node.lock().await.lock_for_bridge(
        EventId::new(req.event),
        &req.caller,
        TokenId::new(req.token),
    )?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Deserialize)]
pub struct BridgeTransferRequest {
    pub event: u64,
    pub caller: WalletAddress,
    pub token: u64,
    pub dest_chain: u64,
    pub fee: u128,
}

#[derive(Serialize)]
pub struct BridgeTransferResponse {
    pub correlation: String,
}

pub async fn bridge_to_chain(
    State(node): State<NodeHandle>,
    Json(req): Json<BridgeTransferRequest>,
) -> Result<Json<BridgeTransferResponse>, RpcError> {
    let correlation = node.lock().await.bridge_to_chain(
        EventId::new(req.event),
        &req.caller,
        TokenId::new(req.token),
        ChainId::new(req.dest_chain),
        req.fee,
        Timestamp::now(),
    )?;
    Ok(Json(BridgeTransferResponse {
        correlation: correlation.to_string(),
    }))
}

pub async fn transfer_status(
    State(node): State<NodeHandle>,
    Path(raw): Path<String>,
) -> Result<Json<BridgeTransfer>, RpcError> {
    let correlation = parse_correlation(&raw)?;
    let node = node.lock().await;
    let transfer = node.transfer(correlation).cloned().ok_or_else(|| {
        RpcError::Node(NodeError::Bridge(
            tessera_bridge::BridgeError::UnknownTransfer(correlation),
        ))
    })?;
    Ok(Json(transfer))
}

#[derive(Serialize)]
pub struct StalledTransfersResponse {
    pub stalled: Vec<String>,
}

pub async fn stalled_transfers(
    State(node): State<NodeHandle>,
) -> Result<Json<StalledTransfersResponse>, RpcError> {
    let node = node.lock().await;
    let stalled = node
        .stalled_transfers(Timestamp::now())
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    Ok(Json(StalledTransfersResponse { stalled }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_parsing() {
        let c = parse_correlation("1:42:7").unwrap();
        assert_eq!(c.source_chain.as_u64(), 1);
        assert_eq!(c.token.as_u64(), 42);
        assert_eq!(c.nonce, 7);
        assert!(parse_correlation("1:42").is_err());
        assert!(parse_correlation("a:b:c").is_err());
    }
}
