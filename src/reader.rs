use alloy::{
    eips::BlockId,
    primitives::{Address, Bytes, TxKind},
    providers::{Provider, ProviderBuilder},
    rpc::types::{TransactionInput, TransactionRequest},
    transports::TransportError,
};
use async_trait::async_trait;

/// One confirmed point on the chain. Immutable once fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainBlock {
    pub height: u64,
    pub timestamp: u64,
}

/// The only capability the core needs from its environment. Any JSON-RPC
/// node satisfies it; tests inject fixture chains instead.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Latest known block height.
    async fn current_height(&self) -> crate::Result<u64>;

    /// Timestamp of the block at `height`, or `None` if the node has pruned
    /// it or does not have it.
    async fn block_at(&self, height: u64) -> crate::Result<Option<ChainBlock>>;

    /// Read-only contract call evaluated against chain state as of `height`.
    async fn call_contract(
        &self,
        token: Address,
        calldata: Bytes,
        height: u64,
    ) -> crate::Result<Bytes>;
}

pub struct RpcReader<P> {
    provider: P,
}

impl<P: Provider> RpcReader<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

/// Builds a reader over an HTTP JSON-RPC endpoint.
pub fn connect_http(rpc_url: &str) -> crate::Result<RpcReader<impl Provider>> {
    rpc_url
        .parse()
        .map_err(|e| crate::Error::UrlParsingFailed(rpc_url.to_string(), e))
        .map(|rpc_url| RpcReader::new(ProviderBuilder::new().connect_http(rpc_url)))
}

#[async_trait]
impl<P: Provider> ChainReader for RpcReader<P> {
    async fn current_height(&self) -> crate::Result<u64> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| crate::Error::Transport {
                operation: "eth_blockNumber",
                source: e,
            })
    }

    async fn block_at(&self, height: u64) -> crate::Result<Option<ChainBlock>> {
        let block = self
            .provider
            .get_block_by_number(height.into())
            .await
            .map_err(|e| crate::Error::Transport {
                operation: "eth_getBlockByNumber",
                source: e,
            })?;

        Ok(block.map(|block| ChainBlock {
            height,
            timestamp: block.header.timestamp,
        }))
    }

    async fn call_contract(
        &self,
        token: Address,
        calldata: Bytes,
        height: u64,
    ) -> crate::Result<Bytes> {
        let tx = TransactionRequest {
            to: Some(TxKind::Call(token)),
            input: TransactionInput::new(calldata),
            ..Default::default()
        };

        self.provider
            .call(tx)
            .block(BlockId::number(height))
            .await
            .map_err(|e| classify_call_error(token, e))
    }
}

// An error response from the node (e.g. a revert) is semantic and will not
// change on retry; everything else is a transport failure.
fn classify_call_error(token: Address, e: TransportError) -> crate::Error {
    if let Some(payload) = e.as_error_resp() {
        crate::Error::ContractCallFailed {
            call: "eth_call",
            token,
            reason: payload.message.to_string(),
        }
    } else {
        crate::Error::Transport {
            operation: "eth_call",
            source: e,
        }
    }
}
