use alloy::primitives::{Address, Bytes, U256};
use tracing::info;

use crate::{erc20, reader::ChainReader};

/// Token state read at one fixed block height. State at a past height never
/// changes, so repeated snapshots at the same height return identical values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub raw_balance: U256,
    pub decimals: u8,
    pub symbol: String,
    pub block_height: u64,
}

/// Reads balance, decimals and symbol of `token` for `wallet` at `height`.
///
/// The three calls have no data dependency on each other and run
/// concurrently; the first failure aborts the snapshot, since a partial
/// snapshot cannot be formatted.
pub async fn snapshot<R>(
    reader: &R,
    token: Address,
    wallet: Address,
    height: u64,
) -> crate::Result<TokenSnapshot>
where
    R: ChainReader + ?Sized,
{
    let (raw_balance, decimals, symbol) = tokio::try_join!(
        fetch_raw_balance(reader, token, wallet, height),
        fetch_decimals(reader, token, height),
        fetch_symbol(reader, token, height),
    )?;

    info!(%token, height, %raw_balance, decimals, symbol, "token snapshot complete");

    Ok(TokenSnapshot {
        raw_balance,
        decimals,
        symbol,
        block_height: height,
    })
}

async fn fetch_raw_balance<R>(
    reader: &R,
    token: Address,
    wallet: Address,
    height: u64,
) -> crate::Result<U256>
where
    R: ChainReader + ?Sized,
{
    let data = reader
        .call_contract(token, erc20::encode_balance_of(wallet), height)
        .await?;
    ensure_return_data("balanceOf", token, &data)?;
    erc20::decode_balance_of(&data).map_err(|e| malformed("balanceOf", token, e))
}

async fn fetch_decimals<R>(reader: &R, token: Address, height: u64) -> crate::Result<u8>
where
    R: ChainReader + ?Sized,
{
    let data = reader
        .call_contract(token, erc20::encode_decimals(), height)
        .await?;
    ensure_return_data("decimals", token, &data)?;
    // Decoding as uint8 is what keeps the 0-255 contract; anything wider
    // fails the type check and surfaces as malformed data.
    erc20::decode_decimals(&data).map_err(|e| malformed("decimals", token, e))
}

async fn fetch_symbol<R>(reader: &R, token: Address, height: u64) -> crate::Result<String>
where
    R: ChainReader + ?Sized,
{
    let data = reader
        .call_contract(token, erc20::encode_symbol(), height)
        .await?;
    ensure_return_data("symbol", token, &data)?;
    erc20::decode_symbol(&data).map_err(|e| malformed("symbol", token, e))
}

// eth_call against an address with no code succeeds with empty return data,
// which is how a non-contract address shows up.
fn ensure_return_data(call: &'static str, token: Address, data: &Bytes) -> crate::Result<()> {
    if data.is_empty() {
        return Err(crate::Error::ContractCallFailed {
            call,
            token,
            reason: "empty return data, no contract code at this height?".to_string(),
        });
    }
    Ok(())
}

fn malformed(call: &'static str, token: Address, source: alloy::sol_types::Error) -> crate::Error {
    crate::Error::MalformedReturnData {
        call,
        token,
        source,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy::primitives::address;

    use super::*;
    use crate::reader::mock::MockReader;
    use crate::ErrorKind;

    const TOKEN: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    const WALLET: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

    #[tokio::test]
    async fn test_snapshot_reads_all_three_fields() {
        let reader = MockReader::token(vec![100; 10], U256::from(2_500_000u64), 6, "USDC");

        let snap = snapshot(&reader, TOKEN, WALLET, 7).await.unwrap();
        assert_eq!(
            snap,
            TokenSnapshot {
                raw_balance: U256::from(2_500_000u64),
                decimals: 6,
                symbol: "USDC".to_string(),
                block_height: 7,
            }
        );
    }

    #[tokio::test]
    async fn test_snapshot_is_idempotent_at_fixed_height() {
        let reader = MockReader::token(vec![100; 10], U256::from(42u64), 18, "DAI");

        let first = snapshot(&reader, TOKEN, WALLET, 3).await.unwrap();
        let second = snapshot(&reader, TOKEN, WALLET, 3).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_address_without_code_fails_as_contract_call() {
        let mut reader = MockReader::chain(vec![100; 10]);
        reader.has_code = false;

        let err = snapshot(&reader, TOKEN, WALLET, 5).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContractCall);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_run_concurrently_not_sequentially() {
        let mut reader = MockReader::token(vec![100; 10], U256::from(1u64), 6, "USDC");
        reader.call_latency = Duration::from_millis(100);

        let started = tokio::time::Instant::now();
        snapshot(&reader, TOKEN, WALLET, 5).await.unwrap();
        let elapsed = started.elapsed();

        // Three concurrent 100ms calls take ~100ms; sequential would be 300ms
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(250), "calls ran sequentially: {elapsed:?}");
    }
}
