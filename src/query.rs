use alloy::primitives::Address;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::{format, reader::ChainReader, resolver, snapshot, snapshot::TokenSnapshot};

/// Everything the caller gets back: the resolved height, the raw balance as
/// a string (it may exceed 64 bits), and the exact human-scaled amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub block_height: u64,
    pub raw_balance: String,
    pub decimals: u8,
    pub symbol: String,
    pub formatted_balance: String,
}

impl From<TokenSnapshot> for BalanceReport {
    fn from(snap: TokenSnapshot) -> Self {
        Self {
            block_height: snap.block_height,
            raw_balance: snap.raw_balance.to_string(),
            formatted_balance: format::format_balance(snap.raw_balance, snap.decimals),
            decimals: snap.decimals,
            symbol: snap.symbol,
        }
    }
}

pub fn parse_address(input: &str) -> crate::Result<Address> {
    input
        .parse::<Address>()
        .map_err(|_| crate::Error::InvalidAddress(input.to_string()))
}

/// Converts a calendar date to Unix seconds before any network call is made.
///
/// Accepts `YYYY-MM-DD` (taken as midnight UTC) or a full RFC 3339 instant.
/// Pre-epoch dates clamp to 0, which predates every EVM genesis and so
/// resolves to height 0 anyway.
pub fn parse_date(input: &str) -> crate::Result<u64> {
    let seconds = if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date.and_time(NaiveTime::MIN).and_utc().timestamp()
    } else if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        datetime.timestamp()
    } else {
        return Err(crate::Error::InvalidDate(input.to_string()));
    };

    Ok(seconds.max(0) as u64)
}

/// The whole pipeline: date -> height -> snapshot -> report.
pub async fn balance_at_date<R>(
    reader: &R,
    wallet: Address,
    token: Address,
    date: &str,
) -> crate::Result<BalanceReport>
where
    R: ChainReader + ?Sized,
{
    let target = parse_date(date)?;
    let height = resolver::resolve(reader, target).await?;
    let snap = snapshot::snapshot(reader, token, wallet, height).await?;
    Ok(BalanceReport::from(snap))
}
