//! Decoding of daily transfer log objects.
//!
//! Body layout: a header row, then one row per transfer with columns
//! `token,from,to,value,tx_hash,log_index,block_number,timestamp,contract`.
//! Rows are split on a bare comma; quotes carry no meaning, so a field that
//! itself contains a comma shifts every later column of that row.

use crate::domain::{Address, Transfer};
use std::str::FromStr;
use tracing::trace;

/// Columns a row needs before it is considered a transfer.
pub const TRANSFER_FIELD_COUNT: usize = 9;

/// Decode one log body into the transfers of `game_token`.
///
/// Line 0 is the header whatever it holds, blank included.
///
/// Row policy:
/// - fewer than [`TRANSFER_FIELD_COUNT`] fields, or not valid UTF-8: row dropped
/// - token column other than `game_token`: row dropped
/// - unparsable value/log index/block number/timestamp: that field becomes 0,
///   the row is kept
pub fn decode_transfers(body: &[u8], game_token: &Address) -> Vec<Transfer> {
    let rows: &[u8] = match body.iter().position(|&b| b == b'\n') {
        Some(end) => &body[end + 1..],
        None => &[],
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(rows);

    let mut transfers = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                trace!(row, error = %e, "Dropping undecodable row");
                continue;
            }
        };
        if record.len() < TRANSFER_FIELD_COUNT {
            trace!(row, fields = record.len(), "Dropping short row");
            continue;
        }
        if &record[0] != game_token.as_str() {
            continue;
        }

        transfers.push(Transfer {
            token_address: Address::new(&record[0]),
            from_address: Address::new(&record[1]),
            to_address: Address::new(&record[2]),
            value: parse_or_zero(&record[3], "value", row),
            transaction_hash: record[4].to_string(),
            log_index: parse_or_zero(&record[5], "log_index", row),
            block_number: parse_or_zero(&record[6], "block_number", row),
            timestamp: parse_or_zero(&record[7], "timestamp", row),
            contract_address: Address::new(&record[8]),
        });
    }
    transfers
}

fn parse_or_zero<T: FromStr + Default>(field: &str, column: &'static str, row: usize) -> T {
    field.parse::<T>().unwrap_or_else(|_| {
        trace!(row, column, field, "Unparsable field, using zero");
        T::default()
    })
}
