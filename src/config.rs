use crate::domain::{Address, TimeWindow};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GAME_TOKEN_ADDRESS: &str = "0x26193c7fa4354ae49ec53ea2cebc513dc39a10aa";
pub const DEFAULT_TOKEN_UNIT_SCALE: f64 = 1e18;
pub const DEFAULT_SECONDS_PER_DAY: i64 = 86_400;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;
pub const DEFAULT_FETCH_PAUSE_MS: u64 = 1_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub object_store_root: String,
    pub buckets: BucketConfig,
    pub window: TimeWindow,
    pub economy: EconomyConfig,
    pub fetch_concurrency: usize,
    pub fetch_pause: Duration,
}

/// Where the transfer logs and side tables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketConfig {
    pub transfer_bucket: String,
    pub user_bucket: String,
    pub price_bucket: String,
    pub user_join_key: String,
    pub price_history_key: String,
    pub roi_days_key: Option<String>,
}

/// Token and contract constants of the game economy.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomyConfig {
    pub game_token_address: Address,
    pub token_unit_scale: f64,
    pub seconds_per_day: i64,
    pub rent_contract: Address,
    pub purchase_contract: Address,
    pub auction_contract: Address,
    pub withdraw_contract: Address,
    pub game_wallets: HashSet<Address>,
}

impl EconomyConfig {
    pub fn is_rent(&self, contract: &Address) -> bool {
        *contract == self.rent_contract
    }

    /// Purchase and auction contracts both count as investing.
    pub fn is_investment(&self, contract: &Address) -> bool {
        *contract == self.purchase_contract || *contract == self.auction_contract
    }

    pub fn is_withdraw(&self, contract: &Address) -> bool {
        *contract == self.withdraw_contract
    }

    pub fn is_game_wallet(&self, address: &Address) -> bool {
        self.game_wallets.contains(address)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let object_store_root = required(&env_map, "OBJECT_STORE_ROOT")?;

        let buckets = BucketConfig {
            transfer_bucket: required(&env_map, "TRANSFER_BUCKET")?,
            user_bucket: required(&env_map, "USER_BUCKET")?,
            price_bucket: required(&env_map, "PRICE_BUCKET")?,
            user_join_key: env_map
                .get("USER_JOIN_KEY")
                .cloned()
                .unwrap_or_else(|| "per-user-join-time.json".to_string()),
            price_history_key: env_map
                .get("PRICE_HISTORY_KEY")
                .cloned()
                .unwrap_or_else(|| "sea-token-price-history.json".to_string()),
            roi_days_key: env_map
                .get("ROI_DAYS_KEY")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        let from = parse_required::<i64>(&env_map, "WINDOW_FROM", "must be Unix seconds")?;
        let to = parse_required::<i64>(&env_map, "WINDOW_TO", "must be Unix seconds")?;
        if from > to {
            return Err(ConfigError::InvalidValue(
                "WINDOW_FROM".to_string(),
                format!("must be <= WINDOW_TO ({} > {})", from, to),
            ));
        }

        let token_unit_scale =
            parse_or::<f64>(&env_map, "TOKEN_UNIT_SCALE", DEFAULT_TOKEN_UNIT_SCALE, "must be a number")?;
        if !(token_unit_scale.is_finite() && token_unit_scale > 0.0) {
            return Err(ConfigError::InvalidValue(
                "TOKEN_UNIT_SCALE".to_string(),
                "must be a positive number".to_string(),
            ));
        }

        let seconds_per_day =
            parse_or::<i64>(&env_map, "SECONDS_PER_DAY", DEFAULT_SECONDS_PER_DAY, "must be a valid i64")?;
        if seconds_per_day <= 0 {
            return Err(ConfigError::InvalidValue(
                "SECONDS_PER_DAY".to_string(),
                "must be positive".to_string(),
            ));
        }

        let economy = EconomyConfig {
            game_token_address: Address::new(
                env_map
                    .get("GAME_TOKEN_ADDRESS")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_GAME_TOKEN_ADDRESS.to_string()),
            ),
            token_unit_scale,
            seconds_per_day,
            rent_contract: Address::new(required(&env_map, "RENT_CONTRACT")?),
            purchase_contract: Address::new(required(&env_map, "PURCHASE_CONTRACT")?),
            auction_contract: Address::new(required(&env_map, "AUCTION_CONTRACT")?),
            withdraw_contract: Address::new(required(&env_map, "WITHDRAW_CONTRACT")?),
            game_wallets: game_wallets(&env_map)?,
        };

        let fetch_concurrency = parse_or::<usize>(
            &env_map,
            "FETCH_CONCURRENCY",
            DEFAULT_FETCH_CONCURRENCY,
            "must be a positive integer",
        )?;
        if fetch_concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "FETCH_CONCURRENCY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let fetch_pause_ms =
            parse_or::<u64>(&env_map, "FETCH_PAUSE_MS", DEFAULT_FETCH_PAUSE_MS, "must be a valid u64")?;

        Ok(Config {
            object_store_root,
            buckets,
            window: TimeWindow::new(from, to),
            economy,
            fetch_concurrency,
            fetch_pause: Duration::from_millis(fetch_pause_ms),
        })
    }
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    env_map
        .get(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

fn parse_required<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    expected: &str,
) -> Result<T, ConfigError> {
    required(env_map, key)?
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), expected.to_string()))
}

fn parse_or<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
    expected: &str,
) -> Result<T, ConfigError> {
    match env_map.get(key) {
        Some(s) => s
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(key.to_string(), expected.to_string())),
        None => Ok(default),
    }
}

const GAME_WALLETS_INLINE: &str = "GAME_WALLET_ADDRESSES";
const GAME_WALLETS_FILE: &str = "GAME_WALLET_ADDRESSES_FILE";

/// Game-owned wallets, inline (comma separated) or from a file (one per line).
/// The inline list wins when both are set.
fn game_wallets(env_map: &HashMap<String, String>) -> Result<HashSet<Address>, ConfigError> {
    let listing = match (env_map.get(GAME_WALLETS_INLINE), env_map.get(GAME_WALLETS_FILE)) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidValue(GAME_WALLETS_FILE.to_string(), format!("readable file ({e})"))
        })?,
        (None, None) => return Ok(HashSet::new()),
    };

    Ok(listing
        .split(|c| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|wallet| !wallet.is_empty())
        .map(Address::from)
        .collect())
}
