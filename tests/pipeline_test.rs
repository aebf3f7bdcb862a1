//! End-to-end runs of the analyzer against an in-memory object store.

use ledger_metrics::config::Config;
use ledger_metrics::orchestration::{FetchError, SideTableError};
use ledger_metrics::{
    Address, AppError, Analyzer, LocalObjectStore, MockObjectStore, ObjectStore, PayerType,
    StoreError,
};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

const TOKEN: &str = "0x26193c7fa4354ae49ec53ea2cebc513dc39a10aa";
const HEADER: &str = "token_address,from_address,to_address,value,transaction_hash,log_index,block_number,block_timestamp,contract_address";

fn env(from: i64, to: i64) -> HashMap<String, String> {
    HashMap::from([
        ("OBJECT_STORE_ROOT".to_string(), "/unused".to_string()),
        ("TRANSFER_BUCKET".to_string(), "daily".to_string()),
        ("USER_BUCKET".to_string(), "users".to_string()),
        ("PRICE_BUCKET".to_string(), "prices".to_string()),
        ("WINDOW_FROM".to_string(), from.to_string()),
        ("WINDOW_TO".to_string(), to.to_string()),
        ("RENT_CONTRACT".to_string(), "0xrent".to_string()),
        ("PURCHASE_CONTRACT".to_string(), "0xpurchase".to_string()),
        ("AUCTION_CONTRACT".to_string(), "0xauction".to_string()),
        ("WITHDRAW_CONTRACT".to_string(), "0xwithdraw".to_string()),
        ("GAME_WALLET_ADDRESSES".to_string(), "0xgame".to_string()),
        ("FETCH_PAUSE_MS".to_string(), "0".to_string()),
    ])
}

fn config(from: i64, to: i64) -> Config {
    Config::from_env_map(env(from, to)).unwrap()
}

fn price_doc() -> &'static str {
    r#"{"prices":[{"date":"2023-11-14","price":0.5}]}"#
}

fn single_row_store() -> MockObjectStore {
    MockObjectStore::new()
        .with_object(
            "daily",
            "1700000000-part0",
            format!(
                "{}\n{},0xA,0xB,1000000000000000000,0xhash,0,1,1700000000,0xrent\n",
                HEADER, TOKEN
            ),
        )
        .with_object(
            "daily",
            "1690000000-part0",
            format!("{}\n{},0xC,0xD,5,0xold,0,1,1690000000,0xrent\n", HEADER, TOKEN),
        )
        .with_object("users", "per-user-join-time.json", "{}")
        .with_object("prices", "sea-token-price-history.json", price_doc())
}

#[tokio::test]
async fn test_single_object_in_window_yields_one_transfer() {
    let analyzer = Analyzer::new(
        Arc::new(single_row_store()),
        config(1_699_999_999, 1_700_000_001),
    );
    let report = analyzer.run().await.unwrap();

    assert_eq!(report.object_count, 1);
    assert_eq!(report.transfer_count, 1);
    assert_eq!(report.active_user_count, 2);
    assert_eq!(report.transaction_volume.renter_transaction_volume, 1);
    assert_eq!(report.payer_types.len(), 1);
    assert_eq!(report.payer_types[&Address::new("0xA")], PayerType::Renter);
    // Nobody joined in the window.
    assert!(report.user_roi_details.is_empty());
    assert_eq!(report.overall_profitable_rate, None);
    assert_eq!(report.spending_distribution.len(), 1);
    assert_eq!(report.spending_distribution[0].value, 1);
    assert!(report.roi_day_distribution.is_empty());
}

#[tokio::test]
async fn test_new_users_profit_and_rate() {
    let body = format!(
        "{h}\n\
         {t},0xold,0xnew1,2000000000000000000,0x1,0,10,1700000100,0xwithdraw\n\
         {t},0xnew2,0xgame,4000000000000000000,0x2,0,11,1700000200,0xpurchase\n\
         {t},0xshort,0xrow\n\
         0xothertoken,0xold,0xnew2,9000000000000000000,0x3,0,12,1700000300,0xrent\n",
        h = HEADER,
        t = TOKEN
    );
    let store = MockObjectStore::new()
        .with_object("daily", "1700000000-a", body)
        .with_object(
            "users",
            "per-user-join-time.json",
            r#"{"0xnew1":{"timestamp":"1700000050"},"0xnew2":{"timestamp":"1700000060"},"0xveteran":{"timestamp":"1600000000"}}"#,
        )
        .with_object("prices", "sea-token-price-history.json", price_doc())
        .with_object("users", "roi-days.json", r#"{"0xnew1":2,"0xnew2":0}"#);

    let mut vars = env(1_700_000_000, 1_700_086_399);
    vars.insert("ROI_DAYS_KEY".to_string(), "roi-days.json".to_string());
    let report = Analyzer::new(Arc::new(store), Config::from_env_map(vars).unwrap())
        .run()
        .await
        .unwrap();

    assert_eq!(report.transfer_count, 2);
    assert_eq!(report.user_roi_details.len(), 2);

    let new1 = &report.user_roi_details[0];
    assert_eq!(new1.user_address.as_str(), "0xnew1");
    assert_eq!(new1.total_spending, 0.0);
    assert_eq!(new1.total_profit, 2.0);

    let new2 = &report.user_roi_details[1];
    assert_eq!(new2.user_address.as_str(), "0xnew2");
    assert_eq!(new2.total_spending, 2.0);
    assert_eq!(new2.total_profit, -2.0);

    assert_eq!(report.overall_profitable_rate, Some(0.5));
    assert_eq!(report.unpriced_spend_count, 0);
    assert_eq!(report.transaction_volume.purchaser_transaction_volume, 4);
    assert_eq!(report.transaction_volume.withdrawer_transaction_volume, 2);
    assert_eq!(report.payer_types[&Address::new("0xnew2")], PayerType::Purchaser);

    assert_eq!(report.roi_day_distribution.len(), 1);
    assert_eq!(report.roi_day_distribution[0].value, 2);
    assert_eq!(report.roi_day_distribution[0].frequency_percentage, 1.0);
}

#[tokio::test]
async fn test_listing_failure_aborts_run() {
    let store = single_row_store().with_list_error(StoreError::Io("timeout".to_string()));
    let err = Analyzer::new(Arc::new(store), config(0, 2_000_000_000))
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Listing { ref bucket, .. } if bucket == "daily"));
}

#[tokio::test]
async fn test_missing_side_table_aborts_before_fan_out() {
    let store = MockObjectStore::new()
        .with_object("daily", "1700000000-part0", HEADER)
        .with_object("users", "per-user-join-time.json", "{}");
    let probe = store.clone();
    let err = Analyzer::new(Arc::new(store), config(0, 2_000_000_000))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::SideTable(SideTableError::Fetch { ref key, .. }) if key == "sea-token-price-history.json"
    ));
    // Only the two side-table requests were made; no log object was fetched.
    assert_eq!(probe.get_count(), 2);
}

#[tokio::test]
async fn test_failing_log_object_aborts_run() {
    let store = single_row_store().with_failing_object(
        "daily",
        "1700000000-part1",
        StoreError::Io("reset".to_string()),
    );
    let err = Analyzer::new(Arc::new(store), config(1_699_999_999, 1_700_000_001))
        .run()
        .await
        .unwrap_err();
    match err {
        AppError::Fetch(FetchError::Object { key, .. }) => assert_eq!(key, "1700000000-part1"),
        other => panic!("Expected fetch failure, got {}", other),
    }
}

#[tokio::test]
async fn test_runs_against_local_directory_store() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    std::fs::create_dir_all(root.join("daily")).unwrap();
    std::fs::create_dir_all(root.join("users")).unwrap();
    std::fs::create_dir_all(root.join("prices")).unwrap();
    std::fs::write(
        root.join("daily").join("1700000000-part0"),
        format!(
            "{}\n{},0xA,0xnew,3000000000000000000,0xhash,0,1,1700000000,0xrent\n",
            HEADER, TOKEN
        ),
    )
    .unwrap();
    std::fs::write(root.join("daily").join("README"), "not a log").unwrap();
    std::fs::write(
        root.join("users").join("per-user-join-time.json"),
        r#"{"0xnew":{"timestamp":"1700000000"}}"#,
    )
    .unwrap();
    std::fs::write(root.join("prices").join("sea-token-price-history.json"), price_doc()).unwrap();

    let mut vars = env(1_699_999_999, 1_700_000_001);
    vars.insert(
        "OBJECT_STORE_ROOT".to_string(),
        root.to_string_lossy().to_string(),
    );
    let config = Config::from_env_map(vars).unwrap();
    let store: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(&config.object_store_root));
    let report = Analyzer::new(store, config).run().await.unwrap();

    assert_eq!(report.object_count, 1);
    assert_eq!(report.user_roi_details.len(), 1);
    assert_eq!(report.user_roi_details[0].total_profit, 3.0);
    assert_eq!(report.overall_profitable_rate, Some(1.0));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["userRoiDetails"][0]["userAddress"], "0xnew");
    assert_eq!(json["window"]["from"], 1_699_999_999);
}
