use ledger_metrics::{config::Config, Analyzer, LocalObjectStore, ObjectStore};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    ledger_metrics::logging::init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        root = %config.object_store_root,
        from = config.window.from,
        to = config.window.to,
        "Starting ledger metrics run"
    );

    let store: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(&config.object_store_root));
    let analyzer = Analyzer::new(store, config);

    let report = match analyzer.run().await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Run failed: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to encode report: {}", e);
            std::process::exit(1);
        }
    }
}
