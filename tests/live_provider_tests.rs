//! Live provider tests, run with `--features integration` and real API keys

#![cfg(feature = "integration")]

use pine_iris::{Config, LlmOrchestrator};

#[tokio::test]
#[ignore = "Run manually with provider credentials in .env"]
async fn test_live_analysis_round_trip() {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    let orchestrator = match LlmOrchestrator::new(&config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("Skipping live test: {e}");
            return;
        }
    };

    let script = pine_iris::resolve_template("strategy", "ma cross").expect("valid category");
    let analysis = orchestrator
        .analyze_strategy(script)
        .await
        .expect("live analysis should succeed");
    assert!(!analysis.parameters.identified.is_empty());
}
