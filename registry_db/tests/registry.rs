//! Integration tests for the async registry front

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::collections::HashSet;
use std::time::Duration;

use registry_db::{LedgerError, Registry, RegistryConfig};

fn instant_registry() -> Registry {
    Registry::new(RegistryConfig::instant())
}

#[tokio::test]
async fn test_register_list_buy_scenario() {
    let registry = instant_registry();

    let record = registry.register("Plot 1", "1000 sq ft", "alice").await;
    assert_eq!(record.sequence_number, 1);
    assert_eq!(record.property_id, "PROP-1");
    assert!(!record.for_sale);

    let listed = registry
        .list_for_sale(&record.property_id, "50 ETH")
        .await
        .unwrap();
    assert!(listed.for_sale);
    assert_eq!(listed.price.as_deref(), Some("50 ETH"));

    let purchase = registry.buy(&record.property_id, "bob").await.unwrap();
    assert_eq!(purchase.record.owner, "bob");
    assert_eq!(purchase.record.transfer_history.len(), 1);
    assert_eq!(purchase.receipt.from, "alice");
    assert_eq!(purchase.receipt.to, "bob");
    assert_eq!(purchase.receipt.price, "50 ETH");
    assert_eq!(purchase.receipt.property_id, "PROP-1");

    let history = registry.history(&record.property_id).unwrap();
    assert_eq!(history.current_owner, "bob");
    assert_eq!(history.sequence_number, 1);
    assert_eq!(history.pseudo_hash, record.pseudo_hash);
    assert_eq!(history.created_at, record.created_at);
    assert_eq!(history.transfer_history, purchase.record.transfer_history);
}

#[tokio::test]
async fn test_sequence_numbers_increase() {
    let registry = instant_registry();

    for n in 1..=10 {
        registry
            .register(&format!("Plot {}", n), "1 acre", if n % 2 == 0 { "alice" } else { "bob" })
            .await;
    }

    let all = registry.list_all();
    assert_eq!(all.len(), 10);
    assert_eq!(registry.len(), 10);
    assert!(all.windows(2).all(|pair| pair[0].sequence_number < pair[1].sequence_number));

    let ids: HashSet<&str> = all.iter().map(|r| r.property_id.as_str()).collect();
    assert_eq!(ids.len(), all.len());

    assert!(registry.verify_chain().is_ok());
}

#[tokio::test]
async fn test_filters_are_subsets_of_list_all() {
    let registry = instant_registry();

    for (location, owner) in [("A", "alice"), ("B", "bob"), ("C", "alice"), ("D", "carol")] {
        registry.register(location, "1 acre", owner).await;
    }
    registry.list_for_sale("PROP-2", "5 ETH").await.unwrap();
    registry.list_for_sale("PROP-3", "7 ETH").await.unwrap();

    let all = registry.list_all();

    let by_owner: Vec<_> = all.iter().filter(|r| r.owner == "alice").cloned().collect();
    assert_eq!(registry.list_by_owner("alice"), by_owner);

    let for_sale: Vec<_> = all.iter().filter(|r| r.for_sale).cloned().collect();
    assert_eq!(registry.properties_for_sale(), for_sale);
    assert_eq!(for_sale.len(), 2);
    assert!(for_sale.iter().all(|r| r.price.is_some()));
}

#[tokio::test]
async fn test_failures_do_not_mutate() {
    let registry = instant_registry();
    registry.register("Plot 1", "1000 sq ft", "alice").await;
    let before = registry.list_all();

    assert_eq!(
        registry.buy("PROP-1", "bob").await.unwrap_err(),
        LedgerError::NotEligible("PROP-1".to_string())
    );
    assert_eq!(
        registry.buy("PROP-9", "bob").await.unwrap_err(),
        LedgerError::NotFound("PROP-9".to_string())
    );
    assert_eq!(
        registry.list_for_sale("PROP-9", "1 ETH").await.unwrap_err(),
        LedgerError::NotFound("PROP-9".to_string())
    );
    assert_eq!(
        registry.list_for_sale("PROP-1", "").await.unwrap_err(),
        LedgerError::EmptyPrice
    );

    assert_eq!(registry.list_all(), before);
    assert!(registry.history("PROP-9").is_none());
}

#[tokio::test]
async fn test_clones_share_ledger() {
    let registry = instant_registry();
    let other = registry.clone();

    registry.register("Plot 1", "1000 sq ft", "alice").await;

    assert_eq!(other.len(), 1);
    assert!(other.get("PROP-1").is_some());
    assert_eq!(other.config(), &RegistryConfig::instant());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_buyers_single_winner() {
    let registry = instant_registry();
    registry.register("Plot 1", "1000 sq ft", "alice").await;
    registry.list_for_sale("PROP-1", "50 ETH").await.unwrap();

    let mut handles = Vec::new();
    for buyer in ["bob", "carol", "dave", "erin"] {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move {
            registry.buy("PROP-1", buyer).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(e) => assert_eq!(e, LedgerError::NotEligible("PROP-1".to_string())),
        }
    }

    assert_eq!(winners, 1);
    let history = registry.history("PROP-1").unwrap();
    assert_eq!(history.transfer_history.len(), 1);
    assert_eq!(history.transfer_history[0].from, "alice");
}

#[tokio::test(start_paused = true)]
async fn test_mutations_wait_for_configured_delay() {
    let registry = Registry::new(RegistryConfig::default());

    let start = tokio::time::Instant::now();
    registry.register("Plot 1", "1000 sq ft", "alice").await;
    assert!(start.elapsed() >= Duration::from_millis(1000));

    let start = tokio::time::Instant::now();
    registry.list_for_sale("PROP-1", "50 ETH").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(1000));

    let start = tokio::time::Instant::now();
    registry.buy("PROP-1", "bob").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(1500));

    let start = tokio::time::Instant::now();
    let _ = registry.list_all();
    let _ = registry.history("PROP-1");
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn test_snapshots_serialize() {
    let registry = instant_registry();
    registry.register("Plot 1", "1000 sq ft", "alice").await;
    registry.list_for_sale("PROP-1", "50 ETH").await.unwrap();
    let purchase = registry.buy("PROP-1", "bob").await.unwrap();

    let json = serde_json::to_value(&purchase).unwrap();

    assert_eq!(json["record"]["owner"], "bob");
    assert_eq!(json["record"]["for_sale"], false);
    assert!(json["record"]["price"].is_null());
    assert_eq!(json["receipt"]["price"], "50 ETH");
    assert_eq!(json["record"]["transfer_history"][0]["from"], "alice");
}
