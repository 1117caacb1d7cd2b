//! # Integration Test Flows
//!
//! Happy-path lifecycles driven through the full orchestrator: create,
//! reload, decrypt, distance, availability, history, and stats, all
//! over the in-memory adapters.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use cachequest_core::{
        CreateTreasureRequest, FixedGeolocation, HuntConfig, HuntDependencies, InMemoryLedger,
        MockFheGateway, StaticWallet, TreasureHuntApi, TreasureHuntService,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct World {
        service: TreasureHuntService,
        ledger: Arc<InMemoryLedger>,
        gateway: Arc<MockFheGateway>,
        wallet: Arc<StaticWallet>,
    }

    fn wall_now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    /// Orchestrator over in-memory adapters, ledger clock at `now_secs`.
    fn world_at(now_secs: u64) -> World {
        let ledger = Arc::new(InMemoryLedger::new(now_secs));
        let gateway = Arc::new(MockFheGateway::new());
        let wallet = Arc::new(StaticWallet::connected("0xA11CE"));
        let geolocation = Arc::new(FixedGeolocation::at(12.0, 34.0));

        let deps = HuntDependencies {
            wallet: wallet.clone(),
            fhe: gateway.clone(),
            encryptor: gateway.clone(),
            oracle: gateway.clone(),
            ledger: ledger.clone(),
            geolocation,
        };

        World {
            service: TreasureHuntService::new(HuntConfig::for_testing(), deps),
            ledger,
            gateway,
            wallet,
        }
    }

    fn world() -> World {
        world_at(wall_now_secs())
    }

    fn request(name: &str, location: &str) -> CreateTreasureRequest {
        CreateTreasureRequest {
            name: name.to_string(),
            location_code: location.to_string(),
            hint: "Under the old oak".to_string(),
            reward: "50".to_string(),
        }
    }

    // =============================================================================
    // INTEGRATION TESTS: FULL LIFECYCLE
    // =============================================================================

    /// Create, decrypt, and measure distance to one treasure end to end.
    #[tokio::test]
    async fn test_full_lifecycle_create_decrypt_distance() {
        let w = world();

        let id = w
            .service
            .create_treasure(request("Old Oak", "120034"))
            .await
            .unwrap();

        let listed = w.service.treasures();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Old Oak");
        assert_eq!(listed[0].reward, 50);
        assert!(!listed[0].is_verified);
        assert_eq!(listed[0].decrypted_value, None);

        w.service.open_detail(&id).unwrap();
        let value = w.service.decrypt_location(&id).await.unwrap();
        assert_eq!(value, Some(120034));
        assert_eq!(w.service.locally_decrypted(), Some(120034));

        let record = &w.service.treasures()[0];
        assert!(record.is_verified);
        assert_eq!(record.decrypted_value, Some(120034));

        // 120034 decodes to (12, 34), exactly the fixture position.
        w.service.acquire_location().await.unwrap();
        let distance = w.service.distance_to_treasure(120034).unwrap();
        assert_eq!(format!("{distance:.2}"), "0.00");
    }

    /// Records come back in creation order after every reload.
    #[tokio::test]
    async fn test_records_listed_in_creation_order() {
        let w = world();
        let a = w.service.create_treasure(request("A", "1")).await.unwrap();
        let b = w.service.create_treasure(request("B", "2")).await.unwrap();
        let c = w.service.create_treasure(request("C", "3")).await.unwrap();

        w.service.reload().await.unwrap();
        let ids: Vec<_> = w.service.treasures().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    /// A second decryption of the same record is served from the ledger
    /// without another oracle round-trip.
    #[tokio::test]
    async fn test_second_decrypt_skips_oracle() {
        let w = world();
        let id = w
            .service
            .create_treasure(request("Cache", "54321"))
            .await
            .unwrap();

        assert_eq!(w.service.decrypt_location(&id).await.unwrap(), Some(54321));
        let oracle_calls = w.gateway.decrypt_calls();

        assert_eq!(w.service.decrypt_location(&id).await.unwrap(), Some(54321));
        assert_eq!(w.gateway.decrypt_calls(), oracle_calls);
    }

    /// Dashboard stats distinguish verified and recent records.
    #[tokio::test]
    async fn test_stats_track_verified_and_recent() {
        let w = world();
        let id = w.service.create_treasure(request("A", "1")).await.unwrap();
        w.service.create_treasure(request("B", "2")).await.unwrap();
        w.service.decrypt_location(&id).await.unwrap();

        let stats = w.service.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.verified, 1);
        // Both were created at the ledger clock, which is wall-now.
        assert_eq!(stats.recent, 2);
    }

    /// Records older than the recent window drop out of the count.
    #[tokio::test]
    async fn test_stats_recent_window_excludes_old_records() {
        // for_testing() uses a one-hour recent window.
        let w = world_at(wall_now_secs() - 2 * 3_600);
        w.service.create_treasure(request("Stale", "1")).await.unwrap();

        let stats = w.service.stats();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.recent, 0);
    }

    /// Availability check reports and records activity.
    #[tokio::test]
    async fn test_check_availability_flow() {
        let w = world();
        assert!(w.service.check_availability().await.unwrap());
        assert_eq!(
            w.service.status().unwrap().message,
            "Contract is available"
        );
        assert_eq!(w.service.history()[0], "Checked contract availability");
    }

    /// Activity history accumulates across flows, newest first.
    #[tokio::test]
    async fn test_history_accumulates_newest_first() {
        let w = world();
        let id = w
            .service
            .create_treasure(request("Old Oak", "120034"))
            .await
            .unwrap();
        w.service.decrypt_location(&id).await.unwrap();
        w.service.acquire_location().await.unwrap();
        w.service.distance_to_treasure(120034).unwrap();

        let history = w.service.history();
        assert!(history[0].starts_with("Calculated distance to treasure:"));
        assert_eq!(history[1], "Fetched current location");
        assert_eq!(history[2], format!("Decrypted treasure: {id}"));
        assert_eq!(history[3], "Created treasure: Old Oak");
    }

    /// Disconnecting the wallet blocks the mutating flows; reload
    /// quietly no-ops and keeps the last snapshot.
    #[tokio::test]
    async fn test_disconnected_wallet_blocks_mutating_flows() {
        let w = world();
        w.service.create_treasure(request("A", "1")).await.unwrap();
        w.wallet.disconnect();

        assert!(w.service.create_treasure(request("B", "2")).await.is_err());
        assert!(w.service.decrypt_location("treasure-1").await.is_err());

        w.service.reload().await.unwrap();
        assert_eq!(w.service.treasures().len(), 1);
    }
}
