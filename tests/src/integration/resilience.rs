//! # Resilience Tests
//!
//! Races, partial failures, rejections, and recovery paths driven
//! through the full orchestrator with the adapter fault toggles.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cachequest_core::{
        CreateTreasureRequest, FheSession, FixedGeolocation, HuntConfig, HuntDependencies,
        HuntError, InMemoryLedger, LedgerError, MockFheGateway, StaticWallet, TreasureHuntApi,
        TreasureHuntService,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct World {
        service: TreasureHuntService,
        ledger: Arc<InMemoryLedger>,
        gateway: Arc<MockFheGateway>,
    }

    fn world() -> World {
        let ledger = Arc::new(InMemoryLedger::new(1_700_000_000));
        let gateway = Arc::new(MockFheGateway::new());
        let wallet = Arc::new(StaticWallet::connected("0xA11CE"));
        let geolocation = Arc::new(FixedGeolocation::at(12.0, 34.0));

        let deps = HuntDependencies {
            wallet,
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
        }
    }

    fn request(name: &str, location: &str) -> CreateTreasureRequest {
        CreateTreasureRequest {
            name: name.to_string(),
            location_code: location.to_string(),
            hint: String::new(),
            reward: "10".to_string(),
        }
    }

    // =============================================================================
    // RESILIENCE TESTS
    // =============================================================================

    /// Two concurrent decryptions of the same record: exactly one wins
    /// the verification race, the loser resolves without error.
    #[tokio::test]
    async fn test_concurrent_decrypts_exactly_one_wins() {
        let w = world();
        let id = w.service.create_treasure(request("Cache", "42")).await.unwrap();

        let (a, b) = tokio::join!(
            w.service.decrypt_location(&id),
            w.service.decrypt_location(&id)
        );
        let mut outcomes = vec![a.unwrap(), b.unwrap()];
        outcomes.sort();
        assert_eq!(outcomes, vec![None, Some(42)]);

        let record = &w.service.treasures()[0];
        assert!(record.is_verified);
        assert_eq!(record.decrypted_value, Some(42));
    }

    /// One unreadable record is skipped, the rest of the reload lands.
    #[tokio::test]
    async fn test_partial_reload_keeps_readable_records() {
        let w = world();
        w.service.create_treasure(request("A", "1")).await.unwrap();
        let b = w.service.create_treasure(request("B", "2")).await.unwrap();
        w.service.create_treasure(request("C", "3")).await.unwrap();

        w.ledger.set_unreachable(&b, true);
        w.service.reload().await.unwrap();
        assert_eq!(w.service.treasures().len(), 2);

        // The record reappears once it becomes readable again.
        w.ledger.set_unreachable(&b, false);
        w.service.reload().await.unwrap();
        assert_eq!(w.service.treasures().len(), 3);
    }

    /// A verified record keeps its state and value across reloads.
    #[tokio::test]
    async fn test_verification_survives_reloads() {
        let w = world();
        let id = w.service.create_treasure(request("Cache", "777")).await.unwrap();
        w.service.decrypt_location(&id).await.unwrap();

        for _ in 0..3 {
            w.service.reload().await.unwrap();
            let record = &w.service.treasures()[0];
            assert!(record.is_verified);
            assert_eq!(record.decrypted_value, Some(777));
        }
    }

    /// A user-rejected verification leaves the record untouched.
    #[tokio::test]
    async fn test_user_rejected_verification_leaves_record_unverified() {
        let w = world();
        let id = w.service.create_treasure(request("Cache", "5")).await.unwrap();
        w.ledger.reject_next_write(LedgerError::UserRejected);

        let result = w.service.decrypt_location(&id).await;
        assert!(matches!(
            result,
            Err(HuntError::SubmissionRejected {
                user_initiated: true
            })
        ));
        assert_eq!(w.service.status().unwrap().message, "Transaction rejected");
        assert!(!w.service.treasures()[0].is_verified);

        // The rejection toggle is one-shot; the retry verifies.
        assert_eq!(w.service.decrypt_location(&id).await.unwrap(), Some(5));
    }

    /// An unavailable contract blocks creation without a partial write.
    #[tokio::test]
    async fn test_unavailable_ledger_blocks_create() {
        let w = world();
        w.ledger.set_available(false);

        let result = w.service.create_treasure(request("Cache", "1")).await;
        assert!(matches!(
            result,
            Err(HuntError::SubmissionRejected {
                user_initiated: false
            })
        ));
        assert!(w.service.treasures().is_empty());

        w.ledger.set_available(true);
        w.service.create_treasure(request("Cache", "1")).await.unwrap();
    }

    /// Initialization failure blocks mutating flows, yet reloads still
    /// work and a later retry recovers.
    #[tokio::test]
    async fn test_init_failure_blocks_mutations_not_reads() {
        let w = world();
        w.gateway.set_fail_init(true);

        let result = w.service.create_treasure(request("Cache", "1")).await;
        assert!(matches!(result, Err(HuntError::InitializationFailed(_))));
        w.service.reload().await.unwrap();

        w.gateway.set_fail_init(false);
        w.service.create_treasure(request("Cache", "1")).await.unwrap();
    }

    /// A second create while one is in flight is refused, and the guard
    /// releases once the first flow completes.
    #[tokio::test]
    async fn test_create_guard_refuses_overlap_then_releases() {
        let w = world();
        w.gateway.initialize().await.unwrap();

        let (first, second) = tokio::join!(
            w.service.create_treasure(request("First", "1")),
            w.service.create_treasure(request("Second", "2"))
        );
        first.unwrap();
        assert!(matches!(second, Err(HuntError::FlowInFlight("create"))));

        w.service.create_treasure(request("Third", "3")).await.unwrap();
        assert_eq!(w.service.treasures().len(), 2);
    }

    /// A failed listing reports an error and leaves the previous
    /// snapshot in place.
    #[tokio::test]
    async fn test_failed_listing_keeps_previous_snapshot() {
        let w = world();
        w.service.create_treasure(request("A", "1")).await.unwrap();

        w.ledger.set_fail_listing(true);
        let result = w.service.reload().await;
        assert!(matches!(result, Err(HuntError::LedgerUnavailable(_))));
        assert_eq!(
            w.service.status().unwrap().message,
            "Failed to load treasures"
        );
        assert_eq!(w.service.treasures().len(), 1);
    }
}
