//! # Status Timing Tests
//!
//! Auto-clear behavior of transaction status notifications, observed
//! through the full orchestrator under paused Tokio time.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use cachequest_core::{
        CreateTreasureRequest, FixedGeolocation, HuntConfig, HuntDependencies, InMemoryLedger,
        MockFheGateway, StaticWallet, StatusKind, TreasureHuntApi, TreasureHuntService,
    };

    fn service() -> (TreasureHuntService, Arc<StaticWallet>) {
        let gateway = Arc::new(MockFheGateway::new());
        let wallet = Arc::new(StaticWallet::connected("0xA11CE"));
        let deps = HuntDependencies {
            wallet: wallet.clone(),
            fhe: gateway.clone(),
            encryptor: gateway.clone(),
            oracle: gateway.clone(),
            ledger: Arc::new(InMemoryLedger::new(1_700_000_000)),
            geolocation: Arc::new(FixedGeolocation::at(0.0, 0.0)),
        };
        (
            TreasureHuntService::new(HuntConfig::default(), deps),
            wallet,
        )
    }

    fn request() -> CreateTreasureRequest {
        CreateTreasureRequest {
            name: "Cache".to_string(),
            location_code: "1".to_string(),
            hint: String::new(),
            reward: "1".to_string(),
        }
    }

    /// Success statuses stay visible for two seconds, then clear.
    #[tokio::test(start_paused = true)]
    async fn test_success_status_clears_after_two_seconds() {
        let (service, _wallet) = service();
        service.create_treasure(request()).await.unwrap();
        assert_eq!(service.status().unwrap().message, "Treasure created!");

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(service.status().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(service.status().is_none());
    }

    /// Error statuses stay visible for three seconds, then clear.
    #[tokio::test(start_paused = true)]
    async fn test_error_status_clears_after_three_seconds() {
        let (service, wallet) = service();
        wallet.disconnect();
        let _ = service.create_treasure(request()).await;
        assert_eq!(service.status().unwrap().kind, StatusKind::Error);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(service.status().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(service.status().is_none());
    }

    /// A new flow's status pre-empts the previous auto-clear timer.
    #[tokio::test(start_paused = true)]
    async fn test_new_flow_preempts_previous_clear_timer() {
        let (service, _wallet) = service();
        service.create_treasure(request()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        service.check_availability().await.unwrap();

        // The first timer fires at t=2000; the newer status must survive it.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(
            service.status().unwrap().message,
            "Contract is available"
        );

        // The second timer fires at t=3500.
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(service.status().is_none());
    }
}
