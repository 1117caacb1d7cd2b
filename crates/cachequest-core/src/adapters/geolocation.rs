//! # Fixed Geolocation
//!
//! Geolocation provider stand-in answering with a fixed position or a
//! permission error.

use crate::domain::{GeoPoint, HuntError};
use crate::ports::outbound::GeolocationProvider;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Geolocation provider returning a configured position.
pub struct FixedGeolocation {
    position: RwLock<Option<GeoPoint>>,
}

impl FixedGeolocation {
    /// Provider that answers with the given position.
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            position: RwLock::new(Some(GeoPoint::new(lat, lng))),
        }
    }

    /// Provider that denies every position request.
    pub fn denied() -> Self {
        Self {
            position: RwLock::new(None),
        }
    }

    /// Change the answered position.
    pub fn set_position(&self, position: Option<GeoPoint>) {
        *self.position.write() = position;
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<GeoPoint, HuntError> {
        // Permission-prompt suspension point.
        tokio::task::yield_now().await;

        self.position
            .read()
            .ok_or_else(|| HuntError::LocationUnavailable("location permission denied".to_string()))
    }
}
