use crate::weather::provider::WeatherProvider;
use crate::weather::types::WeatherSnapshot;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

const DEFAULT_TTL_SECS: i64 = 600;

/// Short-lived per-city memoization in front of a provider, bounding the
/// request rate against the external service. Failed lookups are never
/// cached.
#[derive(Debug)]
pub struct CachedWeatherProvider<P> {
    inner: P,
    ttl: Duration,
    entries: tokio::sync::Mutex<HashMap<String, CachedReading>>,
}

#[derive(Debug, Clone)]
struct CachedReading {
    snapshot: WeatherSnapshot,
    fetched_at: DateTime<Utc>,
}

impl CachedReading {
    fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at >= ttl
    }
}

impl<P: WeatherProvider> CachedWeatherProvider<P> {
    /// TTL from WEATHER_CACHE_TTL_SECS, default 600 seconds.
    pub fn new(inner: P) -> Self {
        let ttl_secs = std::env::var("WEATHER_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TTL_SECS);
        Self::with_ttl(inner, Duration::seconds(ttl_secs))
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: tokio::sync::Mutex::new(HashMap::new()),
        }
    }
}

fn cache_key(city: &str) -> String {
    city.trim().to_lowercase()
}

#[async_trait::async_trait]
impl<P: WeatherProvider> WeatherProvider for CachedWeatherProvider<P> {
    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot> {
        let key = cache_key(city);
        let now = Utc::now();

        // The lock is held across the refresh so concurrent lookups for the
        // same city produce one upstream request.
        let mut entries = self.entries.lock().await;
        if let Some(cached) = entries.get(&key) {
            if !cached.is_stale(now, self.ttl) {
                tracing::debug!(%city, "serving cached weather reading");
                return Ok(cached.snapshot.clone());
            }
        }

        let snapshot = self.inner.fetch_current(city).await?;
        entries.insert(
            key,
            CachedReading {
                snapshot: snapshot.clone(),
                fetched_at: now,
            },
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn snapshot() -> WeatherSnapshot {
            WeatherSnapshot {
                temperature_c: 25.0,
                humidity_pct: 60.0,
                wind_speed_mps: 3.0,
                visibility_m: 1000,
                condition: "Clear".to_string(),
            }
        }
    }

    #[async_trait::async_trait]
    impl WeatherProvider for StubProvider {
        fn provider_name(&self) -> &'static str {
            "stub"
        }

        async fn fetch_current(&self, _city: &str) -> Result<WeatherSnapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Self::snapshot())
        }
    }

    #[test]
    fn staleness_is_reached_at_the_ttl() {
        let fetched_at = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let reading = CachedReading {
            snapshot: StubProvider::snapshot(),
            fetched_at,
        };
        let ttl = Duration::seconds(600);

        assert!(!reading.is_stale(fetched_at + Duration::seconds(599), ttl));
        assert!(reading.is_stale(fetched_at + Duration::seconds(600), ttl));
    }

    #[tokio::test]
    async fn fresh_entry_short_circuits_the_provider() {
        let cached = CachedWeatherProvider::with_ttl(StubProvider::new(), Duration::seconds(600));

        cached.fetch_current("Chennai").await.unwrap();
        cached.fetch_current("Chennai").await.unwrap();
        // Key normalization: same city, different spelling.
        cached.fetch_current("  chennai ").await.unwrap();

        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_cities_do_not_share_entries() {
        let cached = CachedWeatherProvider::with_ttl(StubProvider::new(), Duration::seconds(600));

        cached.fetch_current("Chennai").await.unwrap();
        cached.fetch_current("Mumbai").await.unwrap();

        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stale_entry_is_refetched() {
        let cached = CachedWeatherProvider::with_ttl(StubProvider::new(), Duration::seconds(0));

        cached.fetch_current("Chennai").await.unwrap();
        cached.fetch_current("Chennai").await.unwrap();

        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }
}
