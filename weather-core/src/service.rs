use tracing::{debug, info, instrument};

use crate::{
    CacheStore, Config, WeatherError, WeatherReport, WeatherSnapshot,
    provider::{WeatherProvider, provider_from_config},
    snapshot::extract_record,
};

/// Decides between the cache and the network for each lookup.
///
/// Stateless across calls; everything persistent lives in the [`CacheStore`].
#[derive(Debug)]
pub struct WeatherService {
    provider: Box<dyn WeatherProvider>,
    cache: CacheStore,
}

impl WeatherService {
    pub fn new(provider: Box<dyn WeatherProvider>, cache: CacheStore) -> Self {
        Self { provider, cache }
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let provider = provider_from_config(config)?;
        Ok(Self::new(provider, CacheStore::new(config.cache_file.clone())))
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Current conditions for `location`, from cache when allowed and fresh.
    ///
    /// Errors come from the provider or from extraction and are returned
    /// unchanged; a corrupt cached entry surfaces as `MalformedData` rather
    /// than triggering a refetch.
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        location: Option<&str>,
        use_cache: bool,
        ttl_secs: u64,
    ) -> Result<WeatherReport, WeatherError> {
        let cached = if use_cache { self.cache.lookup(location, ttl_secs) } else { None };
        if let Some(snapshot) = cached {
            info!("serving weather from cache");
            return report(&snapshot, true);
        }

        let snapshot = self.provider.fetch(location).await?;
        debug!("fetched fresh weather");

        if use_cache {
            self.cache.store(location, &snapshot);
        }

        report(&snapshot, false)
    }
}

fn report(snapshot: &WeatherSnapshot, from_cache: bool) -> Result<WeatherReport, WeatherError> {
    Ok(WeatherReport { record: extract_record(snapshot)?, from_cache })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tempfile::TempDir;

    /// Provider returning a canned result and counting calls.
    #[derive(Debug)]
    struct StubProvider {
        calls: Arc<AtomicUsize>,
        result: fn() -> Result<WeatherSnapshot, WeatherError>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch(&self, _location: Option<&str>) -> Result<WeatherSnapshot, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn kyiv() -> Result<WeatherSnapshot, WeatherError> {
        Ok(WeatherSnapshot(json!({
            "current_condition": [{
                "temp_C": "5", "FeelsLikeC": "2", "weatherDesc": [{"value": "Overcast"}],
                "humidity": "87", "windspeedKmph": "14", "pressure": "1008"
            }],
            "nearest_area": [{"areaName": [{"value": "Kyiv"}]}]
        })))
    }

    fn service(
        dir: &TempDir,
        result: fn() -> Result<WeatherSnapshot, WeatherError>,
    ) -> (WeatherService, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider { calls: calls.clone(), result };
        let cache = CacheStore::new(dir.path().join("weather.json"));
        (WeatherService::new(Box::new(provider), cache), calls)
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let dir = TempDir::new().expect("tempdir");
        let (svc, calls) = service(&dir, kyiv);

        let first = svc.get(Some("Kyiv"), true, 300).await.expect("first");
        let second = svc.get(Some("kyiv "), true, 300).await.expect("second");

        assert!(!first.from_cache);
        assert!(second.from_cache);
        assert_eq!(first.record, second.record);
        assert_eq!(first.record.country, "");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cache_disabled_always_fetches_and_never_writes() {
        let dir = TempDir::new().expect("tempdir");
        let (svc, calls) = service(&dir, kyiv);

        svc.get(None, false, 300).await.expect("first");
        svc.get(None, false, 300).await.expect("second");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!svc.cache().path().exists());
    }

    #[tokio::test]
    async fn zero_ttl_bypasses_cached_entry() {
        let dir = TempDir::new().expect("tempdir");
        let (svc, calls) = service(&dir, kyiv);

        svc.get(Some("Kyiv"), true, 0).await.expect("first");
        let again = svc.get(Some("Kyiv"), true, 0).await.expect("second");

        assert!(!again.from_cache);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn provider_errors_pass_through_and_skip_cache() {
        let dir = TempDir::new().expect("tempdir");
        let (svc, _) = service(&dir, || Err(WeatherError::http_status(502)));

        let err = svc.get(Some("Kyiv"), true, 300).await.unwrap_err();
        assert!(matches!(err, WeatherError::Network { status: Some(502), .. }));
        assert!(!svc.cache().path().exists());
    }

    #[tokio::test]
    async fn corrupt_cached_numbers_are_malformed_not_refetched() {
        let dir = TempDir::new().expect("tempdir");
        let (svc, calls) = service(&dir, kyiv);

        let mut bad = kyiv().expect("snapshot").into_value();
        bad["current_condition"][0]["temp_C"] = json!("warm");
        svc.cache().store(Some("Kyiv"), &WeatherSnapshot(bad));

        let err = svc.get(Some("Kyiv"), true, 300).await.unwrap_err();
        assert!(matches!(err, WeatherError::MalformedData(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
