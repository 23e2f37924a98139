use super::{
    AdditionalSlab, ColumnAdjustments, DisplayConfig, MbgRules, RevenueSlab, RulesConfig,
};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Where the rules document comes from (a static file in production, fixtures in tests).
pub trait RulesSource: Send + Sync {
    fn describe(&self) -> String;
    fn fetch(&self) -> impl Future<Output = Result<RulesConfig, RulesSourceError>> + Send;
}

/// Failure to obtain a usable rules document.
#[derive(Debug, thiserror::Error)]
pub enum RulesSourceError {
    #[error("failed to read rules from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed rules document from {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("rules source unavailable: {0}")]
    Unavailable(String),
}

/// Reads the rules JSON document from disk.
#[derive(Debug, Clone)]
pub struct FileRulesSource {
    path: PathBuf,
}

impl FileRulesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RulesSource for FileRulesSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<RulesConfig, RulesSourceError> {
        let payload = tokio::fs::read(&self.path)
            .await
            .map_err(|source| RulesSourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        RulesConfig::from_json(&payload).map_err(|source| RulesSourceError::Malformed {
            origin: self.describe(),
            source,
        })
    }
}

/// Serves an already-built configuration.
#[derive(Debug, Clone)]
pub struct StaticRulesSource {
    rules: RulesConfig,
}

impl StaticRulesSource {
    pub fn new(rules: RulesConfig) -> Self {
        Self { rules }
    }
}

impl RulesSource for StaticRulesSource {
    fn describe(&self) -> String {
        "static rules".to_string()
    }

    async fn fetch(&self) -> Result<RulesConfig, RulesSourceError> {
        Ok(self.rules.clone())
    }
}

/// Lazily loaded, process-wide rules snapshot.
///
/// The first `load` fetches from the source; callers arriving while that fetch is in flight
/// wait on the same initialisation, and every later call returns the cached snapshot. A failed
/// fetch caches the built-in configuration instead, so the store never hands out "no rules".
pub struct RulesStore<S> {
    source: S,
    loaded: OnceCell<Arc<RulesConfig>>,
    fallback: Arc<RulesConfig>,
}

impl<S> RulesStore<S>
where
    S: RulesSource,
{
    pub fn new(source: S) -> Self {
        Self::with_fallback(source, RulesConfig::builtin())
    }

    pub fn with_fallback(source: S, fallback: RulesConfig) -> Self {
        Self {
            source,
            loaded: OnceCell::new(),
            fallback: Arc::new(fallback),
        }
    }

    pub async fn load(&self) -> Arc<RulesConfig> {
        let rules = self
            .loaded
            .get_or_init(|| async {
                match self.source.fetch().await {
                    Ok(rules) => {
                        info!(
                            source = %self.source.describe(),
                            version = rules.version.as_deref().unwrap_or("unversioned"),
                            revenue_slabs = rules.revenue_incentive.slabs.len(),
                            additional_slabs = rules.additional_incentive.slabs.len(),
                            "performance rules loaded"
                        );
                        Arc::new(rules)
                    }
                    Err(err) => {
                        warn!(
                            source = %self.source.describe(),
                            error = %err,
                            "performance rules unavailable, using built-in defaults"
                        );
                        Arc::clone(&self.fallback)
                    }
                }
            })
            .await;
        Arc::clone(rules)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Cached snapshot, or the built-in configuration while `load` has not resolved.
    pub fn current(&self) -> Arc<RulesConfig> {
        self.loaded
            .get()
            .map(Arc::clone)
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }

    pub fn mbg(&self) -> &MbgRules {
        &self.snapshot().mbg
    }

    pub fn revenue_slabs(&self) -> &[RevenueSlab] {
        &self.snapshot().revenue_incentive.slabs
    }

    pub fn additional_slabs(&self) -> &[AdditionalSlab] {
        &self.snapshot().additional_incentive.slabs
    }

    pub fn columns(&self) -> &ColumnAdjustments {
        &self.snapshot().columns
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.snapshot().display
    }

    fn snapshot(&self) -> &RulesConfig {
        self.loaded.get().unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        fetches: AtomicUsize,
        rules: RulesConfig,
    }

    impl RulesSource for CountingSource {
        fn describe(&self) -> String {
            "counting".to_string()
        }

        async fn fetch(&self) -> Result<RulesConfig, RulesSourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
            Ok(self.rules.clone())
        }
    }

    struct FailingSource;

    impl RulesSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        async fn fetch(&self) -> Result<RulesConfig, RulesSourceError> {
            Err(RulesSourceError::Unavailable("connection refused".to_string()))
        }
    }

    fn custom_rules() -> RulesConfig {
        let mut rules = RulesConfig::builtin();
        rules.version = Some("custom".to_string());
        rules.mbg.full_mbg_amount = 900.0;
        rules
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let store = RulesStore::new(CountingSource {
            fetches: AtomicUsize::new(0),
            rules: custom_rules(),
        });

        let (a, b, c) = tokio::join!(store.load(), store.load(), store.load());
        let d = store.load().await;

        assert_eq!(store.source.fetches.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
        assert!(Arc::ptr_eq(&c, &d));
        assert_eq!(a.mbg.full_mbg_amount, 900.0);
    }

    #[tokio::test]
    async fn failed_fetch_falls_back_to_builtin() {
        let store = RulesStore::new(FailingSource);

        let rules = store.load().await;

        assert_eq!(*rules, RulesConfig::builtin());
        assert!(store.is_loaded());
        assert_eq!(store.mbg(), &MbgRules::default());
    }

    #[tokio::test]
    async fn accessors_return_builtin_sections_before_load() {
        let store = RulesStore::new(StaticRulesSource::new(custom_rules()));

        assert!(!store.is_loaded());
        assert_eq!(store.mbg().full_mbg_amount, 600.0);
        assert_eq!(store.current().version.as_deref(), Some("builtin"));

        store.load().await;

        assert_eq!(store.mbg().full_mbg_amount, 900.0);
        assert_eq!(store.revenue_slabs().len(), 3);
        assert_eq!(store.additional_slabs().len(), 3);
        assert_eq!(store.columns(), &ColumnAdjustments::default());
        assert_eq!(store.display().currency.placeholder, "-");
    }

    #[tokio::test]
    async fn missing_rules_file_falls_back() {
        let store = RulesStore::new(FileRulesSource::new("does/not/exist/rules.json"));

        let rules = store.load().await;

        assert_eq!(rules.version.as_deref(), Some("builtin"));
    }

    fn scratch_rules_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fleet-payout-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, contents).expect("scratch rules file written");
        path
    }

    #[tokio::test]
    async fn malformed_rules_file_falls_back() {
        let path = scratch_rules_file("malformed", r#"{"mbg": "oops"}"#);
        let source = FileRulesSource::new(&path);

        let err = source.fetch().await.expect_err("wrong-shaped document rejected");
        assert!(matches!(err, RulesSourceError::Malformed { .. }));

        let store = RulesStore::new(source);
        let rules = store.load().await;
        std::fs::remove_file(&path).ok();

        assert_eq!(rules.version.as_deref(), Some("builtin"));
        assert!(store.is_loaded());
        assert_eq!(*rules, RulesConfig::builtin());
    }

    #[tokio::test]
    async fn truncated_json_falls_back() {
        let path = scratch_rules_file("truncated", r#"{"mbg": {"full_mbg_amount": 700"#);
        let store = RulesStore::new(FileRulesSource::new(&path));

        let rules = store.load().await;
        std::fs::remove_file(&path).ok();

        assert_eq!(rules.version.as_deref(), Some("builtin"));
        assert_eq!(store.mbg().full_mbg_amount, 600.0);
    }
}
