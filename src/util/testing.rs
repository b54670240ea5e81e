// src/util/testing.rs

use anyhow::Result;
use std::cell::Cell;
use std::collections::HashMap;
use std::env;
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{Clock, KeyValueStore};
use crate::domain::{DomainError, Timestamp};

/// In-memory key-value store for tests of the notebook and snapshot code
///
/// Counts checkpoint writes and can be configured to fail reads or writes.
///
/// # Examples
///
/// ```
/// use notekeep::util::testing::MockKeyValueStore;
/// use notekeep::application::KeyValueStore;
///
/// let store = MockKeyValueStore::builder()
///     .with_value("tags", r#"["work"]"#)
///     .build();
/// assert_eq!(store.get("tags").unwrap().as_deref(), Some(r#"["work"]"#));
/// ```
#[derive(Debug, Default)]
pub struct MockKeyValueStore {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MockKeyValueStore {
    pub fn builder() -> MockKeyValueStoreBuilder {
        MockKeyValueStoreBuilder::new()
    }

    /// Number of successful `set`/`set_many` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MockKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if self.fail_reads {
            return Err(DomainError::Storage("read failure".to_string()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        self.set_many(&[(key, value.to_string())])
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::Storage("write failure".to_string()));
        }
        for (key, value) in entries {
            self.values.insert(key.to_string(), value.clone());
        }
        self.writes += 1;
        Ok(())
    }
}

/// Builder for MockKeyValueStore
pub struct MockKeyValueStoreBuilder {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MockKeyValueStoreBuilder {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Pre-populate a key with a raw (possibly malformed) snapshot
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn build(self) -> MockKeyValueStore {
        MockKeyValueStore {
            values: self.values,
            fail_reads: self.fail_reads,
            fail_writes: self.fail_writes,
            writes: 0,
        }
    }
}

impl Default for MockKeyValueStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock under test control. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance(&self, millis: Timestamp) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

pub fn init_test_setup() -> Result<()> {
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["rusqlite"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_failing_writes_when_setting_then_returns_error_and_counts_nothing() {
        let mut store = MockKeyValueStore::builder().with_failing_writes().build();

        let result = store.set("notes", "[]");

        assert!(matches!(result, Err(DomainError::Storage(_))));
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get("notes").unwrap(), None);
    }

    #[test]
    fn given_batch_when_setting_many_then_counts_one_write() {
        let mut store = MockKeyValueStore::builder().build();

        store
            .set_many(&[("a", "1".to_string()), ("b", "2".to_string())])
            .unwrap();

        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn given_cloned_clock_when_advancing_then_both_see_new_time() {
        let clock = ManualClock::starting_at(100);
        let other = clock.clone();

        clock.advance(50);

        assert_eq!(other.now(), 150);
    }
}
