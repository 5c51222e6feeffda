//! Probe registry.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::probe::Probe;

use super::HealthStatus;

/// Error type for registry construction.
#[derive(Debug)]
pub enum RegistryError {
    /// A probe with the same name is already registered.
    DuplicateName { name: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName { name } => {
                write!(f, "probe '{}' is already registered", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// One registered probe with its policy.
///
/// Immutable once registered. `failure_status` is the severity to report
/// when the probe cannot be evaluated (timeout, error, panic); it does not
/// constrain what the probe itself may return.
#[derive(Clone)]
pub struct ProbeDefinition {
    name: String,
    tags: BTreeSet<String>,
    failure_status: HealthStatus,
    timeout: Option<Duration>,
    probe: Arc<dyn Probe>,
}

impl ProbeDefinition {
    /// Definition with defaults: no tags, failure status Unhealthy, no timeout.
    pub fn new(name: impl Into<String>, probe: Arc<dyn Probe>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeSet::new(),
            failure_status: HealthStatus::Unhealthy,
            timeout: None,
            probe,
        }
    }

    /// Tag the definition for endpoint predicates.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the severity to report when this probe cannot be evaluated.
    pub fn with_failure_status(mut self, status: HealthStatus) -> Self {
        self.failure_status = status;
        self
    }

    /// Bound each invocation of this probe.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn failure_status(&self) -> HealthStatus {
        self.failure_status
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn probe(&self) -> &Arc<dyn Probe> {
        &self.probe
    }
}

impl fmt::Debug for ProbeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeDefinition")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("failure_status", &self.failure_status)
            .field("timeout", &self.timeout)
            .field("probe", &self.probe.kind())
            .finish()
    }
}

/// Ordered collection of probe definitions.
///
/// Built once during startup, then shared read-only behind an `Arc`;
/// request handling never mutates it, so no locking is involved.
#[derive(Default)]
pub struct Registry {
    definitions: Vec<ProbeDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe definition.
    ///
    /// Names are unique across the registry; a duplicate is a programming
    /// error surfaced at startup.
    pub fn register(&mut self, definition: ProbeDefinition) -> Result<(), RegistryError> {
        if self.definitions.iter().any(|d| d.name == definition.name) {
            return Err(RegistryError::DuplicateName {
                name: definition.name,
            });
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Select definitions whose tag set satisfies the predicate,
    /// in registration order.
    pub fn select<P>(&self, predicate: P) -> Vec<&ProbeDefinition>
    where
        P: Fn(&BTreeSet<String>) -> bool,
    {
        self.definitions
            .iter()
            .filter(|d| predicate(&d.tags))
            .collect()
    }

    /// All definitions in registration order.
    pub fn all(&self) -> &[ProbeDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
