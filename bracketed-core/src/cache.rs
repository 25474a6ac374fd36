//! Fingerprint-keyed cache with at-most-one build per key.
//!
//! A key being built is marked in the map so concurrent callers wait for the
//! first builder instead of building again. Failed, cancelled or panicking
//! builds remove their marker, so the next caller retries from scratch.
//! `invalidate` starts a new generation; builds that began in an older
//! generation hand their value to their caller but do not store it.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use parking_lot::{Condvar, Mutex};
use thiserror::Error;
use tracing::debug;

use crate::{
    cancel::CancellationToken, config::RedactionConfig, descriptor::TypeDescriptor,
    metadata::RawType,
};

// Waiters wake up at least this often to observe cancellation.
const WAIT_SLICE: Duration = Duration::from_millis(25);

/// Structural cache key: the raw type shape plus the redaction config.
///
/// Built purely from values, so equal inputs produce equal fingerprints no
/// matter where they came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    shape: RawType,
    redaction: RedactionConfig,
}

impl Fingerprint {
    pub fn of(shape: &RawType, redaction: &RedactionConfig) -> Self {
        Self {
            shape: shape.clone(),
            redaction: redaction.clone(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.shape.qualified_name
    }
}

/// Why `get_or_build` returned no value.
#[derive(Debug, Error)]
pub enum CacheError<E> {
    #[error("build cancelled")]
    Cancelled,
    #[error("build failed: {0}")]
    Build(#[source] E),
}

/// Counters since the cache was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub builds: u64,
    pub failures: u64,
}

enum Slot<V> {
    Building,
    Ready(V),
}

enum Lookup<V> {
    Ready(V),
    Pending,
    Vacant,
}

struct State<V> {
    slots: HashMap<Fingerprint, Slot<V>>,
    generation: u64,
}

pub struct DescriptorCache<V = TypeDescriptor> {
    state: Mutex<State<V>>,
    changed: Condvar,
    hits: AtomicU64,
    builds: AtomicU64,
    failures: AtomicU64,
}

impl<V> Default for DescriptorCache<V> {
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                slots: HashMap::new(),
                generation: 0,
            }),
            changed: Condvar::new(),
            hits: AtomicU64::new(0),
            builds: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }
}

impl<V> std::fmt::Debug for DescriptorCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("generation", &self.generation())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl<V: Clone> DescriptorCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, building it with `build` if absent.
    ///
    /// Concurrent callers with an equal key wait for the first builder. A
    /// cancelled token makes waiting callers give up and makes a finished
    /// build skip the store.
    pub fn get_or_build<E, F>(
        &self,
        key: &Fingerprint,
        cancel: &CancellationToken,
        build: F,
    ) -> Result<V, CacheError<E>>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let mut state = self.state.lock();
        loop {
            if cancel.is_cancelled() {
                return Err(CacheError::Cancelled);
            }
            let lookup = match state.slots.get(key) {
                Some(Slot::Ready(value)) => Lookup::Ready(value.clone()),
                Some(Slot::Building) => Lookup::Pending,
                None => Lookup::Vacant,
            };
            match lookup {
                Lookup::Ready(value) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(type_name = key.type_name(), "descriptor cache hit");
                    return Ok(value);
                }
                Lookup::Pending => {
                    self.changed.wait_for(&mut state, WAIT_SLICE);
                }
                Lookup::Vacant => break,
            }
        }

        state.slots.insert(key.clone(), Slot::Building);
        let generation = state.generation;
        drop(state);

        debug!(type_name = key.type_name(), generation, "building descriptor");
        let mut guard = BuildGuard {
            cache: self,
            key,
            generation,
            armed: true,
        };
        let result = build();
        guard.armed = false;

        match result {
            Ok(_) if cancel.is_cancelled() => {
                self.finish(key, generation, None);
                Err(CacheError::Cancelled)
            }
            Ok(value) => {
                self.builds.fetch_add(1, Ordering::Relaxed);
                self.finish(key, generation, Some(value.clone()));
                Ok(value)
            }
            Err(err) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                debug!(type_name = key.type_name(), "descriptor build failed");
                self.finish(key, generation, None);
                Err(CacheError::Build(err))
            }
        }
    }

    /// Returns the cached value for `key` without building.
    pub fn get(&self, key: &Fingerprint) -> Option<V> {
        match self.state.lock().slots.get(key) {
            Some(Slot::Ready(value)) => Some(value.clone()),
            Some(Slot::Building) | None => None,
        }
    }
}

impl<V> DescriptorCache<V> {
    /// Drops every entry and starts a new generation.
    pub fn invalidate(&self) {
        let mut state = self.state.lock();
        state.slots.clear();
        state.generation += 1;
        debug!(generation = state.generation, "descriptor cache invalidated");
        drop(state);
        self.changed.notify_all();
    }

    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Number of ready entries.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Replaces this build's marker with `value`, or removes it.
    ///
    /// A build from an older generation leaves the map alone: its marker is
    /// already gone and the key may belong to a newer build.
    fn finish(&self, key: &Fingerprint, generation: u64, value: Option<V>) {
        let mut state = self.state.lock();
        if state.generation == generation {
            match value {
                Some(value) => {
                    state.slots.insert(key.clone(), Slot::Ready(value));
                }
                None => {
                    state.slots.remove(key);
                }
            }
        }
        drop(state);
        self.changed.notify_all();
    }
}

// Clears the building marker if `build` unwinds.
struct BuildGuard<'a, V> {
    cache: &'a DescriptorCache<V>,
    key: &'a Fingerprint,
    generation: u64,
    armed: bool,
}

impl<V> Drop for BuildGuard<'_, V> {
    fn drop(&mut self) {
        if self.armed {
            self.cache.finish(self.key, self.generation, None);
        }
    }
}
