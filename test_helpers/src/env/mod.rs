//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation acquires a global re-entrant mutex and returns an RAII guard
//! that restores the previous state when dropped (removing the variable if it
//! was previously absent). Stacked guards for the same key restore in LIFO
//! order.
//!
//! Use [`scope`] or [`EnvScope::new_with`] when a test needs the lock for its
//! whole duration, for example while the loader enumerates the environment.
//!
//! # Examples
//!
//! ```
//! use envconfig_test_helpers::env;
//!
//! let _g = env::set_var("ENVCONFIG_DOC_KEY", "VALUE");
//! assert_eq!(std::env::var("ENVCONFIG_DOC_KEY").as_deref(), Ok("VALUE"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

fn mutate_locked<F>(key: String, mutator: F, _guard: &ReentrantMutexGuard<'static, ()>) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: serialised by ENV_MUTEX.
            Some(value) => unsafe { env_set_var(&self.key, &value) },
            // SAFETY: serialised by ENV_MUTEX.
            None => unsafe { env_remove_var(&self.key) },
        }
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

/// RAII guard that serialises environment access for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets an environment variable while holding the global lock.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        // SAFETY: serialised by the held ENV_MUTEX guard.
        mutate_locked(key.into(), |k| unsafe { env_set_var(k, value.as_ref()) }, &self.guard)
    }

    /// Removes an environment variable while holding the global lock.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        // SAFETY: serialised by the held ENV_MUTEX guard.
        mutate_locked(key.into(), |k| unsafe { env_remove_var(k) }, &self.guard)
    }
}

/// Holds the environment lock and a set of guards until dropped.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

impl EnvScope {
    /// Create a scope after running `builder` while holding the lock.
    ///
    /// # Examples
    /// ```
    /// use envconfig_test_helpers::env;
    ///
    /// let _scope = env::EnvScope::new_with(|lock| {
    ///     vec![lock.set_var("ENVCONFIG_DOC_A", "1"), lock.remove_var("ENVCONFIG_DOC_B")]
    /// });
    /// ```
    pub fn new_with<F>(builder: F) -> Self
    where
        F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
    {
        let lock = lock();
        let guards = builder(&lock);
        Self {
            guards,
            _lock: lock,
        }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore while the lock is still held.
        drop(std::mem::take(&mut self.guards));
    }
}

/// Acquires the global environment lock.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        guard: ENV_MUTEX.lock(),
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Sets every `(key, value)` pair and keeps the lock until the scope drops.
///
/// # Examples
/// ```
/// use envconfig_test_helpers::env;
///
/// let _scope = env::scope([("ENVCONFIG_DOC_PORT", "8080")]);
/// assert_eq!(std::env::var("ENVCONFIG_DOC_PORT").as_deref(), Ok("8080"));
/// ```
pub fn scope<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    EnvScope::new_with(|lock| {
        vars.into_iter()
            .map(|(key, value)| lock.set_var(key, value))
            .collect()
    })
}
