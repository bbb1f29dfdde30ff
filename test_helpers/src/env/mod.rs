//! Guards for mutating the process environment in tests.
//!
//! Every mutation takes a global re-entrant mutex and returns an RAII guard
//! that restores the previous value on drop. Tests that snapshot the
//! environment into an override set hold an [`EnvScope`] so no other test
//! mutates variables between setup and snapshot.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _scope = env::overrides([("dw.name", "Hale Coda"), ("dw.age", "44")]);
//! assert_eq!(std::env::var("dw.name").ok().as_deref(), Some("Hale Coda"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Applies `mutate` to `key` while `_held` proves the lock is taken.
fn mutate_locked<F>(key: String, mutate: F, _held: &ReentrantMutexGuard<'static, ()>) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutate(&key);
    EnvVarGuard { key, original }
}

fn set_locked(key: &str, value: &OsStr) {
    // SAFETY: callers hold `ENV_MUTEX`.
    unsafe { env::set_var(key, value) };
}

fn remove_locked(key: &str) {
    // SAFETY: callers hold `ENV_MUTEX`.
    unsafe { env::remove_var(key) };
}

/// Restores an environment variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _held = ENV_MUTEX.lock();
        match self.original.take() {
            Some(value) => set_locked(&self.key, &value),
            None => remove_locked(&self.key),
        }
    }
}

/// Holds the environment lock so several mutations happen atomically.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets `key` while the lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        mutate_locked(key.into(), |k| set_locked(k, value.as_ref()), &self.guard)
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var<K: Into<String>>(&self, key: K) -> EnvVarGuard {
        mutate_locked(key.into(), remove_locked, &self.guard)
    }
}

/// Keeps the environment lock for its lifetime and restores its guards,
/// still under the lock, when dropped.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

impl EnvScope {
    /// Takes the lock and runs `builder` to create the scoped guards.
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
        // Newest first, so a key set twice ends at its original value.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let _g = env::set_var("dw.server.port", "9000");
/// assert_eq!(std::env::var("dw.server.port").ok().as_deref(), Some("9000"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K: Into<String>>(key: K) -> EnvVarGuard {
    lock().remove_var(key)
}

/// Acquires the global environment lock.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        guard: ENV_MUTEX.lock(),
    }
}

/// Sets every `(key, value)` pair and keeps the lock until the scope drops.
pub fn overrides<I, K, V>(pairs: I) -> EnvScope
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    EnvScope::new_with(|lock| {
        pairs
            .into_iter()
            .map(|(key, value)| lock.set_var(key, value))
            .collect()
    })
}
