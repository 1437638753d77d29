//! Scoped environment overrides for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Guard that restores the overridden variables when dropped.
///
/// Guards serialize on a process-wide lock, so tests holding one never see
/// each other's overrides.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets or removes each variable for the guard lifetime.
    ///
    /// `None` removes the variable.
    pub fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = changes
            .iter()
            .map(|&(key, value)| {
                let old = env::var_os(key);
                set_or_remove(OsString::from(key), value.map(OsString::from));
                (OsString::from(key), old)
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }

    /// Removes every listed variable for the guard lifetime.
    pub fn cleared(keys: &[&str]) -> Self {
        let changes: Vec<(&str, Option<&str>)> = keys.iter().map(|key| (*key, None)).collect();
        Self::apply(&changes)
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            set_or_remove(key, value);
        }
    }
}

fn set_or_remove(key: OsString, value: Option<OsString>) {
    unsafe {
        // SAFETY: callers hold ENV_MUTEX, which serializes environment mutations in tests.
        match value {
            Some(value) => env::set_var(&key, value),
            None => env::remove_var(&key),
        }
    }
}
