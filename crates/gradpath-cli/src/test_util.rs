use std::sync::{Mutex, MutexGuard};

// Tests that touch process environment variables must not interleave.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
