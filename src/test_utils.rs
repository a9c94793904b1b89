use std::env::{self, VarError};
use std::panic::{self, RefUnwindSafe, UnwindSafe};
use std::sync::Mutex;

use lazy_static::lazy_static;

lazy_static! {
    static ref SERIAL_TEST: Mutex<()> = Default::default();
}

/// Sets environment variables to the given values (`None` unsets) for the
/// duration of the closure. Tests using it run one at a time, and the
/// previous values are restored even if the closure panics.
pub fn with_env_vars<F>(kvs: Vec<(&str, Option<&str>)>, closure: F)
where
    F: Fn() + UnwindSafe + RefUnwindSafe,
{
    let guard = SERIAL_TEST.lock().unwrap_or_else(|e| e.into_inner());
    let mut old_kvs: Vec<(&str, Result<String, VarError>)> = Vec::new();
    for (k, v) in kvs {
        old_kvs.push((k, env::var(k)));
        match v {
            None => env::remove_var(k),
            Some(v) => env::set_var(k, v),
        }
    }

    let result = panic::catch_unwind(|| {
        closure();
    });

    for (k, v) in old_kvs {
        reset_env(k, v);
    }
    drop(guard);

    if let Err(err) = result {
        panic::resume_unwind(err);
    }
}

fn reset_env(k: &str, old: Result<String, VarError>) {
    match old {
        Ok(v) => env::set_var(k, v),
        Err(_) => env::remove_var(k),
    }
}
