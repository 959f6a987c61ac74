pub mod storage;
pub mod identity;
pub mod routing;
pub mod models;
pub mod stats;
pub mod api;
pub mod config;
pub mod error;
pub mod cli;

// Test-only printing helper: expands to eprintln! during tests/debug builds and is silent otherwise.
// Usage in tests: tprintln!("debug: {}", value);
#[cfg(any(test, debug_assertions))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ( eprintln!($($arg)*) );
}

// In release builds, provide a no-op tprintln! so calls compile without effect.
#[cfg(not(any(test, debug_assertions)))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ({
        // Preserve formatting checks in release without producing code
        if false { let _ = format!($($arg)*); }
    });
}
