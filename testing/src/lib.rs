#[cfg(feature = "chrono")]
pub mod chrono;
#[cfg(feature = "core")]
pub mod core;
