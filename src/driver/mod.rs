// src/driver/mod.rs

pub mod config;
pub mod mode;
pub mod sync_driver;
pub mod warmup;

pub use config::Config;
pub use mode::ModeController;
pub use sync_driver::Ze15;
pub use warmup::WarmupGate;
