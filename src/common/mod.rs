// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod assembler;
pub mod checksum;
pub mod decode;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From assembler.rs
pub use assembler::{AssemblerStats, FrameAssembler};

// From checksum.rs
pub use checksum::{compute as compute_checksum, seal as seal_checksum, verify as verify_checksum};

// From decode.rs
pub use decode::decode;

// From error.rs
pub use error::Ze15Error;

// From frame.rs
pub use frame::{Mode, RawFrame, FRAME_LEN, START_MARKER};

// From hal_traits.rs
pub use hal_traits::{Ze15Instant, Ze15Serial, Ze15Timer};

// From types.rs
pub use types::Concentration;

// --- Feature-gated re-exports ---

#[cfg(feature = "impl-native")]
pub use hal_traits::NativeInterface;
