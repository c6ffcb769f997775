// Repository module structure
pub mod errors;
mod in_memory;
mod readings;
mod storage;
mod targets;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use readings::{HealthDataRepository, HealthDataRepositoryTrait};
pub use targets::{GlucoseTargetRepository, GlucoseTargetRepositoryTrait};

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use readings::tests as reading_mocks;
#[cfg(any(test, feature = "mock"))]
pub use targets::tests as target_mocks;
