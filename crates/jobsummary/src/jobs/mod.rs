pub mod mem;
pub mod model;
pub mod repo;
pub mod summary;

pub use mem::MemJobStore;
pub use model::{JobConfig, JobKey, JobKind, StoredJob};
pub use repo::JobsRepo;
pub use summary::{summarize, SummaryRow};
