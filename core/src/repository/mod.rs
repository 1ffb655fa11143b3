pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileVisitRecordRepository;
pub use memory::InMemoryVisitRecordRepository;
pub use traits::VisitRecordRepository;
