pub mod summary;

pub use summary::SummaryFormat;
