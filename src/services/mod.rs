pub mod aggregator;
pub mod batch_generator;
pub mod result_filter;
pub mod review_writer;
pub mod round_advancer;

pub use aggregator::Aggregator;
pub use batch_generator::{padding_needed, BatchGenerator};
pub use result_filter::{ResultFilter, RoundOutcome};
pub use review_writer::ReviewWriter;
pub use round_advancer::RoundAdvancer;
