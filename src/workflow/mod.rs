pub mod round_ctx;

pub use round_ctx::{contiguous_prefix, parse_result_round, RoundCtx};
