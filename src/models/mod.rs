pub mod answer;
pub mod batch;
pub mod label;
pub mod loaders;
pub mod result_table;
pub mod tally;

pub use answer::Answer;
pub use batch::{Batch, Hit, HitLayout};
pub use label::{FinalLabel, LabelCounts, LabelEntry, LabelReport};
pub use loaders::{load_list, read_result_table, write_batch};
pub use result_table::{ResultRow, ResultTable};
pub use tally::{TallyStore, VoteTally};
