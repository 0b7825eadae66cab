pub mod list_loader;
pub mod table_io;

pub use list_loader::{load_list, parse_list};
pub use table_io::{parse_batch, parse_result_table, read_result_table, render_batch, write_batch};
