pub mod io;
pub mod schema;

pub use io::{list_result_files, load_results, parse_result_file, write_report};
pub use schema::{scalar_text, RawResult, RunIdentity, RunSlot, SchemaVersion};
