mod csv_reader;
mod file_finder;
mod parquet_writer;

// Re-export public API
pub use csv_reader::{parse_csv_bytes, read_csv};
pub use file_finder::find_files_with_extension;
pub use parquet_writer::write_parquet;
