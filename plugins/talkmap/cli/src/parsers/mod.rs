pub mod conversation;
pub mod records;

pub use conversation::{extract_labels, extract_sequence, extract_sequences};
pub use records::{list_record_files, load_inputs, load_record_file, LoadedRecords};
