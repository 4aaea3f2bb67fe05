pub mod extractor;
pub mod preflight;
pub mod result_writer;

pub use extractor::{extract_content, join_paragraphs};
pub use preflight::{DiskProbe, ResourcePreflight, SysinfoDiskProbe};
pub use result_writer::{encode_parquet, ResultWriter, CONTENT_TYPE};
