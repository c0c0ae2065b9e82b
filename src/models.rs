pub mod file_metadata;
