pub mod format;
pub mod hex;
pub mod table;
