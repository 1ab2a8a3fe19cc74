pub mod records;
pub mod txt;
