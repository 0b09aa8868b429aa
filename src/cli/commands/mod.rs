pub mod fields;
pub mod insert;
pub mod sheets;
