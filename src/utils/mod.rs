pub mod encryption;
pub mod errors;
pub mod money;
pub mod page;
pub mod table;
