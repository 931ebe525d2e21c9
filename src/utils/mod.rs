pub mod date;
pub mod formatting;
pub mod lock;
pub mod path;
pub mod table;
