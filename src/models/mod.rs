pub mod entry;
pub mod invoice;
pub mod month_summary;
pub mod status;
