//! Output formatting for replies, stories and status

pub mod console;
pub mod formatter;
