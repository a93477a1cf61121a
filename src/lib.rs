pub mod cli;
pub mod error;
pub mod picker;
pub mod status;
