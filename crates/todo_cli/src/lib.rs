pub mod cli;
pub mod display;
pub mod prompt;
