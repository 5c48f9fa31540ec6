pub mod input;
pub mod output;
pub mod report;
pub mod runner;
