pub mod concatenator;
pub mod pattern;
pub mod report;
