pub mod consumption;
pub mod report;
pub mod timeline;
