pub mod controls;
pub mod profile;
pub mod submission;
