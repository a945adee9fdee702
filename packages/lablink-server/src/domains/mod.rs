// Business domains
pub mod activity_log;
pub mod administration;
pub mod approval;
pub mod archive;
pub mod event;
pub mod finance;
pub mod member;
pub mod period;
pub mod project;
