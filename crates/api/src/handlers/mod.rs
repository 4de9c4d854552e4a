pub mod auth;
pub mod dashboard;
pub mod i18n;
pub mod recommendation;
pub mod report;
