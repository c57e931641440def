pub mod pulls;
pub mod reviews;
pub mod stats;
pub mod teams;
pub mod users;
