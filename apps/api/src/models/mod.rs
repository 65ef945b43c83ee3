pub mod interview;
pub mod profile;
pub mod user;
