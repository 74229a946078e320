pub mod admin;
pub mod color;
pub mod projects;
pub mod storage;
pub mod themes;
