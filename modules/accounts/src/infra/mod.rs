pub mod bearer;
pub mod mail;
pub mod storage;
