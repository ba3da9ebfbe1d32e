pub mod grade;
pub mod init;
pub mod inspect;
pub mod plan;
