pub mod analyze;
pub mod check_label;
pub mod forge;
pub mod init;
pub mod list;
