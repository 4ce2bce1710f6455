/// "service list" command execution
pub mod list;
