mod info;
mod update;
mod verify;

pub use info::cmd_info;
pub use update::cmd_update;
pub use verify::cmd_verify;
