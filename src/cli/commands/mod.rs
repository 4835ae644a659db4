mod check;
mod remove;
mod seed;

pub use check::cmd_check;
pub use remove::cmd_remove;
pub use seed::cmd_seed;
