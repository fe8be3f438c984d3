mod migrate;
mod serve;

pub use migrate::cmd_migrate;
pub use serve::cmd_serve;
