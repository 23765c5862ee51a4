pub mod config;
pub mod replay;
pub mod script;

pub use config::CliConfig;
pub use replay::{replay, write_transcript, ReplayReport};
pub use script::{Script, ScriptStep};
