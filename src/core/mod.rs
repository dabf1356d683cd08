pub mod assemble;
pub mod association;
pub mod config;
pub mod decode;
pub mod error;
pub mod expand;
pub mod pipeline;

pub use config::LaunchConfig;
pub use error::ExecError;
pub use pipeline::Invocation;
