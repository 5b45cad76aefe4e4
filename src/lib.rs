pub mod cli;
pub mod info;
pub mod rpc;
pub mod types;

pub use cli::*;
pub use info::{execute, InfoArgs};
pub use rpc::*;
pub use types::*;
