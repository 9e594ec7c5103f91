mod error;
pub use error::ApiError;

mod handler;
pub use handler::CommandHandler;

mod adapter;
pub use adapter::EngineAdapter;

mod command;
pub use command::{Dispatched, RUN_COMMAND, RunArg, SELECT_COMMAND, dispatch};
