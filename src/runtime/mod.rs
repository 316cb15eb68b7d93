pub mod context;
pub mod executor;
pub mod item;

pub use context::ExecutionContext;
pub use executor::NodeExecutor;
pub use item::{InputItem, NodeOutput, OutputItem, PairedItem};
