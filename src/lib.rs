//! Workflow node for the Lumify search and research API.
//!
//! The node exposes two operations, `search` and `last30days`. For every
//! input item it resolves the configured parameters, builds one JSON request,
//! sends it with bearer authentication and passes the response through.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod loader;
pub mod operations;
pub mod runtime;
pub mod schema;

pub use client::{ApiRequest, HttpTransport, MockTransport, ReqwestTransport};
pub use config::{Config, DefaultPolicy, Endpoints};
pub use credentials::{CredentialType, LumifyCredentials};
pub use error::{NodeError, TransportError};
pub use operations::{LumifyNode, NodeType, Operation};
pub use runtime::{ExecutionContext, InputItem, NodeExecutor, NodeOutput, OutputItem};
pub use schema::{NodeDescription, ParameterResolver};
