use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::client::HttpTransport;
use crate::credentials::{CREDENTIAL_NAME, LumifyCredentials};
use crate::error::NodeError;
use crate::operations::NodeType;
use crate::runtime::context::ExecutionContext;
use crate::runtime::item::{NodeOutput, OutputItem};
use crate::schema::ParameterResolver;

/// Runs a node over a batch of items, one HTTP call per item, strictly in order.
pub struct NodeExecutor {
    node: Arc<dyn NodeType>,
    transport: Arc<dyn HttpTransport>,
    resolver: ParameterResolver,
}

impl NodeExecutor {
    pub fn new(node: Arc<dyn NodeType>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            node,
            transport,
            resolver: ParameterResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: ParameterResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Execute the node for every input item.
    ///
    /// With `continue_on_fail` an item error becomes an `{error}` record and
    /// the loop goes on; otherwise the first error aborts the run and nothing
    /// already collected is returned.
    pub async fn execute(&self, ctx: &ExecutionContext) -> Result<NodeOutput, NodeError> {
        let description = self.node.description();
        let operation = self.resolver.operation(description, ctx);
        let credentials = ctx
            .credentials
            .as_ref()
            .ok_or_else(|| NodeError::MissingCredentials(CREDENTIAL_NAME.to_string()))?;

        info!(
            execution_id = %ctx.execution_id,
            node = %description.name,
            operation = %operation,
            items = ctx.items.len(),
            "Executing node"
        );

        let mut results = Vec::with_capacity(ctx.items.len());
        for item_index in 0..ctx.items.len() {
            match self.execute_item(ctx, &operation, item_index, credentials).await {
                Ok(json) => results.push(OutputItem::new(json, item_index)),
                Err(e) if ctx.continue_on_fail => {
                    warn!(execution_id = %ctx.execution_id, item_index, error = %e, "Item failed, continuing");
                    results.push(OutputItem::error(e.to_string(), item_index));
                }
                Err(e) => {
                    error!(execution_id = %ctx.execution_id, item_index, error = %e, "Item failed, aborting execution");
                    return Err(e);
                }
            }
        }

        info!(execution_id = %ctx.execution_id, outputs = results.len(), "Node finished");
        Ok(vec![results])
    }

    async fn execute_item(
        &self,
        ctx: &ExecutionContext,
        operation: &str,
        item_index: usize,
        credentials: &LumifyCredentials,
    ) -> Result<Value, NodeError> {
        self.node.check_preconditions(operation, item_index, credentials)?;

        // 1. Resolve parameters
        let params = self.resolver.resolve(self.node.description(), ctx, operation, item_index)?;

        // 2. Build request
        let request = self.node.build_request(operation, item_index, &params, credentials)?;
        debug!(execution_id = %ctx.execution_id, item_index, url = %request.url, "Sending request");

        // 3. Call the API
        self.transport
            .send(&request, credentials)
            .await
            .map_err(|source| NodeError::Request { item_index, source })
    }
}
