//! Tool catalog and dispatch.
//!
//! Every tool is a named capability with a JSON-schema parameter description
//! and an async handler from parsed arguments to a [`ToolReply`]. Handlers
//! never error: any internal failure is folded into a `success: false` reply
//! so the remote model can react to it in-conversation.

mod market;
mod platforms;
mod strategy;

pub use market::{GoldPriceTool, MetalPriceApi, PriceFeedError, SpotPrice, SpotPriceSource};

use crate::types::ToolDefinition;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Uniform handler result. `data` is whatever JSON the tool produced and is
/// relayed to the model untouched.
#[derive(Debug, Clone, Serialize)]
pub struct ToolReply {
    pub success: bool,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ToolReply {
    pub fn ok(data: Value, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            message: Some(message.into()),
        }
    }

    /// Wire form submitted back to the remote service.
    pub fn to_wire(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"message":"tool reply could not be serialised"}"#.to_string()
        })
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool requested: {0}")]
    UnknownTool(String),
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    async fn call(&self, arguments: Value) -> ToolReply;
}

/// Immutable name-keyed dispatch table, built once at startup.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        let index = tools
            .iter()
            .map(|tool| (tool.definition().name.to_lowercase(), Arc::clone(tool)))
            .collect();
        Self { tools, index }
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(&name.to_lowercase())
    }

    /// Declaration order is preserved so the assistant always sees the same
    /// catalog shape.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| tool.definition().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch by name with the raw wire argument payload. An unknown name
    /// fails fast; a malformed payload becomes a failure reply so the run can
    /// still progress.
    pub async fn invoke(&self, name: &str, raw_arguments: &str) -> Result<ToolReply, ToolError> {
        let Some(tool) = self.lookup(name) else {
            warn!(requested_tool = %name, "Unknown tool requested");
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        let trimmed = raw_arguments.trim();
        let arguments = if trimmed.is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => value,
                Err(source) => {
                    warn!(tool = %name, %source, "Tool arguments were not valid JSON");
                    return Ok(ToolReply::failure(format!(
                        "tool arguments were not valid JSON: {source}"
                    )));
                }
            }
        };

        let reply = tool.call(arguments).await;
        info!(tool = %name, success = reply.success, "Tool executed");
        Ok(reply)
    }
}

/// The full SwarnaMitra catalog. The price feed is injected so the market
/// tool can be exercised without network access.
pub fn standard_catalog(price_source: Arc<dyn SpotPriceSource>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(GoldPriceTool::new(price_source)),
        Arc::new(platforms::RecommendJewellersTool::new()),
        Arc::new(platforms::LocateLocalJewellersTool::new()),
        Arc::new(platforms::GoldSchemesTool::new()),
        Arc::new(platforms::GoldLoanComparisonTool::new()),
        Arc::new(platforms::HallmarkCheckTool::new()),
        Arc::new(platforms::BankGoldOptionsTool::new()),
        Arc::new(platforms::FeeCalculatorTool::new()),
        Arc::new(strategy::InvestmentPlanTool::new()),
        Arc::new(strategy::PortfolioAllocationTool::new()),
        Arc::new(strategy::RiskAssessmentTool::new()),
        Arc::new(strategy::TaxImplicationsTool::new()),
        Arc::new(strategy::SipPlanningTool::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool {
        definition: ToolDefinition,
    }

    impl EchoTool {
        fn new() -> Self {
            Self {
                definition: ToolDefinition {
                    name: "echo".into(),
                    description: "Echo the arguments back".into(),
                    parameters: json!({ "type": "object", "properties": {} }),
                },
            }
        }
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn call(&self, arguments: Value) -> ToolReply {
            ToolReply::ok(arguments, "echoed")
        }
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::new(vec![Arc::new(EchoTool::new())])
    }

    #[tokio::test]
    async fn unknown_tool_fails_fast() {
        let registry = registry();
        let error = registry
            .invoke("does_not_exist", "{}")
            .await
            .expect_err("unknown tool");
        assert!(matches!(error, ToolError::UnknownTool(name) if name == "does_not_exist"));
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let registry = registry();
        assert!(registry.lookup("ECHO").is_some());
        assert!(registry.lookup("missing").is_none());
    }

    #[tokio::test]
    async fn malformed_arguments_become_failure_reply() {
        let registry = registry();
        let reply = registry
            .invoke("echo", "{not json")
            .await
            .expect("registered tool");
        assert!(!reply.success);
        assert!(reply.message.expect("message").contains("not valid JSON"));
    }

    #[tokio::test]
    async fn empty_arguments_default_to_object() {
        let registry = registry();
        let reply = registry.invoke("echo", "").await.expect("registered tool");
        assert!(reply.success);
        assert_eq!(reply.data, json!({}));
    }

    #[tokio::test]
    async fn reply_passes_through_untouched() {
        let registry = registry();
        let reply = registry
            .invoke("echo", r#"{"k":1}"#)
            .await
            .expect("registered tool");
        assert!(reply.success);
        assert_eq!(reply.data, json!({ "k": 1 }));
        let wire: Value = serde_json::from_str(&reply.to_wire()).expect("wire json");
        assert_eq!(wire["data"]["k"], 1);
    }

    #[test]
    fn standard_catalog_has_unique_names() {
        let catalog = standard_catalog(Arc::new(market::tests_support::FixedPriceSource::new(
            7_000.0,
        )));
        let registry = ToolRegistry::new(catalog);
        assert_eq!(registry.len(), 13);
        assert_eq!(registry.definitions().len(), 13);
        assert!(registry.lookup("get_indian_gold_price").is_some());
        assert!(registry.lookup("sip_gold_planning").is_some());
    }
}
