use crate::provider::params::{
    CandlestickParams, ExchangeInfoParams, NoParams, OrderBookParams, SymbolParams,
    TopCryptocurrenciesParams, TradesParams,
};
use crate::provider::resources::ResourceUri;
use crate::provider::tools::ToolName;
use schemars::JsonSchema;
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

pub const JSON_MIME_TYPE: &str = "application/json";

/// Name, description and input schema of one tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    ToolName::iter()
        .map(|tool| ToolDescriptor {
            name: tool.into(),
            description: tool.description(),
            input_schema: input_schema(tool),
        })
        .collect()
}

pub fn resource_descriptors() -> Vec<ResourceDescriptor> {
    ResourceUri::iter()
        .map(|resource| ResourceDescriptor {
            uri: resource.uri(),
            name: resource.name(),
            description: resource.description(),
            mime_type: JSON_MIME_TYPE,
        })
        .collect()
}

fn input_schema(tool: ToolName) -> Map<String, Value> {
    match tool {
        ToolName::GetCryptoPrice | ToolName::GetMarketStats => schema::<SymbolParams>(),
        ToolName::GetTopCryptocurrencies => schema::<TopCryptocurrenciesParams>(),
        ToolName::GetOrderBook => schema::<OrderBookParams>(),
        ToolName::GetCandlestickData => schema::<CandlestickParams>(),
        ToolName::GetRecentTrades | ToolName::GetHistoricalTrades => schema::<TradesParams>(),
        ToolName::GetAccountBalance => schema::<NoParams>(),
        ToolName::GetExchangeInfo => schema::<ExchangeInfoParams>(),
    }
}

fn schema<P: JsonSchema>() -> Map<String, Value> {
    match serde_json::to_value(schemars::schema_for!(P)) {
        Ok(Value::Object(mut map)) => {
            map.entry("type").or_insert_with(|| Value::String("object".to_string()));
            map
        }
        other => {
            tracing::error!(
                params = std::any::type_name::<P>(),
                result = ?other,
                "input schema is not a JSON object, advertising an empty object schema"
            );
            let mut map = Map::new();
            map.insert("type".to_string(), Value::String("object".to_string()));
            map
        }
    }
}
