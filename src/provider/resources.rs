//! Resource routing
//!
//! Every resource is a fresh snapshot built from a single bulk request.

use crate::aggregate::{
    exchange_overview, market_overview, top_by_volume, top_gainers, top_losers, RankedTicker,
};
use crate::binance::{MarketDataApi, Ticker24hr};
use crate::error::{ProviderError, Result};
use crate::validate::DEFAULT_QUOTE_ASSET;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::str::FromStr;

/// Entries listed by the ranking resources
const RESOURCE_TOP_N: usize = 20;

/// Entries in the overview's volume ranking
const OVERVIEW_TOP_N: usize = 10;

pub const BINANCE_SCHEME: &str = "binance";

/// Every resource the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum ResourceUri {
    MarketOverview,
    TopGainers,
    TopLosers,
    VolumeLeaders,
    ExchangeInfo,
}

impl ResourceUri {
    pub fn uri(self) -> &'static str {
        match self {
            ResourceUri::MarketOverview => "binance://market/overview",
            ResourceUri::TopGainers => "binance://market/top-gainers",
            ResourceUri::TopLosers => "binance://market/top-losers",
            ResourceUri::VolumeLeaders => "binance://market/volume-leaders",
            ResourceUri::ExchangeInfo => "binance://exchange/info",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceUri::MarketOverview => "Market Overview",
            ResourceUri::TopGainers => "Top Gainers",
            ResourceUri::TopLosers => "Top Losers",
            ResourceUri::VolumeLeaders => "Volume Leaders",
            ResourceUri::ExchangeInfo => "Exchange Information",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ResourceUri::MarketOverview => {
                "Current USDT market overview: breadth, sentiment and volume leaders"
            }
            ResourceUri::TopGainers => "Top 20 USDT pairs by 24-hour price gain",
            ResourceUri::TopLosers => "Top 20 USDT pairs by 24-hour price loss",
            ResourceUri::VolumeLeaders => "Top 20 USDT pairs by 24-hour trading volume",
            ResourceUri::ExchangeInfo => "Exchange trading rules and symbol information",
        }
    }
}

impl FromStr for ResourceUri {
    type Err = ProviderError;

    fn from_str(uri: &str) -> Result<Self> {
        let path = uri
            .strip_prefix(BINANCE_SCHEME)
            .and_then(|rest| rest.strip_prefix("://"))
            .ok_or_else(|| ProviderError::NotFound(format!("unsupported resource URI: {}", uri)))?;

        match path {
            "market/overview" => Ok(ResourceUri::MarketOverview),
            "market/top-gainers" => Ok(ResourceUri::TopGainers),
            "market/top-losers" => Ok(ResourceUri::TopLosers),
            "market/volume-leaders" => Ok(ResourceUri::VolumeLeaders),
            "exchange/info" => Ok(ResourceUri::ExchangeInfo),
            _ => Err(ProviderError::NotFound(format!("unknown resource: {}", uri))),
        }
    }
}

/// Build the body of a resource
pub(crate) async fn route_resource(api: &dyn MarketDataApi, resource: ResourceUri) -> Result<Value> {
    tracing::debug!(uri = resource.uri(), "handling resource");

    match resource {
        ResourceUri::MarketOverview => {
            let tickers = api.get_ticker_24h(None).await?;
            let overview =
                market_overview(&tickers, DEFAULT_QUOTE_ASSET, OVERVIEW_TOP_N, Utc::now());
            Ok(serde_json::to_value(overview)?)
        }
        ResourceUri::TopGainers => ranking_resource(api, "gainers", top_gainers).await,
        ResourceUri::TopLosers => ranking_resource(api, "losers", top_losers).await,
        ResourceUri::VolumeLeaders => {
            ranking_resource(api, "volume_leaders", top_by_volume).await
        }
        ResourceUri::ExchangeInfo => {
            let info = api.get_exchange_info(None).await?;
            Ok(serde_json::to_value(exchange_overview(&info))?)
        }
    }
}

type Ranking = fn(&[Ticker24hr], &str, usize) -> Vec<RankedTicker>;

async fn ranking_resource(api: &dyn MarketDataApi, key: &str, rank: Ranking) -> Result<Value> {
    let tickers = api.get_ticker_24h(None).await?;
    let entries = rank(&tickers, DEFAULT_QUOTE_ASSET, RESOURCE_TOP_N);

    let mut body = Map::new();
    body.insert("timestamp".to_string(), json!(Utc::now()));
    body.insert("quote_asset".to_string(), json!(DEFAULT_QUOTE_ASSET));
    body.insert("count".to_string(), json!(entries.len()));
    body.insert(key.to_string(), serde_json::to_value(entries)?);
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use strum::IntoEnumIterator;

    #[test]
    fn test_uris_parse_back() {
        for resource in ResourceUri::iter() {
            assert_eq!(ResourceUri::from_str(resource.uri()).unwrap(), resource);
        }
    }

    #[test]
    fn test_unknown_uris_are_not_found() {
        for uri in [
            "binance://market/unknown",
            "binance://market",
            "http://market/overview",
            "market/overview",
            "",
        ] {
            let err = ResourceUri::from_str(uri).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "uri {:?}", uri);
        }
    }
}
