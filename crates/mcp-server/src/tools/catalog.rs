//! Agent tool catalog

use tool_spec::{ParamType, ToolDescriptor, ToolParam, ToolProvider, ToolSpecResult};

pub const GET_URL_LOOKUP: &str = "get_url_lookup";
pub const GET_SPAM_SCORE: &str = "get_spam_score";
pub const LIST_MARKET_OPPORTUNITIES: &str = "list_market_opportunities";
pub const GET_WALLET_BALANCE: &str = "get_wallet_balance";

/// Tool group name of the agent tools
pub const AGENT_GROUP: &str = "agent";

const URL_LOOKUP_DOC: &str = "Performs a URL lookup using the APIClient.

Args:
    url: The URL to lookup.

Returns:
    A dictionary containing the lookup result.";

const SPAM_SCORE_DOC: &str = "Retrieves the spam score for a given URL using the APIClient.

Args:
    url: The URL to get the spam score for.

Returns:
    A dictionary containing the spam score result.";

const MARKET_OPPORTUNITIES_DOC: &str =
    "Lists market opportunities based on the provided filters using the APIClient.

Args:
    dr_min: Optional minimum domain rating.
    price_max: Optional maximum price.
    topic: Optional topic to filter by.

Returns:
    A list of market opportunities.";

const WALLET_BALANCE_DOC: &str = "Retrieves the balance for a given wallet ID using the APIClient.

Args:
    wallet_id: The ID of the wallet to get the balance for.

Returns:
    A dictionary containing the wallet balance result.";

/// Descriptors of every agent tool
pub fn agent_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(GET_URL_LOOKUP, URL_LOOKUP_DOC)
            .param(ToolParam::required("url", ParamType::String)),
        ToolDescriptor::new(GET_SPAM_SCORE, SPAM_SCORE_DOC)
            .param(ToolParam::required("url", ParamType::String)),
        ToolDescriptor::new(LIST_MARKET_OPPORTUNITIES, MARKET_OPPORTUNITIES_DOC)
            .param(ToolParam::optional("dr_min", ParamType::Int))
            .param(ToolParam::optional("price_max", ParamType::Float))
            .param(ToolParam::optional("topic", ParamType::String)),
        ToolDescriptor::new(GET_WALLET_BALANCE, WALLET_BALANCE_DOC)
            .param(ToolParam::required("wallet_id", ParamType::String)),
    ]
}

/// Provider of the agent tools
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentToolProvider;

impl ToolProvider for AgentToolProvider {
    fn group(&self) -> &str {
        AGENT_GROUP
    }

    fn descriptors(&self) -> ToolSpecResult<Vec<ToolDescriptor>> {
        Ok(agent_tools())
    }
}
