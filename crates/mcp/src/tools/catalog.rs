// The fixed catalog of Trading 212 tools

use crate::protocol::ToolSchema;
use crate::tools::schema::{json_schema_number, json_schema_object, json_schema_string};
use serde_json::{Map, Number, Value};
use t212_client::{format_number, Query};

/// Every tool the server exposes. Each one is a single upstream GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    AccountSummary,
    HistoryDividends,
    HistoryExports,
    HistoryOrders,
    HistoryTransactions,
    MetadataExchanges,
    MetadataInstruments,
    Orders,
    OrderById,
    Pies,
    PieById,
    Positions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    String,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgLocation {
    /// Substituted for `{name}` in the path template.
    Path,
    Query,
}

/// An optional tool argument.
#[derive(Debug, Clone, Copy)]
pub struct ToolArgument {
    pub name: &'static str,
    pub kind: ArgKind,
    pub location: ArgLocation,
    pub description: &'static str,
}

const CURSOR: ToolArgument = ToolArgument {
    name: "cursor",
    kind: ArgKind::String,
    location: ArgLocation::Query,
    description: "Pagination cursor from a previous page",
};

const TICKER: ToolArgument = ToolArgument {
    name: "ticker",
    kind: ArgKind::String,
    location: ArgLocation::Query,
    description: "Instrument ticker, e.g. AAPL_US_EQ",
};

const TIME: ToolArgument = ToolArgument {
    name: "time",
    kind: ArgKind::String,
    location: ArgLocation::Query,
    description: "Timestamp filter (ISO 8601)",
};

const LIMIT: ToolArgument = ToolArgument {
    name: "limit",
    kind: ArgKind::Number,
    location: ArgLocation::Query,
    description: "Maximum number of items to return",
};

const ID: ToolArgument = ToolArgument {
    name: "id",
    kind: ArgKind::Number,
    location: ArgLocation::Path,
    description: "Numeric identifier",
};

/// The upstream request a tool call resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    pub path: String,
    pub query: Option<Query>,
}

impl Tool {
    pub const ALL: [Tool; 12] = [
        Tool::AccountSummary,
        Tool::HistoryDividends,
        Tool::HistoryExports,
        Tool::HistoryOrders,
        Tool::HistoryTransactions,
        Tool::MetadataExchanges,
        Tool::MetadataInstruments,
        Tool::Orders,
        Tool::OrderById,
        Tool::Pies,
        Tool::PieById,
        Tool::Positions,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::AccountSummary => "get_account_summary",
            Tool::HistoryDividends => "get_history_dividends",
            Tool::HistoryExports => "get_history_exports",
            Tool::HistoryOrders => "get_history_orders",
            Tool::HistoryTransactions => "get_history_transactions",
            Tool::MetadataExchanges => "get_metadata_exchanges",
            Tool::MetadataInstruments => "get_metadata_instruments",
            Tool::Orders => "get_orders",
            Tool::OrderById => "get_order_by_id",
            Tool::Pies => "get_pies",
            Tool::PieById => "get_pie_by_id",
            Tool::Positions => "get_positions",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::AccountSummary => "Fetch account summary",
            Tool::HistoryDividends => "Fetch dividend history",
            Tool::HistoryExports => "Fetch export jobs",
            Tool::HistoryOrders => "Fetch order history",
            Tool::HistoryTransactions => "Fetch transaction history",
            Tool::MetadataExchanges => "Fetch exchanges metadata",
            Tool::MetadataInstruments => "Fetch instruments metadata",
            Tool::Orders => "Fetch pending orders",
            Tool::OrderById => "Fetch a pending order by ID",
            Tool::Pies => "Fetch all pies (deprecated API)",
            Tool::PieById => "Fetch a pie by ID (deprecated API)",
            Tool::Positions => "Fetch open positions",
        }
    }

    pub fn path_template(self) -> &'static str {
        match self {
            Tool::AccountSummary => "/api/v0/equity/account/summary",
            Tool::HistoryDividends => "/api/v0/equity/history/dividends",
            Tool::HistoryExports => "/api/v0/equity/history/exports",
            Tool::HistoryOrders => "/api/v0/equity/history/orders",
            Tool::HistoryTransactions => "/api/v0/equity/history/transactions",
            Tool::MetadataExchanges => "/api/v0/equity/metadata/exchanges",
            Tool::MetadataInstruments => "/api/v0/equity/metadata/instruments",
            Tool::Orders => "/api/v0/equity/orders",
            Tool::OrderById => "/api/v0/equity/orders/{id}",
            Tool::Pies => "/api/v0/equity/pies",
            Tool::PieById => "/api/v0/equity/pies/{id}",
            Tool::Positions => "/api/v0/equity/positions",
        }
    }

    pub fn arguments(self) -> &'static [ToolArgument] {
        match self {
            Tool::HistoryDividends | Tool::HistoryOrders => &[CURSOR, TICKER, LIMIT],
            Tool::HistoryTransactions => &[CURSOR, TIME, LIMIT],
            Tool::OrderById | Tool::PieById => &[ID],
            Tool::Positions => &[TICKER],
            Tool::AccountSummary
            | Tool::HistoryExports
            | Tool::MetadataExchanges
            | Tool::MetadataInstruments
            | Tool::Orders
            | Tool::Pies => &[],
        }
    }

    pub fn schema(self) -> ToolSchema {
        let properties: Map<String, Value> = self
            .arguments()
            .iter()
            .map(|arg| {
                let schema = match arg.kind {
                    ArgKind::String => json_schema_string(arg.description),
                    ArgKind::Number => json_schema_number(arg.description),
                };
                (arg.name.to_string(), schema)
            })
            .collect();

        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: json_schema_object(Value::Object(properties)),
        }
    }

    /// Resolve the upstream path and query for a call.
    ///
    /// Arguments of the wrong JSON type count as absent. Path parameters
    /// default to `0`.
    pub fn request(self, arguments: &Value) -> ToolRequest {
        let args = Arguments::new(arguments);
        let mut path = self.path_template().to_string();
        let mut query = Query::new();

        for arg in self.arguments() {
            match (arg.location, arg.kind) {
                (ArgLocation::Path, _) => {
                    let value = args
                        .number(arg.name)
                        .map(|n| format_number(&n))
                        .unwrap_or_else(|| "0".to_string());
                    path = path.replace(&format!("{{{}}}", arg.name), &value);
                }
                (ArgLocation::Query, ArgKind::String) => {
                    query = query.param(arg.name, args.string(arg.name));
                }
                (ArgLocation::Query, ArgKind::Number) => {
                    query = query.param(arg.name, args.number(arg.name));
                }
            }
        }

        ToolRequest {
            path,
            query: (!query.is_empty()).then_some(query),
        }
    }
}

/// Typed view over a tool call's argument object.
struct Arguments<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Arguments<'a> {
    fn new(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    fn string(&self, name: &str) -> Option<String> {
        match self.map?.get(name)? {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn number(&self, name: &str) -> Option<Number> {
        match self.map?.get(name)? {
            Value::Number(n) => Some(n.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_names_round_trip_and_are_unique() {
        let mut names: Vec<&str> = Tool::ALL.iter().map(|t| t.name()).collect();
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Tool::ALL.len());
        assert_eq!(Tool::from_name("do_nothing"), None);
    }

    #[test]
    fn test_operation_table() {
        let expected: [(&str, &str, &[&str]); 12] = [
            ("get_account_summary", "/api/v0/equity/account/summary", &[]),
            ("get_history_dividends", "/api/v0/equity/history/dividends", &["cursor", "ticker", "limit"]),
            ("get_history_exports", "/api/v0/equity/history/exports", &[]),
            ("get_history_orders", "/api/v0/equity/history/orders", &["cursor", "ticker", "limit"]),
            ("get_history_transactions", "/api/v0/equity/history/transactions", &["cursor", "time", "limit"]),
            ("get_metadata_exchanges", "/api/v0/equity/metadata/exchanges", &[]),
            ("get_metadata_instruments", "/api/v0/equity/metadata/instruments", &[]),
            ("get_orders", "/api/v0/equity/orders", &[]),
            ("get_order_by_id", "/api/v0/equity/orders/0", &["id"]),
            ("get_pies", "/api/v0/equity/pies", &[]),
            ("get_pie_by_id", "/api/v0/equity/pies/0", &["id"]),
            ("get_positions", "/api/v0/equity/positions", &["ticker"]),
        ];

        for (tool, (name, path, args)) in Tool::ALL.into_iter().zip(expected) {
            assert_eq!(tool.name(), name);
            assert_eq!(tool.request(&json!({})).path, path, "{}", name);

            let arg_names: Vec<&str> = tool.arguments().iter().map(|a| a.name).collect();
            assert_eq!(arg_names, args, "{}", name);

            let schema = tool.schema();
            let properties: Vec<&str> = schema.input_schema["properties"]
                .as_object()
                .unwrap()
                .keys()
                .map(String::as_str)
                .collect();
            assert_eq!(properties, args, "{}", name);
        }
    }

    #[test]
    fn test_pie_by_id_defaults_to_zero() {
        assert_eq!(Tool::PieById.request(&json!({})).path, "/api/v0/equity/pies/0");
        assert_eq!(Tool::PieById.request(&Value::Null).path, "/api/v0/equity/pies/0");
        assert_eq!(
            Tool::PieById.request(&json!({"id": "42"})).path,
            "/api/v0/equity/pies/0"
        );
    }

    #[test]
    fn test_pie_by_id_uses_numeric_id() {
        let request = Tool::PieById.request(&json!({"id": 42}));
        assert_eq!(request.path, "/api/v0/equity/pies/42");
        assert_eq!(request.query, None);

        assert_eq!(
            Tool::OrderById.request(&json!({"id": 7.0})).path,
            "/api/v0/equity/orders/7"
        );
    }

    #[test]
    fn test_history_query_arguments() {
        let request = Tool::HistoryTransactions.request(&json!({
            "cursor": "abc",
            "time": "2024-01-01T00:00:00Z",
            "limit": 20,
            "ticker": "ignored"
        }));

        assert_eq!(request.path, "/api/v0/equity/history/transactions");
        assert_eq!(
            request.query.unwrap().pairs(),
            vec![
                ("cursor".to_string(), "abc".to_string()),
                ("time".to_string(), "2024-01-01T00:00:00Z".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_wrongly_typed_arguments_are_dropped() {
        let request = Tool::HistoryDividends.request(&json!({
            "cursor": 5,
            "ticker": null,
            "limit": "10"
        }));

        assert!(request.query.unwrap().pairs().is_empty());
    }

    #[test]
    fn test_tools_without_arguments_send_no_query() {
        let request = Tool::AccountSummary.request(&json!({"ticker": "AAPL_US_EQ"}));
        assert_eq!(request.path, "/api/v0/equity/account/summary");
        assert_eq!(request.query, None);
    }

    #[test]
    fn test_schema_lists_optional_properties() {
        let schema = Tool::Positions.schema();
        assert_eq!(schema.name, "get_positions");
        assert_eq!(schema.description, "Fetch open positions");
        assert_eq!(schema.input_schema["type"], "object");
        assert_eq!(schema.input_schema["properties"]["ticker"]["type"], "string");
        assert!(schema.input_schema.get("required").is_none());

        let schema = Tool::PieById.schema();
        assert_eq!(schema.input_schema["properties"]["id"]["type"], "number");

        let schema = Tool::Orders.schema();
        assert_eq!(schema.input_schema["properties"], json!({}));
    }
}
