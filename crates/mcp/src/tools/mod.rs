pub mod catalog;
pub mod router;
mod schema;

pub use catalog::{ArgKind, ArgLocation, Tool, ToolArgument, ToolRequest};
pub use router::ToolRouter;
pub use schema::{json_schema_number, json_schema_object, json_schema_string};
