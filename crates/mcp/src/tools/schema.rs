// Helper functions for building tool input schemas

pub fn json_schema_object(properties: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_number(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}
