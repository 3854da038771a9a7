//! Input schemas advertised in `tools/list`.

use serde_json::{json, Map, Value};

use super::Tool;

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn integer(description: &str, default: i64) -> Value {
    json!({ "type": "integer", "description": description, "default": default })
}

fn object(properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn user_code() -> Value {
    object(
        vec![(
            "idp_user_code",
            string("The IDP user code (e.g., 'stg-xxx@idp.noon.partners')"),
        )],
        &["idp_user_code"],
    )
}

fn paged(mut filters: Vec<(&'static str, Value)>, page_size: i64) -> Value {
    filters.push(("page", integer("Page number", 1)));
    filters.push(("page_size", integer("Results per page", page_size)));
    object(filters, &[])
}

pub(super) fn input_schema(tool: Tool) -> Value {
    match tool {
        Tool::Whoami
        | Tool::GetUserPermissions
        | Tool::GetPendingAccessRequests
        | Tool::TriggerCdmSync
        | Tool::GetDropdowns
        | Tool::ListReports
        | Tool::HealthCheck => object(vec![], &[]),

        Tool::GiveAccessToUser => object(
            vec![
                ("idp_user_code", string("The IDP user code to grant access to")),
                ("entity_type", string("Type of entity (e.g., 'permission', 'role')")),
                ("entity_code", string("Code of the entity")),
                (
                    "scope_type",
                    json!({
                        "type": "string",
                        "description": "Type of scope (currently not forwarded; the default scope is always requested)",
                        "default": "default"
                    }),
                ),
                (
                    "scope_code",
                    string("Code of scope (currently not forwarded; the default scope is always requested)"),
                ),
            ],
            &["idp_user_code", "entity_type", "entity_code"],
        ),

        Tool::GetUserProfile
        | Tool::GetUserByCode
        | Tool::GetUserAccess
        | Tool::GetFlattenedPermissions => user_code(),

        Tool::ListUsers => paged(
            vec![
                ("facility_code", string("Filter by facility code (optional)")),
                ("designation_code", string("Filter by designation code (optional)")),
                ("search", string("Search term for user name/email (optional)")),
            ],
            20,
        ),

        Tool::CheckHasAccess => object(
            vec![
                ("entity_type", string("Type of entity (e.g., 'permission', 'role')")),
                ("entity_code", string("Code of the entity")),
                ("scope_type", string("Type of scope (optional, e.g., 'facility')")),
                ("scope_code", string("Code of scope (optional)")),
            ],
            &["entity_type", "entity_code"],
        ),

        Tool::GetAccessRequestHistory => paged(
            vec![
                ("idp_user_code", string("Filter by user (optional)")),
                (
                    "status",
                    string("Filter by status - 'pending', 'approved', 'rejected', 'cancelled' (optional)"),
                ),
            ],
            20,
        ),

        Tool::PushEvent => object(
            vec![
                ("event_type", string("Type of event (e.g., 'user_created', 'user_updated')")),
                (
                    "payload",
                    json!({ "type": "object", "description": "Event payload as a dictionary" }),
                ),
            ],
            &["event_type", "payload"],
        ),

        Tool::ListShifts => paged(
            vec![
                ("facility_code", string("Filter by facility (optional)")),
                ("shift_type", string("Filter by shift type (optional)")),
            ],
            50,
        ),

        Tool::GetRoster => object(
            vec![
                ("facility_code", string("The facility code")),
                ("start_date", string("Start date (YYYY-MM-DD)")),
                ("end_date", string("End date (YYYY-MM-DD)")),
                ("designation_code", string("Filter by designation (optional)")),
            ],
            &["facility_code", "start_date", "end_date"],
        ),

        Tool::GetReport => object(
            vec![
                ("report_name", string("Name of the report")),
                (
                    "format",
                    json!({
                        "type": "string",
                        "description": "Output format - 'json', 'csv', or 'tsv'",
                        "enum": ["json", "csv", "tsv"],
                        "default": "json"
                    }),
                ),
            ],
            &["report_name"],
        ),

        Tool::GetOnboardingTasks | Tool::GetOffboardingTasks => paged(
            vec![
                ("facility_code", string("Filter by facility (optional)")),
                ("status", string("Filter by status (optional)")),
            ],
            20,
        ),

        Tool::ApiRequest => object(
            vec![
                (
                    "method",
                    string("HTTP method - 'GET', 'POST', 'PUT', 'DELETE'"),
                ),
                ("path", string("API path (e.g., '/user/list')")),
                (
                    "body",
                    json!({
                        "type": "object",
                        "description": "Request body for POST/PUT requests (optional)"
                    }),
                ),
            ],
            &["method", "path"],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_schema_is_an_object() {
        for tool in Tool::ALL {
            let schema = input_schema(tool);
            assert_eq!(schema["type"], "object", "{}", tool.name());
            assert!(schema["properties"].is_object(), "{}", tool.name());
            assert!(schema["required"].is_array(), "{}", tool.name());
        }
    }

    #[test]
    fn test_required_fields_are_declared_properties() {
        for tool in Tool::ALL {
            let schema = input_schema(tool);
            for required in schema["required"].as_array().unwrap() {
                let name = required.as_str().unwrap();
                assert!(
                    schema["properties"].get(name).is_some(),
                    "{} requires undeclared '{}'",
                    tool.name(),
                    name
                );
            }
        }
    }

    #[test]
    fn test_paged_defaults() {
        let shifts = input_schema(Tool::ListShifts);
        assert_eq!(shifts["properties"]["page_size"]["default"], 50);

        let users = input_schema(Tool::ListUsers);
        assert_eq!(users["properties"]["page_size"]["default"], 20);
        assert_eq!(users["properties"]["page"]["default"], 1);
    }
}
