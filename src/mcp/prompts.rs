//! Debugging prompt templates.
//!
//! Prompts are static text: they name the tools to call in order and never
//! touch the staging API themselves.

use std::collections::HashMap;

use crate::{StmsError, StmsResult};

use super::protocol::{GetPromptResult, PromptArgument, PromptDescription, PromptMessage};

struct PromptTemplate {
    name: &'static str,
    description: &'static str,
    argument: (&'static str, &'static str),
    render: fn(&str) -> String,
}

const PROMPTS: [PromptTemplate; 2] = [
    PromptTemplate {
        name: "debug_user_access",
        description: "Generate a debugging workflow for user access issues.",
        argument: ("idp_user_code", "The user code to debug"),
        render: debug_user_access,
    },
    PromptTemplate {
        name: "debug_sync_issue",
        description: "Generate a debugging workflow for sync issues.",
        argument: (
            "entity_type",
            "Type of entity with sync issues (e.g., 'user', 'attendance')",
        ),
        render: debug_sync_issue,
    },
];

fn debug_user_access(idp_user_code: &str) -> String {
    format!(
        r#"Debug access issues for user: {code}

Steps to follow:
1. First, get user profile: get_user_profile("{code}")
2. Check their current access: get_user_access("{code}")
3. Get their flattened permissions: get_flattened_permissions("{code}")
4. Check pending access requests: get_pending_access_requests()

If the user is missing expected permissions:
- Check if there's a pending access request
- Verify the user's facility and designation assignments
- Check if permissions are granted via groups vs directly
"#,
        code = idp_user_code
    )
}

fn debug_sync_issue(entity_type: &str) -> String {
    format!(
        r#"Debug sync issue for entity type: {entity_type}

Steps to follow:
1. Check API health: health_check()
2. Get current user context: whoami()
3. If user sync issue:
   - Get user profile to see last_wf_sync timestamp
   - Check entity_event table for pending events
   - Verify WF integration is returning data

4. Review recent events in the event queue using push_event tool to trace flow
5. Check if the entity exists in both source (WF) and target (STMS) systems
"#
    )
}

/// Lists available prompts.
pub fn list_prompts() -> Vec<PromptDescription> {
    PROMPTS
        .iter()
        .map(|template| PromptDescription {
            name: template.name.to_string(),
            description: template.description.to_string(),
            arguments: vec![PromptArgument {
                name: template.argument.0.to_string(),
                description: template.argument.1.to_string(),
                required: true,
            }],
        })
        .collect()
}

/// Renders a prompt.
pub fn get_prompt(name: &str, arguments: &HashMap<String, String>) -> StmsResult<GetPromptResult> {
    let template = PROMPTS
        .iter()
        .find(|template| template.name == name)
        .ok_or_else(|| StmsError::invalid_arguments(format!("Unknown prompt: {}", name)))?;

    let (arg_name, _) = template.argument;
    let value = arguments.get(arg_name).ok_or_else(|| {
        StmsError::invalid_arguments(format!("Missing prompt argument '{}'", arg_name))
    })?;

    Ok(GetPromptResult {
        description: template.description.to_string(),
        messages: vec![PromptMessage::user((template.render)(value))],
    })
}
