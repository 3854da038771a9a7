//! Fixed tool catalog.
//!
//! Every tool binds a name and an argument list to exactly one staging API
//! call. [`Tool::ALL`] is the registration table the MCP layer lists and
//! dispatches from; the exhaustive matches below guarantee each registered
//! tool has a description, a schema and a request builder.
//!
//! | Tool | Method | Path |
//! |---|---|---|
//! | `whoami` | GET | `/user/whoami` |
//! | `give_access_to_user` | POST | `/access-control/access-requests` |
//! | `get_user_profile` | GET | `/user/{idp_user_code}/profile` |
//! | `get_user_by_code` | POST | `/user/idp_user_code/` |
//! | `list_users` | POST | `/user/list` |
//! | `get_user_permissions` | POST | `/access-control/users/permissions` |
//! | `get_user_access` | POST | `/access-control/users/access` |
//! | `check_has_access` | POST | `/access-control/users/has-access` |
//! | `get_flattened_permissions` | POST | `/access-control/users/flattened-permissions` |
//! | `get_pending_access_requests` | POST | `/access-control/users/approver/pending/access-requests` |
//! | `get_access_request_history` | POST | `/access-control/users/access-requests` |
//! | `push_event` | POST | `/events/push` |
//! | `trigger_cdm_sync` | POST | `/trigger_cdm_id_sync` |
//! | `get_dropdowns` | GET | `/dropdowns` |
//! | `list_shifts` | POST | `/shifts` |
//! | `get_roster` | POST | `/roster` |
//! | `list_reports` | GET | `/reports` |
//! | `get_report` | GET | `/reports/{report_name}` |
//! | `get_onboarding_tasks` | POST | `/dashboard/onboarding/tasks` |
//! | `get_offboarding_tasks` | POST | `/dashboard/offboarding/tasks` |
//! | `health_check` | GET | `/public/hc` |
//! | `api_request` | any of GET/POST/PUT/DELETE | caller-supplied |

pub mod params;
mod schema;

use serde_json::Value;

use crate::client::{ApiRequest, Envelope, StagingApi};
use crate::StmsResult;

use params::{
    parse_args, post_args, AccessRequestHistoryArgs, CheckHasAccessArgs, GiveAccessArgs,
    ListShiftsArgs, ListUsersArgs, PushEventArgs, RawRequestArgs, ReportArgs, RosterArgs,
    TaskListArgs, UserCodeArgs,
};

/// A tool exposed over MCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Whoami,
    GiveAccessToUser,
    GetUserProfile,
    GetUserByCode,
    ListUsers,
    GetUserPermissions,
    GetUserAccess,
    CheckHasAccess,
    GetFlattenedPermissions,
    GetPendingAccessRequests,
    GetAccessRequestHistory,
    PushEvent,
    TriggerCdmSync,
    GetDropdowns,
    ListShifts,
    GetRoster,
    ListReports,
    GetReport,
    GetOnboardingTasks,
    GetOffboardingTasks,
    HealthCheck,
    ApiRequest,
}

impl Tool {
    /// Every registered tool, in listing order.
    pub const ALL: [Tool; 22] = [
        Tool::Whoami,
        Tool::GiveAccessToUser,
        Tool::GetUserProfile,
        Tool::GetUserByCode,
        Tool::ListUsers,
        Tool::GetUserPermissions,
        Tool::GetUserAccess,
        Tool::CheckHasAccess,
        Tool::GetFlattenedPermissions,
        Tool::GetPendingAccessRequests,
        Tool::GetAccessRequestHistory,
        Tool::PushEvent,
        Tool::TriggerCdmSync,
        Tool::GetDropdowns,
        Tool::ListShifts,
        Tool::GetRoster,
        Tool::ListReports,
        Tool::GetReport,
        Tool::GetOnboardingTasks,
        Tool::GetOffboardingTasks,
        Tool::HealthCheck,
        Tool::ApiRequest,
    ];

    /// Name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Whoami => "whoami",
            Tool::GiveAccessToUser => "give_access_to_user",
            Tool::GetUserProfile => "get_user_profile",
            Tool::GetUserByCode => "get_user_by_code",
            Tool::ListUsers => "list_users",
            Tool::GetUserPermissions => "get_user_permissions",
            Tool::GetUserAccess => "get_user_access",
            Tool::CheckHasAccess => "check_has_access",
            Tool::GetFlattenedPermissions => "get_flattened_permissions",
            Tool::GetPendingAccessRequests => "get_pending_access_requests",
            Tool::GetAccessRequestHistory => "get_access_request_history",
            Tool::PushEvent => "push_event",
            Tool::TriggerCdmSync => "trigger_cdm_sync",
            Tool::GetDropdowns => "get_dropdowns",
            Tool::ListShifts => "list_shifts",
            Tool::GetRoster => "get_roster",
            Tool::ListReports => "list_reports",
            Tool::GetReport => "get_report",
            Tool::GetOnboardingTasks => "get_onboarding_tasks",
            Tool::GetOffboardingTasks => "get_offboarding_tasks",
            Tool::HealthCheck => "health_check",
            Tool::ApiRequest => "api_request",
        }
    }

    /// Looks a tool up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// Human-readable description shown to MCP clients.
    pub fn description(self) -> &'static str {
        match self {
            Tool::Whoami => "Get the current authenticated user context. Returns business_unit, idp_user_code, and username.",
            Tool::GiveAccessToUser => "Give access to a user for a specific entity.",
            Tool::GetUserProfile => "Get detailed profile information for a user.",
            Tool::GetUserByCode => "Get user details by IDP user code.",
            Tool::ListUsers => "List users with optional filters.",
            Tool::GetUserPermissions => "Get all permissions (direct and group-based) for the current user.",
            Tool::GetUserAccess => "Get current and historical access permissions for a specific user.",
            Tool::CheckHasAccess => "Check if the current user has access to a specific entity/scope.",
            Tool::GetFlattenedPermissions => "Get flattened permissions view for a user (shows all effective permissions).",
            Tool::GetPendingAccessRequests => "Get pending access requests waiting for approval (for current user as approver).",
            Tool::GetAccessRequestHistory => "Get filtered history of access requests.",
            Tool::PushEvent => "Push an event to the event queue (admin only).",
            Tool::TriggerCdmSync => "Trigger CDM ID sync for active users (admin only).",
            Tool::GetDropdowns => "Get all dropdown/reference values (facilities, designations, vendors, etc.).",
            Tool::ListShifts => "List shifts with optional filters.",
            Tool::GetRoster => "Get roster data for a facility and date range.",
            Tool::ListReports => "Get list of available report types.",
            Tool::GetReport => "Get a specific report by name.",
            Tool::GetOnboardingTasks => "Get onboarding tasks dashboard.",
            Tool::GetOffboardingTasks => "Get offboarding tasks dashboard.",
            Tool::HealthCheck => "Check if the staging API is healthy and responding.",
            Tool::ApiRequest => "Make a generic API request to staging. Use this for endpoints not covered by other tools.",
        }
    }

    /// JSON Schema for the tool's arguments.
    pub fn input_schema(self) -> Value {
        schema::input_schema(self)
    }

    /// Builds the single request this tool issues for `arguments`.
    ///
    /// Fails with `InvalidArguments` when a required argument is missing and,
    /// for `api_request`, with `UnsupportedMethod` for unknown verbs.
    pub fn build_request(self, arguments: Value) -> StmsResult<ApiRequest> {
        let request = match self {
            Tool::Whoami => ApiRequest::get("/user/whoami"),
            Tool::GiveAccessToUser => parse_args::<GiveAccessArgs>(arguments)?.into_request(),
            Tool::GetUserProfile => {
                let args: UserCodeArgs = parse_args(arguments)?;
                ApiRequest::get(format!("/user/{}/profile", args.idp_user_code))
            }
            Tool::GetUserByCode => {
                post_args("/user/idp_user_code/", &parse_args::<UserCodeArgs>(arguments)?)
            }
            Tool::ListUsers => post_args("/user/list", &parse_args::<ListUsersArgs>(arguments)?),
            Tool::GetUserPermissions => ApiRequest::post_empty("/access-control/users/permissions"),
            Tool::GetUserAccess => post_args(
                "/access-control/users/access",
                &parse_args::<UserCodeArgs>(arguments)?,
            ),
            Tool::CheckHasAccess => post_args(
                "/access-control/users/has-access",
                &parse_args::<CheckHasAccessArgs>(arguments)?,
            ),
            Tool::GetFlattenedPermissions => post_args(
                "/access-control/users/flattened-permissions",
                &parse_args::<UserCodeArgs>(arguments)?,
            ),
            Tool::GetPendingAccessRequests => {
                ApiRequest::post_empty("/access-control/users/approver/pending/access-requests")
            }
            Tool::GetAccessRequestHistory => post_args(
                "/access-control/users/access-requests",
                &parse_args::<AccessRequestHistoryArgs>(arguments)?,
            ),
            Tool::PushEvent => post_args("/events/push", &parse_args::<PushEventArgs>(arguments)?),
            Tool::TriggerCdmSync => ApiRequest::post_empty("/trigger_cdm_id_sync"),
            Tool::GetDropdowns => ApiRequest::get("/dropdowns"),
            Tool::ListShifts => post_args("/shifts", &parse_args::<ListShiftsArgs>(arguments)?),
            Tool::GetRoster => post_args("/roster", &parse_args::<RosterArgs>(arguments)?),
            Tool::ListReports => ApiRequest::get("/reports"),
            Tool::GetReport => parse_args::<ReportArgs>(arguments)?.into_request(),
            Tool::GetOnboardingTasks => post_args(
                "/dashboard/onboarding/tasks",
                &parse_args::<TaskListArgs>(arguments)?,
            ),
            Tool::GetOffboardingTasks => post_args(
                "/dashboard/offboarding/tasks",
                &parse_args::<TaskListArgs>(arguments)?,
            ),
            Tool::HealthCheck => ApiRequest::get("/public/hc"),
            Tool::ApiRequest => parse_args::<RawRequestArgs>(arguments)?.into_request()?,
        };
        Ok(request)
    }

    /// Runs the tool against the staging API.
    ///
    /// `api_request` goes through the generic dispatcher so unsupported verbs
    /// come back as an envelope instead of an error.
    pub async fn call(self, api: &StagingApi, arguments: Value) -> StmsResult<Envelope> {
        match self {
            Tool::ApiRequest => {
                let args: RawRequestArgs = parse_args(arguments)?;
                api.request(&args.method, &args.path, args.body).await
            }
            _ => {
                let request = self.build_request(arguments)?;
                api.execute(&request).await
            }
        }
    }
}
