use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dto::{CreateRoleRequest, RoleMemberResponse, RoleResponse, UpdateRoleRequest};

/// Console command, tagged by `type`.
#[derive(Debug, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/console-command-request.ts"
)]
pub enum ConsoleCommandRequest {
    ShowList,
    ShowDetails {
        role_id: String,
    },
    StartCreate,
    StartEdit {
        role_id: String,
    },
    StartAssignment {
        role_id: String,
    },
    SubmitCreate {
        draft: CreateRoleRequest,
    },
    SubmitEdit {
        patch: UpdateRoleRequest,
    },
    Delete {
        role_id: String,
    },
    Assign {
        user_id: String,
    },
    Unassign {
        user_id: String,
    },
    DismissNotification {
        #[ts(type = "number")]
        notification_id: u64,
    },
    Back,
}

/// Current console screen.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/console-view-response.ts"
)]
pub struct ConsoleViewResponse {
    /// One of `LIST`, `DETAILS`, `CREATE`, `EDIT`, `ASSIGNMENT`.
    pub kind: String,
    pub role_id: Option<String>,
    /// Create form contents, present in the `CREATE` view.
    pub draft: Option<CreateRoleRequest>,
    /// Rejected edit submission, present in the `EDIT` view after a validation error.
    pub pending: Option<UpdateRoleRequest>,
}

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/console-notification-response.ts"
)]
pub struct ConsoleNotificationResponse {
    #[ts(type = "number")]
    pub id: u64,
    pub level: String,
    pub message: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-field-errors-response.ts"
)]
pub struct RoleFieldErrorsResponse {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/console-affordances-response.ts"
)]
pub struct ConsoleAffordancesResponse {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_assign: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/console-member-response.ts"
)]
pub struct ConsoleMemberResponse {
    pub member: RoleMemberResponse,
    pub removable: bool,
}

/// Rendered console session.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/console-snapshot-response.ts"
)]
pub struct ConsoleSnapshotResponse {
    pub session_id: String,
    pub view: ConsoleViewResponse,
    pub roles: Vec<RoleResponse>,
    pub selected_role: Option<RoleResponse>,
    pub members: Vec<ConsoleMemberResponse>,
    pub notifications: Vec<ConsoleNotificationResponse>,
    pub form_errors: RoleFieldErrorsResponse,
    pub form_message: Option<String>,
    pub affordances: ConsoleAffordancesResponse,
}
