use sprintboard_application::{
    ConsoleAffordances, ConsoleCommand, ConsoleMember, ConsoleSnapshot, ConsoleView, Notification,
};
use sprintboard_core::{AppError, UserId};
use sprintboard_domain::{RoleFieldErrors, RoleId};

use crate::dto::{CreateRoleRequest, RoleMemberResponse, RoleResponse, UpdateRoleRequest};

use super::types::{
    ConsoleAffordancesResponse, ConsoleCommandRequest, ConsoleMemberResponse,
    ConsoleNotificationResponse, ConsoleSnapshotResponse, ConsoleViewResponse,
    RoleFieldErrorsResponse,
};

impl TryFrom<ConsoleCommandRequest> for ConsoleCommand {
    type Error = AppError;

    fn try_from(value: ConsoleCommandRequest) -> Result<Self, Self::Error> {
        Ok(match value {
            ConsoleCommandRequest::ShowList => Self::ShowList,
            ConsoleCommandRequest::ShowDetails { role_id } => {
                Self::ShowDetails(role_id.parse::<RoleId>()?)
            }
            ConsoleCommandRequest::StartCreate => Self::StartCreate,
            ConsoleCommandRequest::StartEdit { role_id } => {
                Self::StartEdit(role_id.parse::<RoleId>()?)
            }
            ConsoleCommandRequest::StartAssignment { role_id } => {
                Self::StartAssignment(role_id.parse::<RoleId>()?)
            }
            ConsoleCommandRequest::SubmitCreate { draft } => Self::SubmitCreate(draft.into()),
            ConsoleCommandRequest::SubmitEdit { patch } => Self::SubmitEdit(patch.into()),
            ConsoleCommandRequest::Delete { role_id } => Self::Delete(role_id.parse::<RoleId>()?),
            ConsoleCommandRequest::Assign { user_id } => Self::Assign(user_id.parse::<UserId>()?),
            ConsoleCommandRequest::Unassign { user_id } => {
                Self::Unassign(user_id.parse::<UserId>()?)
            }
            ConsoleCommandRequest::DismissNotification { notification_id } => {
                Self::DismissNotification(notification_id)
            }
            ConsoleCommandRequest::Back => Self::Back,
        })
    }
}

impl From<ConsoleView> for ConsoleViewResponse {
    fn from(value: ConsoleView) -> Self {
        let kind = value.kind().as_str().to_owned();
        let role_id = value.role_id().map(|role_id| role_id.to_string());
        let (draft, pending) = match value {
            ConsoleView::Create { draft } => (Some(CreateRoleRequest::from(draft)), None),
            ConsoleView::Edit { pending, .. } => (None, pending.map(UpdateRoleRequest::from)),
            ConsoleView::List | ConsoleView::Details { .. } | ConsoleView::Assignment { .. } => {
                (None, None)
            }
        };

        Self {
            kind,
            role_id,
            draft,
            pending,
        }
    }
}

impl From<Notification> for ConsoleNotificationResponse {
    fn from(value: Notification) -> Self {
        Self {
            id: value.id,
            level: value.level.as_str().to_owned(),
            message: value.message,
        }
    }
}

impl From<RoleFieldErrors> for RoleFieldErrorsResponse {
    fn from(value: RoleFieldErrors) -> Self {
        Self {
            name: value.name,
            description: value.description,
            permissions: value.permissions,
        }
    }
}

impl From<ConsoleAffordances> for ConsoleAffordancesResponse {
    fn from(value: ConsoleAffordances) -> Self {
        Self {
            can_create: value.can_create,
            can_edit: value.can_edit,
            can_delete: value.can_delete,
            can_assign: value.can_assign,
        }
    }
}

impl From<ConsoleMember> for ConsoleMemberResponse {
    fn from(value: ConsoleMember) -> Self {
        Self {
            member: RoleMemberResponse::from(value.member),
            removable: value.removable,
        }
    }
}

impl From<ConsoleSnapshot> for ConsoleSnapshotResponse {
    fn from(value: ConsoleSnapshot) -> Self {
        Self {
            session_id: value.session_id.to_string(),
            view: ConsoleViewResponse::from(value.view),
            roles: value.roles.into_iter().map(RoleResponse::from).collect(),
            selected_role: value.selected_role.map(RoleResponse::from),
            members: value
                .members
                .into_iter()
                .map(ConsoleMemberResponse::from)
                .collect(),
            notifications: value
                .notifications
                .into_iter()
                .map(ConsoleNotificationResponse::from)
                .collect(),
            form_errors: RoleFieldErrorsResponse::from(value.form_errors),
            form_message: value.form_message,
            affordances: ConsoleAffordancesResponse::from(value.affordances),
        }
    }
}
