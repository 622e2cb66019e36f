use std::sync::Arc;

use tracing::{info, warn};

use sprintboard_core::{AppError, AppResult, UserId, UserIdentity};
use sprintboard_domain::{
    AccessGuard, GuardDecision, PermissionGuard, ROLE_ASSIGN, ROLE_MANAGE, Role, RoleDraft,
    RoleFieldErrors, RoleId, RolePatch,
};

use crate::{
    AssignmentOutcome, AuthorizationService, RoleAssignmentService, RoleMember, RoleService,
};

use super::ports::ConsoleSessionRepository;
use super::state::{
    ConsoleCommand, ConsoleSession, ConsoleSessionId, ConsoleState, ConsoleView, Notification,
    NotificationLevel,
};

/// Actions the console user may trigger from the current view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleAffordances {
    /// Show the create button.
    pub can_create: bool,
    /// Show the edit button for the selected role.
    pub can_edit: bool,
    /// Show the delete button for the selected role. Never set for system roles.
    pub can_delete: bool,
    /// Show assignment controls.
    pub can_assign: bool,
}

/// Role member row with its remove affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMember {
    /// Member data.
    pub member: RoleMember,
    /// Whether a remove control is offered.
    pub removable: bool,
}

/// Rendered console state returned after every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSnapshot {
    /// Session id.
    pub session_id: ConsoleSessionId,
    /// Current view.
    pub view: ConsoleView,
    /// Role list, ordered by name.
    pub roles: Vec<Role>,
    /// Role the view is focused on.
    pub selected_role: Option<Role>,
    /// Members of the selected role in details and assignment views.
    pub members: Vec<ConsoleMember>,
    /// Pending notifications.
    pub notifications: Vec<Notification>,
    /// Inline form errors.
    pub form_errors: RoleFieldErrors,
    /// Validation message of the last rejected submission.
    pub form_message: Option<String>,
    /// Allowed actions.
    pub affordances: ConsoleAffordances,
}

/// Application service driving role management console sessions.
#[derive(Clone)]
pub struct RoleConsoleService {
    authorization_service: AuthorizationService,
    role_service: RoleService,
    assignment_service: RoleAssignmentService,
    session_repository: Arc<dyn ConsoleSessionRepository>,
}

impl RoleConsoleService {
    /// Creates a new console service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        role_service: RoleService,
        assignment_service: RoleAssignmentService,
        session_repository: Arc<dyn ConsoleSessionRepository>,
    ) -> Self {
        Self {
            authorization_service,
            role_service,
            assignment_service,
            session_repository,
        }
    }

    /// Opens a session on the role list.
    pub async fn open_session(&self, actor: &UserIdentity) -> AppResult<ConsoleSnapshot> {
        let session = ConsoleSession::open(actor.user_id());
        self.session_repository
            .create_session(session.clone())
            .await?;

        info!(session_id = %session.id, user_id = %actor.user_id(), "console session opened");
        Ok(self.render(actor, &session).await)
    }

    /// Renders a session without changing it.
    pub async fn snapshot(
        &self,
        actor: &UserIdentity,
        session_id: ConsoleSessionId,
    ) -> AppResult<ConsoleSnapshot> {
        let session = self.load_session(actor.user_id(), session_id).await?;
        Ok(self.render(actor, &session).await)
    }

    /// Applies one command and returns the new rendering.
    ///
    /// Command failures become notifications or inline form errors; only
    /// session lookup and persistence failures are returned.
    pub async fn dispatch(
        &self,
        actor: &UserIdentity,
        session_id: ConsoleSessionId,
        command: ConsoleCommand,
    ) -> AppResult<ConsoleSnapshot> {
        let mut session = self.load_session(actor.user_id(), session_id).await?;
        self.apply(actor, &mut session.state, command).await;
        self.session_repository.save_session(session.clone()).await?;

        Ok(self.render(actor, &session).await)
    }

    /// Discards a session.
    pub async fn close_session(
        &self,
        actor: &UserIdentity,
        session_id: ConsoleSessionId,
    ) -> AppResult<()> {
        self.load_session(actor.user_id(), session_id).await?;
        self.session_repository.delete_session(session_id).await?;

        info!(session_id = %session_id, "console session closed");
        Ok(())
    }

    async fn load_session(
        &self,
        owner: UserId,
        session_id: ConsoleSessionId,
    ) -> AppResult<ConsoleSession> {
        self.session_repository
            .find_session(session_id)
            .await?
            .filter(|session| session.owner == owner)
            .ok_or_else(|| {
                AppError::NotFound(format!("console session '{session_id}' does not exist"))
            })
    }

    async fn apply(&self, actor: &UserIdentity, state: &mut ConsoleState, command: ConsoleCommand) {
        match command {
            ConsoleCommand::ShowList | ConsoleCommand::Back => state.navigate(ConsoleView::List),
            ConsoleCommand::ShowDetails(role_id) => {
                self.open_role_view(state, role_id, ConsoleView::Details { role_id })
                    .await;
            }
            ConsoleCommand::StartCreate => state.navigate(ConsoleView::Create {
                draft: RoleDraft::default(),
            }),
            ConsoleCommand::StartEdit(role_id) => {
                let view = ConsoleView::Edit {
                    role_id,
                    pending: None,
                };
                self.open_role_view(state, role_id, view).await;
            }
            ConsoleCommand::StartAssignment(role_id) => {
                self.open_role_view(state, role_id, ConsoleView::Assignment { role_id })
                    .await;
            }
            ConsoleCommand::SubmitCreate(draft) => self.submit_create(actor, state, draft).await,
            ConsoleCommand::SubmitEdit(patch) => self.submit_edit(actor, state, patch).await,
            ConsoleCommand::Delete(role_id) => {
                match self.role_service.delete_role(actor, role_id).await {
                    Ok(()) => {
                        state.navigate(ConsoleView::List);
                        state.notify(NotificationLevel::Success, "Role deleted");
                    }
                    Err(error) => report(state, &error),
                }
            }
            ConsoleCommand::Assign(user_id) => self.assign(actor, state, user_id).await,
            ConsoleCommand::Unassign(user_id) => self.unassign(actor, state, user_id).await,
            ConsoleCommand::DismissNotification(notification_id) => {
                state.dismiss(notification_id);
            }
        }
    }

    async fn open_role_view(&self, state: &mut ConsoleState, role_id: RoleId, view: ConsoleView) {
        match self.role_service.find_role(role_id).await {
            Ok(_) => state.navigate(view),
            Err(error) => report(state, &error),
        }
    }

    async fn submit_create(&self, actor: &UserIdentity, state: &mut ConsoleState, draft: RoleDraft) {
        match self.role_service.create_role(actor, draft.clone()).await {
            Ok(role) => {
                state.navigate(ConsoleView::Details { role_id: role.id() });
                state.notify(
                    NotificationLevel::Success,
                    format!("Role '{}' created", role.name()),
                );
            }
            Err(AppError::Validation(message)) => {
                let errors = draft.field_errors();
                state.reject_form(ConsoleView::Create { draft }, errors, message);
            }
            Err(error) => report(state, &error),
        }
    }

    async fn submit_edit(&self, actor: &UserIdentity, state: &mut ConsoleState, patch: RolePatch) {
        let ConsoleView::Edit { role_id, .. } = *state.view() else {
            state.notify(NotificationLevel::Error, "No role is open for editing");
            return;
        };

        match self
            .role_service
            .update_role(actor, role_id, patch.clone())
            .await
        {
            Ok(role) => {
                state.navigate(ConsoleView::Details { role_id });
                state.notify(
                    NotificationLevel::Success,
                    format!("Role '{}' updated", role.name()),
                );
            }
            Err(AppError::Validation(message)) => {
                let errors = self
                    .role_service
                    .find_role(role_id)
                    .await
                    .map(|role| role.patch_errors(&patch))
                    .unwrap_or_default();
                let view = ConsoleView::Edit {
                    role_id,
                    pending: Some(patch),
                };
                state.reject_form(view, errors, message);
            }
            Err(error) => report(state, &error),
        }
    }

    async fn assign(&self, actor: &UserIdentity, state: &mut ConsoleState, user_id: UserId) {
        let ConsoleView::Assignment { role_id } = *state.view() else {
            state.notify(NotificationLevel::Error, "No role is open for assignment");
            return;
        };

        match self
            .assignment_service
            .assign_role_to_user(actor, user_id, role_id)
            .await
        {
            Ok(AssignmentOutcome::Assigned) => {
                state.notify(NotificationLevel::Success, "Role assigned");
            }
            Ok(AssignmentOutcome::AlreadyAssigned) => {
                state.notify(NotificationLevel::Info, "User already holds this role");
            }
            Err(error) => report(state, &error),
        }
    }

    async fn unassign(&self, actor: &UserIdentity, state: &mut ConsoleState, user_id: UserId) {
        let ConsoleView::Assignment { role_id } = *state.view() else {
            state.notify(NotificationLevel::Error, "No role is open for assignment");
            return;
        };

        match self
            .assignment_service
            .remove_role_from_user(actor, user_id, role_id)
            .await
        {
            Ok(()) => {
                state.notify(NotificationLevel::Success, "Role removed from user");
            }
            Err(error) => report(state, &error),
        }
    }

    async fn render(&self, actor: &UserIdentity, session: &ConsoleSession) -> ConsoleSnapshot {
        let state = &session.state;
        let roles = self.role_service.list_roles().await;
        let guard = match self.authorization_service.guard_for(actor.user_id()).await {
            Ok(guard) => guard,
            Err(error) => {
                warn!(error = %error, "could not resolve console user roles");
                AccessGuard::default()
            }
        };

        let selected_role = match state.view().role_id() {
            Some(role_id) => match self.role_service.find_role(role_id).await {
                Ok(role) => Some(role),
                Err(error) => {
                    warn!(error = %error, role_id = %role_id, "selected role is unavailable");
                    None
                }
            },
            None => None,
        };

        let affordances = affordances(&guard, selected_role.as_ref());
        let members = match (state.view(), selected_role.as_ref()) {
            (ConsoleView::Details { .. } | ConsoleView::Assignment { .. }, Some(role)) => {
                self.members(role, affordances.can_assign).await
            }
            _ => Vec::new(),
        };

        ConsoleSnapshot {
            session_id: session.id,
            view: state.view().clone(),
            roles,
            selected_role,
            members,
            notifications: state.notifications().to_vec(),
            form_errors: state.form_errors().clone(),
            form_message: state.form_message().map(str::to_owned),
            affordances,
        }
    }

    async fn members(&self, role: &Role, can_assign: bool) -> Vec<ConsoleMember> {
        match self.assignment_service.list_role_members(role.id()).await {
            Ok(members) => members
                .into_iter()
                .map(|member| ConsoleMember {
                    member,
                    removable: can_assign && !role.is_system(),
                })
                .collect(),
            Err(error) => {
                warn!(error = %error, role_id = %role.id(), "could not list role members");
                Vec::new()
            }
        }
    }
}

fn affordances(guard: &AccessGuard, selected_role: Option<&Role>) -> ConsoleAffordances {
    let allows = |permission: &str| {
        PermissionGuard::new(permission).decide(guard.roles()) == GuardDecision::Protected
    };
    let can_manage = allows(ROLE_MANAGE);

    ConsoleAffordances {
        can_create: can_manage,
        can_edit: can_manage && selected_role.is_some(),
        can_delete: can_manage && selected_role.is_some_and(|role| !role.is_system()),
        can_assign: allows(ROLE_ASSIGN),
    }
}

fn report(state: &mut ConsoleState, error: &AppError) {
    state.notify(NotificationLevel::Error, error.message());
}
