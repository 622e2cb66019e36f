use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use sprintboard_core::{AppError, AppResult, UserId, UserIdentity};
use sprintboard_domain::{AuditAction, Role, RoleId, RolePermissions};

use crate::access_ports::{
    AuditEvent, AuditRepository, RoleAssignment, RoleAssignmentRepository, RoleRepository,
    UserDirectory,
};
use crate::role_console_service::{ConsoleSession, ConsoleSessionId, ConsoleSessionRepository};
use crate::{AuthorizationService, RoleAssignmentService, RoleConsoleService, RoleService};

#[derive(Default)]
pub(crate) struct FakeRoleRepository {
    roles: Mutex<Vec<Role>>,
    fail_reads: Mutex<bool>,
    fail_writes: Mutex<bool>,
}

impl FakeRoleRepository {
    fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: Mutex::new(roles),
            ..Self::default()
        }
    }

    pub(crate) async fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().await = fail;
    }

    pub(crate) async fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().await = fail;
    }

    pub(crate) async fn stored(&self) -> Vec<Role> {
        self.roles.lock().await.clone()
    }

    async fn check_reads(&self) -> AppResult<()> {
        if *self.fail_reads.lock().await {
            return Err(AppError::Store("role store unreachable".to_owned()));
        }
        Ok(())
    }

    async fn check_writes(&self) -> AppResult<()> {
        if *self.fail_writes.lock().await {
            return Err(AppError::Store("role store rejected the write".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl RoleRepository for FakeRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.check_reads().await?;
        Ok(self.roles.lock().await.clone())
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        self.check_reads().await?;
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.id() == role_id)
            .cloned())
    }

    async fn insert_role(&self, role: Role) -> AppResult<()> {
        self.check_writes().await?;
        self.roles.lock().await.push(role);
        Ok(())
    }

    async fn save_role(&self, role: Role) -> AppResult<()> {
        self.check_writes().await?;
        let mut roles = self.roles.lock().await;
        let Some(stored) = roles.iter_mut().find(|stored| stored.id() == role.id()) else {
            return Err(AppError::NotFound(format!("role '{}' does not exist", role.id())));
        };
        *stored = role;
        Ok(())
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<bool> {
        self.check_writes().await?;
        let mut roles = self.roles.lock().await;
        let before = roles.len();
        roles.retain(|role| role.id() != role_id);
        Ok(roles.len() != before)
    }
}

#[derive(Default)]
pub(crate) struct FakeAssignmentRepository {
    assignments: Mutex<Vec<RoleAssignment>>,
}

impl FakeAssignmentRepository {
    pub(crate) async fn stored(&self) -> Vec<RoleAssignment> {
        self.assignments.lock().await.clone()
    }
}

#[async_trait]
impl RoleAssignmentRepository for FakeAssignmentRepository {
    async fn list_assignments_for_user(&self, user_id: UserId) -> AppResult<Vec<RoleAssignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| assignment.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_assignments_for_role(&self, role_id: RoleId) -> AppResult<Vec<RoleAssignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| assignment.role_id == role_id)
            .cloned()
            .collect())
    }

    async fn insert_assignment(&self, assignment: RoleAssignment) -> AppResult<()> {
        let mut assignments = self.assignments.lock().await;
        if !assignments.iter().any(|stored| {
            stored.user_id == assignment.user_id && stored.role_id == assignment.role_id
        }) {
            assignments.push(assignment);
        }
        Ok(())
    }

    async fn delete_assignment(&self, user_id: UserId, role_id: RoleId) -> AppResult<bool> {
        let mut assignments = self.assignments.lock().await;
        let before = assignments.len();
        assignments.retain(|stored| !(stored.user_id == user_id && stored.role_id == role_id));
        Ok(assignments.len() != before)
    }

    async fn delete_assignments_for_role(&self, role_id: RoleId) -> AppResult<u64> {
        let mut assignments = self.assignments.lock().await;
        let before = assignments.len();
        assignments.retain(|stored| stored.role_id != role_id);
        Ok(u64::try_from(before - assignments.len()).unwrap_or(u64::MAX))
    }
}

pub(crate) struct FakeUserDirectory {
    users: Vec<UserIdentity>,
}

#[async_trait]
impl UserDirectory for FakeUserDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserIdentity>> {
        Ok(self
            .users
            .iter()
            .find(|user| user.user_id() == user_id)
            .cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<UserIdentity>> {
        Ok(self.users.clone())
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    events: Mutex<Vec<AuditEvent>>,
}

impl FakeAuditRepository {
    pub(crate) async fn actions(&self) -> Vec<AuditAction> {
        self.events
            .lock()
            .await
            .iter()
            .map(|event| event.action)
            .collect()
    }
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeConsoleSessionRepository {
    sessions: Mutex<HashMap<ConsoleSessionId, ConsoleSession>>,
}

#[async_trait]
impl ConsoleSessionRepository for FakeConsoleSessionRepository {
    async fn create_session(&self, session: ConsoleSession) -> AppResult<()> {
        self.sessions.lock().await.insert(session.id, session);
        Ok(())
    }

    async fn find_session(
        &self,
        session_id: ConsoleSessionId,
    ) -> AppResult<Option<ConsoleSession>> {
        Ok(self.sessions.lock().await.get(&session_id).cloned())
    }

    async fn save_session(&self, session: ConsoleSession) -> AppResult<()> {
        self.sessions.lock().await.insert(session.id, session);
        Ok(())
    }

    async fn delete_session(&self, session_id: ConsoleSessionId) -> AppResult<bool> {
        Ok(self.sessions.lock().await.remove(&session_id).is_some())
    }
}

/// Services wired over fakes seeded with an Admin and a Viewer role.
pub(crate) struct Harness {
    pub(crate) roles: Arc<FakeRoleRepository>,
    pub(crate) assignments: Arc<FakeAssignmentRepository>,
    pub(crate) audit: Arc<FakeAuditRepository>,
    pub(crate) sessions: Arc<FakeConsoleSessionRepository>,
    users: Arc<FakeUserDirectory>,
    pub(crate) admin: UserIdentity,
    pub(crate) member: UserIdentity,
    pub(crate) guest: UserIdentity,
    pub(crate) admin_role: Role,
    pub(crate) viewer_role: Role,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let now = Utc::now();
        let Ok(admin_role) = Role::system(
            RoleId::new(),
            "Admin",
            "Full access to everything",
            false,
            RolePermissions::All,
            now,
        ) else {
            panic!("admin fixture should build");
        };
        let Ok(viewer_grants) = RolePermissions::from_ids([
            "project:read",
            "epic:read",
            "story:read",
            "task:read",
            "sprint:read",
        ]) else {
            panic!("viewer grants should build");
        };
        let Ok(viewer_role) = Role::system(
            RoleId::new(),
            "Viewer",
            "Read-only access to planning data",
            true,
            viewer_grants,
            now,
        ) else {
            panic!("viewer fixture should build");
        };

        let admin = UserIdentity::new(
            UserId::new(),
            "alice@sprintboard.test",
            Some("Alice Admin".to_owned()),
        );
        let member = UserIdentity::new(UserId::new(), "bob@sprintboard.test", None);
        let guest = UserIdentity::new(
            UserId::new(),
            "carol@sprintboard.test",
            Some("Carol Guest".to_owned()),
        );

        let assignments = FakeAssignmentRepository {
            assignments: Mutex::new(vec![
                RoleAssignment {
                    user_id: admin.user_id(),
                    role_id: admin_role.id(),
                    assigned_at: now,
                },
                RoleAssignment {
                    user_id: member.user_id(),
                    role_id: viewer_role.id(),
                    assigned_at: now,
                },
            ]),
        };

        Self {
            roles: Arc::new(FakeRoleRepository::with_roles(vec![
                admin_role.clone(),
                viewer_role.clone(),
            ])),
            assignments: Arc::new(assignments),
            audit: Arc::new(FakeAuditRepository::default()),
            sessions: Arc::new(FakeConsoleSessionRepository::default()),
            users: Arc::new(FakeUserDirectory {
                users: vec![admin.clone(), member.clone(), guest.clone()],
            }),
            admin,
            member,
            guest,
            admin_role,
            viewer_role,
        }
    }

    pub(crate) async fn assign_directly(&self, user_id: UserId, role_id: RoleId) {
        let result = self
            .assignments
            .insert_assignment(RoleAssignment {
                user_id,
                role_id,
                assigned_at: Utc::now(),
            })
            .await;
        assert!(result.is_ok());
    }

    pub(crate) fn authorization_service(&self) -> AuthorizationService {
        AuthorizationService::new(self.roles.clone(), self.assignments.clone())
    }

    pub(crate) fn role_service(&self) -> RoleService {
        RoleService::new(
            self.authorization_service(),
            self.roles.clone(),
            self.assignments.clone(),
            self.audit.clone(),
        )
    }

    pub(crate) fn assignment_service(&self) -> RoleAssignmentService {
        RoleAssignmentService::new(
            self.authorization_service(),
            self.roles.clone(),
            self.assignments.clone(),
            self.users.clone(),
            self.audit.clone(),
        )
    }

    pub(crate) fn console_service(&self) -> RoleConsoleService {
        RoleConsoleService::new(
            self.authorization_service(),
            self.role_service(),
            self.assignment_service(),
            self.sessions.clone(),
        )
    }
}
