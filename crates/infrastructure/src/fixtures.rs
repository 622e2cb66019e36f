//! Static demo data backing the in-memory data source.
//!
//! System role ids match the rows seeded by the SQL migrations.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use sprintboard_application::RoleAssignment;
use sprintboard_core::{AppResult, UserId, UserIdentity};
use sprintboard_domain::{Role, RoleId, RoleRecord};

/// Built-in full-access role.
pub const ADMIN_ROLE_ID: RoleId =
    RoleId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001));
/// Demo custom role for delivery leads.
pub const PROJECT_MANAGER_ROLE_ID: RoleId =
    RoleId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0002));
/// Demo custom role for engineers.
pub const DEVELOPER_ROLE_ID: RoleId =
    RoleId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0003));
/// Built-in default read-only role.
pub const VIEWER_ROLE_ID: RoleId =
    RoleId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0004));

const ADMIN_USER: u128 = 0x0000_0000_0000_4000_8000_0000_0000_0101;
const MANAGER_USER: u128 = 0x0000_0000_0000_4000_8000_0000_0000_0102;
const DEVELOPER_USER: u128 = 0x0000_0000_0000_4000_8000_0000_0000_0103;
const VIEWER_USER: u128 = 0x0000_0000_0000_4000_8000_0000_0000_0104;

struct RoleSeed {
    id: RoleId,
    name: &'static str,
    description: &'static str,
    is_default: bool,
    is_system: bool,
    permissions: &'static [&'static str],
}

const ROLE_SEEDS: [RoleSeed; 4] = [
    RoleSeed {
        id: ADMIN_ROLE_ID,
        name: "Admin",
        description: "Full access to every workspace capability",
        is_default: false,
        is_system: true,
        permissions: &["*"],
    },
    RoleSeed {
        id: PROJECT_MANAGER_ROLE_ID,
        name: "Project Manager",
        description: "Plans projects and sprints and staffs the team",
        is_default: false,
        is_system: false,
        permissions: &[
            "project:create",
            "project:read",
            "project:update",
            "project:manage",
            "epic:create",
            "epic:read",
            "epic:update",
            "epic:delete",
            "story:read",
            "story:assign",
            "task:read",
            "task:assign",
            "sprint:create",
            "sprint:read",
            "sprint:update",
            "sprint:manage",
            "team:read",
            "team:assign",
            "role:read",
        ],
    },
    RoleSeed {
        id: DEVELOPER_ROLE_ID,
        name: "Developer",
        description: "Works on stories and tasks within sprints",
        is_default: false,
        is_system: false,
        permissions: &[
            "project:read",
            "epic:read",
            "story:create",
            "story:read",
            "story:update",
            "task:create",
            "task:read",
            "task:update",
            "sprint:read",
            "team:read",
        ],
    },
    RoleSeed {
        id: VIEWER_ROLE_ID,
        name: "Viewer",
        description: "Read-only access to planning data",
        is_default: true,
        is_system: true,
        permissions: &[
            "project:read",
            "epic:read",
            "story:read",
            "task:read",
            "sprint:read",
        ],
    },
];

/// Returns the demo roles stamped with the given time.
pub fn roles(now: DateTime<Utc>) -> AppResult<Vec<Role>> {
    ROLE_SEEDS
        .iter()
        .map(|seed| {
            Role::from_record(RoleRecord {
                id: seed.id,
                name: seed.name.to_owned(),
                description: seed.description.to_owned(),
                is_default: seed.is_default,
                is_system: seed.is_system,
                permissions: seed.permissions.iter().map(|id| (*id).to_owned()).collect(),
                created_at: now,
                updated_at: now,
            })
        })
        .collect()
}

/// Returns the demo users.
#[must_use]
pub fn users() -> Vec<UserIdentity> {
    vec![
        UserIdentity::new(
            UserId::from_uuid(Uuid::from_u128(ADMIN_USER)),
            "ada@sprintboard.dev",
            Some("Ada Lovelace".to_owned()),
        ),
        UserIdentity::new(
            UserId::from_uuid(Uuid::from_u128(MANAGER_USER)),
            "grace@sprintboard.dev",
            Some("Grace Hopper".to_owned()),
        ),
        UserIdentity::new(
            UserId::from_uuid(Uuid::from_u128(DEVELOPER_USER)),
            "linus@sprintboard.dev",
            None,
        ),
        UserIdentity::new(
            UserId::from_uuid(Uuid::from_u128(VIEWER_USER)),
            "margaret@sprintboard.dev",
            Some("Margaret Hamilton".to_owned()),
        ),
    ]
}

/// Returns one assignment per demo user.
#[must_use]
pub fn assignments(now: DateTime<Utc>) -> Vec<RoleAssignment> {
    [
        (ADMIN_USER, ADMIN_ROLE_ID),
        (MANAGER_USER, PROJECT_MANAGER_ROLE_ID),
        (DEVELOPER_USER, DEVELOPER_ROLE_ID),
        (VIEWER_USER, VIEWER_ROLE_ID),
    ]
    .into_iter()
    .map(|(user, role_id)| RoleAssignment {
        user_id: UserId::from_uuid(Uuid::from_u128(user)),
        role_id,
        assigned_at: now,
    })
    .collect()
}
