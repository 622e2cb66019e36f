use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Serialize;
use sprintboard_core::{AppError, AppResult};

/// Sentinel permission id granting every permission, present and future.
pub const WILDCARD_PERMISSION: &str = "*";

/// Shows role screens in clients. Role reads on the server are not gated by it.
pub const ROLE_READ: &str = "role:read";
/// Allows creating, editing and deleting roles.
pub const ROLE_MANAGE: &str = "role:manage";
/// Allows granting and revoking roles for users.
pub const ROLE_ASSIGN: &str = "role:assign";

/// Grouping key for catalog permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    /// Project-level capabilities.
    Project,
    /// Epic capabilities.
    Epic,
    /// Story capabilities.
    Story,
    /// Task capabilities.
    Task,
    /// Sprint planning capabilities.
    Sprint,
    /// Team administration capabilities.
    Team,
    /// System and access-control capabilities.
    System,
}

impl PermissionCategory {
    /// Returns a stable storage value for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Epic => "epic",
            Self::Story => "story",
            Self::Task => "task",
            Self::Sprint => "sprint",
            Self::Team => "team",
            Self::System => "system",
        }
    }
}

impl FromStr for PermissionCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "project" => Ok(Self::Project),
            "epic" => Ok(Self::Epic),
            "story" => Ok(Self::Story),
            "task" => Ok(Self::Task),
            "sprint" => Ok(Self::Sprint),
            "team" => Ok(Self::Team),
            "system" => Ok(Self::System),
            _ => Err(AppError::Validation(format!(
                "unknown permission category '{value}'"
            ))),
        }
    }
}

/// Verb a permission grants on its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// Create new items.
    Create,
    /// View items.
    Read,
    /// Edit items.
    Update,
    /// Remove items.
    Delete,
    /// Administer items and their settings.
    Manage,
    /// Assign items to people.
    Assign,
}

impl PermissionAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Manage => "manage",
            Self::Assign => "assign",
        }
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "manage" => Ok(Self::Manage),
            "assign" => Ok(Self::Assign),
            _ => Err(AppError::Validation(format!(
                "unknown permission action '{value}'"
            ))),
        }
    }
}

/// Atomic capability that roles can grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permission {
    id: String,
    name: String,
    description: String,
    category: PermissionCategory,
    action: PermissionAction,
}

impl Permission {
    /// Creates a permission entry.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: PermissionCategory,
        action: PermissionAction,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category,
            action,
        }
    }

    /// Returns the stable permission id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the display description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the grouping category.
    #[must_use]
    pub fn category(&self) -> PermissionCategory {
        self.category
    }

    /// Returns the granted action.
    #[must_use]
    pub fn action(&self) -> PermissionAction {
        self.action
    }
}

/// Ordered, immutable set of permissions known to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCatalog {
    permissions: Vec<Permission>,
}

static STANDARD_CATALOG: LazyLock<PermissionCatalog> = LazyLock::new(|| PermissionCatalog {
    permissions: standard_permissions(),
});

impl PermissionCatalog {
    /// Creates a catalog, rejecting blank, wildcard or duplicated ids.
    pub fn new(permissions: Vec<Permission>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for permission in &permissions {
            let id = permission.id();
            if id.trim().is_empty() || id == WILDCARD_PERMISSION {
                return Err(AppError::Validation(format!(
                    "permission id '{id}' is not a valid catalog id"
                )));
            }

            if !seen.insert(id) {
                return Err(AppError::Validation(format!(
                    "permission id '{id}' appears more than once in the catalog"
                )));
            }
        }

        Ok(Self { permissions })
    }

    /// Returns the catalog shipped with the application.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_CATALOG
    }

    /// Returns every permission in catalog order.
    #[must_use]
    pub fn list_permissions(&self) -> &[Permission] {
        self.permissions.as_slice()
    }

    /// Finds a permission by id.
    #[must_use]
    pub fn find(&self, permission_id: &str) -> Option<&Permission> {
        self.permissions
            .iter()
            .find(|permission| permission.id() == permission_id)
    }

    /// Returns whether the catalog knows the permission id.
    #[must_use]
    pub fn contains(&self, permission_id: &str) -> bool {
        self.find(permission_id).is_some()
    }

    /// Groups permissions by category, keeping catalog order inside each group.
    #[must_use]
    pub fn grouped_by_category(&self) -> BTreeMap<PermissionCategory, Vec<&Permission>> {
        let mut groups: BTreeMap<PermissionCategory, Vec<&Permission>> = BTreeMap::new();
        for permission in &self.permissions {
            groups
                .entry(permission.category())
                .or_default()
                .push(permission);
        }

        groups
    }
}

fn standard_permissions() -> Vec<Permission> {
    use PermissionAction::{Assign, Create, Delete, Manage, Read, Update};
    use PermissionCategory::{Epic, Project, Sprint, Story, System, Task, Team};

    const DEFINITIONS: &[(&str, &str, &str, PermissionCategory, PermissionAction)] = &[
        ("project:create", "Create projects", "Start new projects", Project, Create),
        ("project:read", "View projects", "Open projects and their boards", Project, Read),
        ("project:update", "Edit projects", "Change project details", Project, Update),
        ("project:delete", "Delete projects", "Remove projects permanently", Project, Delete),
        ("project:manage", "Manage projects", "Change project settings and members", Project, Manage),
        ("epic:create", "Create epics", "Add epics to a project", Epic, Create),
        ("epic:read", "View epics", "See epics and their progress", Epic, Read),
        ("epic:update", "Edit epics", "Change epic details and status", Epic, Update),
        ("epic:delete", "Delete epics", "Remove epics from a project", Epic, Delete),
        ("story:create", "Create stories", "Add user stories to epics", Story, Create),
        ("story:read", "View stories", "See stories and acceptance criteria", Story, Read),
        ("story:update", "Edit stories", "Change story details, points and status", Story, Update),
        ("story:delete", "Delete stories", "Remove stories", Story, Delete),
        ("story:assign", "Assign stories", "Set the owner of a story", Story, Assign),
        ("task:create", "Create tasks", "Break stories down into tasks", Task, Create),
        ("task:read", "View tasks", "See tasks on the board", Task, Read),
        ("task:update", "Edit tasks", "Change task details and move tasks", Task, Update),
        ("task:delete", "Delete tasks", "Remove tasks", Task, Delete),
        ("task:assign", "Assign tasks", "Set the assignee of a task", Task, Assign),
        ("sprint:create", "Create sprints", "Plan new sprints", Sprint, Create),
        ("sprint:read", "View sprints", "See sprint scope and burndown", Sprint, Read),
        ("sprint:update", "Edit sprints", "Change sprint dates and scope", Sprint, Update),
        ("sprint:delete", "Delete sprints", "Remove sprints", Sprint, Delete),
        ("sprint:manage", "Run sprints", "Start and complete sprints", Sprint, Manage),
        ("team:read", "View team", "See team members and their roles", Team, Read),
        ("team:manage", "Manage team", "Invite and remove team members", Team, Manage),
        ("team:assign", "Assign team members", "Add members to project teams", Team, Assign),
        (
            ROLE_READ,
            "View roles",
            "Advisory: shows role screens in the UI; role reads are open to signed-in users",
            System,
            Read,
        ),
        (ROLE_MANAGE, "Manage roles", "Create, edit and delete roles", System, Manage),
        (ROLE_ASSIGN, "Assign roles", "Grant and revoke roles for users", System, Assign),
        ("settings:manage", "Manage settings", "Change workspace-wide settings", System, Manage),
    ];

    DEFINITIONS
        .iter()
        .map(|(id, name, description, category, action)| {
            Permission::new(*id, *name, *description, *category, *action)
        })
        .collect()
}
