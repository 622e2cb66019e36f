use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sprintboard_core::{AppError, AppResult};
use uuid::Uuid;

use crate::permission::{PermissionCatalog, WILDCARD_PERMISSION};

/// Minimum role name length, in characters, after trimming.
pub const ROLE_NAME_MIN_LENGTH: usize = 2;

/// Minimum role description length, in characters, after trimming.
pub const ROLE_DESCRIPTION_MIN_LENGTH: usize = 5;

/// Unique identifier for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a random role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a role identifier from an existing UUID value.
    #[must_use]
    pub const fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for RoleId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid role id '{value}': {error}")))
    }
}

/// Grants held by a role: the wildcard or a set of concrete permission ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum RolePermissions {
    /// Every permission, including ones added to the catalog later.
    All,
    /// Exactly the listed permission ids.
    Only(BTreeSet<String>),
}

impl RolePermissions {
    /// Parses the transport form: `["*"]` or a list of concrete ids.
    pub fn from_ids<I, S>(ids: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut concrete = BTreeSet::new();
        let mut wildcard = false;

        for id in ids {
            let id = id.as_ref().trim();
            if id.is_empty() {
                return Err(AppError::Validation(
                    "permission ids must not be empty".to_owned(),
                ));
            }

            if id == WILDCARD_PERMISSION {
                wildcard = true;
            } else {
                concrete.insert(id.to_owned());
            }
        }

        match (wildcard, concrete.is_empty()) {
            (true, true) => Ok(Self::All),
            (true, false) => Err(AppError::Validation(format!(
                "'{WILDCARD_PERMISSION}' cannot be combined with other permission ids"
            ))),
            (false, _) => Ok(Self::Only(concrete)),
        }
    }

    /// Returns whether this is the wildcard grant.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns whether the permission id is granted.
    #[must_use]
    pub fn grants(&self, permission_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(permission_id),
        }
    }

    /// Returns the transport form.
    #[must_use]
    pub fn to_ids(&self) -> Vec<String> {
        match self {
            Self::All => vec![WILDCARD_PERMISSION.to_owned()],
            Self::Only(ids) => ids.iter().cloned().collect(),
        }
    }

    /// Returns concrete ids the catalog does not know about.
    #[must_use]
    pub fn unknown_ids<'a>(&'a self, catalog: &PermissionCatalog) -> Vec<&'a str> {
        match self {
            Self::All => Vec::new(),
            Self::Only(ids) => ids
                .iter()
                .map(String::as_str)
                .filter(|id| !catalog.contains(id))
                .collect(),
        }
    }
}

impl Default for RolePermissions {
    fn default() -> Self {
        Self::Only(BTreeSet::new())
    }
}

impl TryFrom<Vec<String>> for RolePermissions {
    type Error = AppError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_ids(value)
    }
}

impl From<RolePermissions> for Vec<String> {
    fn from(value: RolePermissions) -> Self {
        value.to_ids()
    }
}

/// Per-field validation messages for role forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleFieldErrors {
    /// Problem with the role name.
    pub name: Option<String>,
    /// Problem with the role description.
    pub description: Option<String>,
    /// Problem with the permission list.
    pub permissions: Option<String>,
}

impl RoleFieldErrors {
    /// Returns whether no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.permissions.is_none()
    }

    fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            return Ok(());
        }

        let message = [self.name, self.description, self.permissions]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("; ");
        Err(AppError::Validation(message))
    }
}

fn check_name(name: &str) -> Option<String> {
    (name.trim().chars().count() < ROLE_NAME_MIN_LENGTH).then(|| {
        format!("role name must be at least {ROLE_NAME_MIN_LENGTH} characters")
    })
}

fn check_description(description: &str) -> Option<String> {
    (description.trim().chars().count() < ROLE_DESCRIPTION_MIN_LENGTH).then(|| {
        format!("role description must be at least {ROLE_DESCRIPTION_MIN_LENGTH} characters")
    })
}

/// Persisted shape of a role, used by adapters to hydrate entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    /// Stable role identifier.
    pub id: RoleId,
    /// Role display name.
    pub name: String,
    /// Role description.
    pub description: String,
    /// Marks the role for automatic assignment to new users.
    pub is_default: bool,
    /// Marks a built-in role.
    pub is_system: bool,
    /// Permission ids in transport form.
    pub permissions: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Named bundle of permissions assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    id: RoleId,
    name: String,
    description: String,
    is_default: bool,
    is_system: bool,
    permissions: RolePermissions,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a built-in role that cannot be deleted.
    pub fn system(
        id: RoleId,
        name: impl Into<String>,
        description: impl Into<String>,
        is_default: bool,
        permissions: RolePermissions,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let name = name.into();
        let description = description.into();
        RoleFieldErrors {
            name: check_name(&name),
            description: check_description(&description),
            permissions: None,
        }
        .into_result()?;

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            description: description.trim().to_owned(),
            is_default,
            is_system: true,
            permissions,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a role from persisted state.
    pub fn from_record(record: RoleRecord) -> AppResult<Self> {
        let permissions = RolePermissions::from_ids(&record.permissions)?;
        RoleFieldErrors {
            name: check_name(&record.name),
            description: check_description(&record.description),
            permissions: None,
        }
        .into_result()?;

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            is_default: record.is_default,
            is_system: record.is_system,
            permissions,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the role description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns whether the role is flagged for new users.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns whether the role is built in.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns the granted permissions.
    #[must_use]
    pub fn permissions(&self) -> &RolePermissions {
        &self.permissions
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last mutation timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns per-field validation messages for the merged result of a patch.
    #[must_use]
    pub fn patch_errors(&self, patch: &RolePatch) -> RoleFieldErrors {
        RoleFieldErrors {
            name: patch.name.as_deref().and_then(check_name),
            description: patch.description.as_deref().and_then(check_description),
            permissions: patch.permissions.as_ref().and_then(|ids| {
                RolePermissions::from_ids(ids)
                    .err()
                    .map(validation_message)
            }),
        }
    }

    /// Returns a copy with the patch merged in and `updated_at` refreshed.
    pub fn apply(&self, patch: RolePatch, now: DateTime<Utc>) -> AppResult<Self> {
        self.patch_errors(&patch).into_result()?;

        let permissions = match patch.permissions {
            Some(ids) => RolePermissions::from_ids(&ids)?,
            None => self.permissions.clone(),
        };
        let name = patch.name.unwrap_or_else(|| self.name.clone());
        let description = patch
            .description
            .unwrap_or_else(|| self.description.clone());

        Ok(Self {
            id: self.id,
            name: name.trim().to_owned(),
            description: description.trim().to_owned(),
            is_default: patch.is_default.unwrap_or(self.is_default),
            is_system: self.is_system,
            permissions,
            created_at: self.created_at,
            updated_at: now,
        })
    }
}

fn validation_message(error: AppError) -> String {
    match error {
        AppError::Validation(message) => message,
        other => other.to_string(),
    }
}

/// Editable role form state, committed into a new [`Role`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    /// Role display name.
    pub name: String,
    /// Role description.
    pub description: String,
    /// Marks the role for automatic assignment to new users.
    #[serde(default)]
    pub is_default: bool,
    /// Permission ids in transport form.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RoleDraft {
    /// Starts a draft with name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Sets the default-role flag.
    #[must_use]
    pub fn default_role(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Adds a permission id.
    #[must_use]
    pub fn grant(mut self, permission_id: impl Into<String>) -> Self {
        self.permissions.push(permission_id.into());
        self
    }

    /// Replaces the grants with the wildcard.
    #[must_use]
    pub fn grant_all(mut self) -> Self {
        self.permissions = vec![WILDCARD_PERMISSION.to_owned()];
        self
    }

    /// Returns per-field validation messages.
    #[must_use]
    pub fn field_errors(&self) -> RoleFieldErrors {
        RoleFieldErrors {
            name: check_name(&self.name),
            description: check_description(&self.description),
            permissions: RolePermissions::from_ids(&self.permissions)
                .err()
                .map(validation_message),
        }
    }

    /// Validates the draft and produces a new custom role.
    pub fn commit(self, now: DateTime<Utc>) -> AppResult<Role> {
        self.field_errors().into_result()?;
        let permissions = RolePermissions::from_ids(&self.permissions)?;

        Ok(Role {
            id: RoleId::new(),
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            is_default: self.is_default,
            is_system: false,
            permissions,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial role update. System status is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePatch {
    /// New role name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New default-role flag.
    #[serde(default)]
    pub is_default: Option<bool>,
    /// Replacement permission ids in transport form.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl RolePatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.is_default.is_none()
            && self.permissions.is_none()
    }
}
