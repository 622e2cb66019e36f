use std::fmt::{Display, Formatter};
use std::str::FromStr;

use sprintboard_core::{AppError, UserId};
use sprintboard_domain::{RoleDraft, RoleFieldErrors, RoleId, RolePatch};
use uuid::Uuid;

/// Notifications retained per session; older ones are dropped first.
pub const MAX_NOTIFICATIONS: usize = 20;

/// Identifier of one console session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsoleSessionId(Uuid);

impl ConsoleSessionId {
    /// Creates a random session identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the wrapped UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ConsoleSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ConsoleSessionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(formatter)
    }
}

impl FromStr for ConsoleSessionId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid session id '{value}': {error}")))
    }
}

/// Screen currently shown by the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleView {
    /// All roles.
    List,
    /// One role with its members.
    Details {
        /// Selected role.
        role_id: RoleId,
    },
    /// New role form.
    Create {
        /// Last submitted form input.
        draft: RoleDraft,
    },
    /// Edit form for an existing role.
    Edit {
        /// Role being edited.
        role_id: RoleId,
        /// Last rejected submission, kept so the form can be redisplayed.
        pending: Option<RolePatch>,
    },
    /// User assignment screen for one role.
    Assignment {
        /// Role being assigned.
        role_id: RoleId,
    },
}

impl ConsoleView {
    /// Returns the view discriminant.
    #[must_use]
    pub fn kind(&self) -> ConsoleViewKind {
        match self {
            Self::List => ConsoleViewKind::List,
            Self::Details { .. } => ConsoleViewKind::Details,
            Self::Create { .. } => ConsoleViewKind::Create,
            Self::Edit { .. } => ConsoleViewKind::Edit,
            Self::Assignment { .. } => ConsoleViewKind::Assignment,
        }
    }

    /// Returns the role the view is focused on, if any.
    #[must_use]
    pub fn role_id(&self) -> Option<RoleId> {
        match self {
            Self::Details { role_id } | Self::Edit { role_id, .. } | Self::Assignment { role_id } => {
                Some(*role_id)
            }
            Self::List | Self::Create { .. } => None,
        }
    }
}

/// Console view discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleViewKind {
    /// Role list.
    List,
    /// Role details.
    Details,
    /// Create form.
    Create,
    /// Edit form.
    Edit,
    /// Assignment screen.
    Assignment,
}

impl ConsoleViewKind {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "LIST",
            Self::Details => "DETAILS",
            Self::Create => "CREATE",
            Self::Edit => "EDIT",
            Self::Assignment => "ASSIGNMENT",
        }
    }
}

/// Severity of a console notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Neutral outcome such as an already existing assignment.
    Info,
    /// Completed mutation.
    Success,
    /// Failed command.
    Error,
}

impl NotificationLevel {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Dismissible message shown to the console user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Session-unique id used for dismissal.
    pub id: u64,
    /// Severity.
    pub level: NotificationLevel,
    /// Display text.
    pub message: String,
}

/// Commands accepted by the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Go to the role list.
    ShowList,
    /// Show one role.
    ShowDetails(RoleId),
    /// Open an empty create form.
    StartCreate,
    /// Open the edit form for a role.
    StartEdit(RoleId),
    /// Open the assignment screen for a role.
    StartAssignment(RoleId),
    /// Submit the create form.
    SubmitCreate(RoleDraft),
    /// Submit the edit form of the current role.
    SubmitEdit(RolePatch),
    /// Delete a role.
    Delete(RoleId),
    /// Assign the current role to a user.
    Assign(UserId),
    /// Remove the current role from a user.
    Unassign(UserId),
    /// Drop one notification.
    DismissNotification(u64),
    /// Return to the role list.
    Back,
}

/// Mutable per-session console state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleState {
    view: ConsoleView,
    form_errors: RoleFieldErrors,
    form_message: Option<String>,
    notifications: Vec<Notification>,
    next_notification_id: u64,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            view: ConsoleView::List,
            form_errors: RoleFieldErrors::default(),
            form_message: None,
            notifications: Vec::new(),
            next_notification_id: 1,
        }
    }
}

impl ConsoleState {
    /// Returns the current view.
    #[must_use]
    pub fn view(&self) -> &ConsoleView {
        &self.view
    }

    /// Returns inline errors of the open form.
    #[must_use]
    pub fn form_errors(&self) -> &RoleFieldErrors {
        &self.form_errors
    }

    /// Returns the validation message of the last rejected submission.
    #[must_use]
    pub fn form_message(&self) -> Option<&str> {
        self.form_message.as_deref()
    }

    /// Returns pending notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.notifications.as_slice()
    }

    /// Switches view and clears form errors.
    pub fn navigate(&mut self, view: ConsoleView) {
        self.view = view;
        self.form_errors = RoleFieldErrors::default();
        self.form_message = None;
    }

    /// Keeps the form open with inline errors.
    pub fn reject_form(&mut self, view: ConsoleView, errors: RoleFieldErrors, message: String) {
        self.view = view;
        self.form_errors = errors;
        self.form_message = Some(message);
    }

    /// Appends a notification and returns its id.
    ///
    /// Only the newest [`MAX_NOTIFICATIONS`] are kept.
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(Notification {
            id,
            level,
            message: message.into(),
        });
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let overflow = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..overflow);
        }
        id
    }

    /// Removes a notification. Returns whether it existed.
    pub fn dismiss(&mut self, notification_id: u64) -> bool {
        let before = self.notifications.len();
        self.notifications
            .retain(|notification| notification.id != notification_id);
        self.notifications.len() != before
    }
}

/// Console session owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSession {
    /// Session id.
    pub id: ConsoleSessionId,
    /// User that opened the session.
    pub owner: UserId,
    /// Current state.
    pub state: ConsoleState,
}

impl ConsoleSession {
    /// Opens a fresh session on the role list.
    #[must_use]
    pub fn open(owner: UserId) -> Self {
        Self {
            id: ConsoleSessionId::new(),
            owner,
            state: ConsoleState::default(),
        }
    }
}
