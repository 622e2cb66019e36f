//! Server-side state machine driving the role management console.

mod ports;
mod service;
mod state;

pub use ports::ConsoleSessionRepository;
pub use service::{ConsoleAffordances, ConsoleMember, ConsoleSnapshot, RoleConsoleService};
pub use state::{
    ConsoleCommand, ConsoleSession, ConsoleSessionId, ConsoleState, ConsoleView, ConsoleViewKind,
    MAX_NOTIFICATIONS, Notification, NotificationLevel,
};

#[cfg(test)]
mod tests;
