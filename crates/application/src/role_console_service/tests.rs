use sprintboard_core::{AppError, UserId};
use sprintboard_domain::{RoleDraft, RoleId, RolePatch};

use crate::test_support::Harness;

use super::{
    ConsoleCommand, ConsoleSnapshot, ConsoleView, ConsoleViewKind, MAX_NOTIFICATIONS,
    NotificationLevel,
};

async fn open(harness: &Harness) -> ConsoleSnapshot {
    let Ok(snapshot) = harness.console_service().open_session(&harness.admin).await else {
        panic!("session should open");
    };
    snapshot
}

async fn run(harness: &Harness, snapshot: &ConsoleSnapshot, command: ConsoleCommand) -> ConsoleSnapshot {
    let result = harness
        .console_service()
        .dispatch(&harness.admin, snapshot.session_id, command)
        .await;
    let Ok(next) = result else {
        panic!("dispatch should succeed");
    };
    next
}

#[tokio::test]
async fn new_session_shows_role_list() {
    let harness = Harness::new();
    let snapshot = open(&harness).await;

    assert_eq!(snapshot.view.kind(), ConsoleViewKind::List);
    assert_eq!(snapshot.roles.len(), 2);
    assert!(snapshot.affordances.can_create);
    assert!(snapshot.affordances.can_assign);
    assert!(!snapshot.affordances.can_delete);
}

#[tokio::test]
async fn successful_create_shows_details_of_new_role() {
    let harness = Harness::new();
    let snapshot = open(&harness).await;
    let snapshot = run(&harness, &snapshot, ConsoleCommand::StartCreate).await;
    assert_eq!(snapshot.view.kind(), ConsoleViewKind::Create);

    let draft = RoleDraft::new("Developer", "Builds features").grant("task:update");
    let snapshot = run(&harness, &snapshot, ConsoleCommand::SubmitCreate(draft)).await;

    let Some(selected) = snapshot.selected_role.as_ref() else {
        panic!("created role should be selected");
    };
    assert_eq!(
        snapshot.view,
        ConsoleView::Details {
            role_id: selected.id()
        }
    );
    assert_eq!(selected.name(), "Developer");
    assert!(snapshot.affordances.can_delete);
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].level, NotificationLevel::Success);
}

#[tokio::test]
async fn validation_failure_stays_on_form_with_inline_errors() {
    let harness = Harness::new();
    let snapshot = open(&harness).await;
    let snapshot = run(&harness, &snapshot, ConsoleCommand::StartCreate).await;

    let draft = RoleDraft::new("D", "Builds features");
    let snapshot = run(&harness, &snapshot, ConsoleCommand::SubmitCreate(draft.clone())).await;

    assert_eq!(snapshot.view, ConsoleView::Create { draft });
    assert!(snapshot.form_errors.name.is_some());
    assert!(snapshot.form_errors.description.is_none());
    assert!(snapshot.form_message.is_some());
    assert!(snapshot.notifications.is_empty());
    assert_eq!(harness.roles.stored().await.len(), 2);
}

#[tokio::test]
async fn edit_returns_to_details_and_rejections_keep_pending_patch() {
    let harness = Harness::new();
    let viewer = harness.viewer_role.id();
    let snapshot = open(&harness).await;
    let snapshot = run(&harness, &snapshot, ConsoleCommand::StartEdit(viewer)).await;
    assert_eq!(snapshot.view.kind(), ConsoleViewKind::Edit);

    let bad = RolePatch {
        description: Some("meh".to_owned()),
        ..RolePatch::default()
    };
    let snapshot = run(&harness, &snapshot, ConsoleCommand::SubmitEdit(bad.clone())).await;
    assert_eq!(
        snapshot.view,
        ConsoleView::Edit {
            role_id: viewer,
            pending: Some(bad)
        }
    );
    assert!(snapshot.form_errors.description.is_some());

    let good = RolePatch {
        description: Some("Read-only access for stakeholders".to_owned()),
        ..RolePatch::default()
    };
    let snapshot = run(&harness, &snapshot, ConsoleCommand::SubmitEdit(good)).await;
    assert_eq!(snapshot.view, ConsoleView::Details { role_id: viewer });
    assert!(snapshot.form_errors.is_empty());
    assert!(snapshot.form_message.is_none());
}

#[tokio::test]
async fn deleting_system_role_notifies_and_keeps_view() {
    let harness = Harness::new();
    let admin_role = harness.admin_role.id();
    let snapshot = open(&harness).await;
    let snapshot = run(&harness, &snapshot, ConsoleCommand::ShowDetails(admin_role)).await;
    assert!(!snapshot.affordances.can_delete);

    let snapshot = run(&harness, &snapshot, ConsoleCommand::Delete(admin_role)).await;

    assert_eq!(snapshot.view, ConsoleView::Details { role_id: admin_role });
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].level, NotificationLevel::Error);
    assert!(snapshot.roles.iter().any(|role| role.id() == admin_role));
}

#[tokio::test]
async fn deleting_custom_role_returns_to_list() {
    let harness = Harness::new();
    let snapshot = open(&harness).await;
    let draft = RoleDraft::new("Developer", "Builds features");
    let snapshot = run(&harness, &snapshot, ConsoleCommand::SubmitCreate(draft)).await;
    let Some(role_id) = snapshot.view.role_id() else {
        panic!("details view should focus the new role");
    };

    let snapshot = run(&harness, &snapshot, ConsoleCommand::Delete(role_id)).await;

    assert_eq!(snapshot.view, ConsoleView::List);
    assert_eq!(snapshot.roles.len(), 2);
}

#[tokio::test]
async fn store_failure_becomes_dismissible_notification() {
    let harness = Harness::new();
    let snapshot = open(&harness).await;
    let snapshot = run(&harness, &snapshot, ConsoleCommand::StartCreate).await;
    harness.roles.fail_writes(true).await;

    let draft = RoleDraft::new("Developer", "Builds features");
    let snapshot = run(&harness, &snapshot, ConsoleCommand::SubmitCreate(draft)).await;
    assert_eq!(snapshot.view.kind(), ConsoleViewKind::Create);
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].message, "role store rejected the write");

    let notification_id = snapshot.notifications[0].id;
    let snapshot = run(
        &harness,
        &snapshot,
        ConsoleCommand::DismissNotification(notification_id),
    )
    .await;
    assert!(snapshot.notifications.is_empty());
}

#[tokio::test]
async fn assignment_view_reports_outcomes_and_system_members_are_fixed() {
    let harness = Harness::new();
    let viewer = harness.viewer_role.id();
    let snapshot = open(&harness).await;
    let snapshot = run(&harness, &snapshot, ConsoleCommand::StartAssignment(viewer)).await;
    assert_eq!(snapshot.members.len(), 1);
    assert!(snapshot.members.iter().all(|member| !member.removable));

    let snapshot = run(
        &harness,
        &snapshot,
        ConsoleCommand::Assign(harness.member.user_id()),
    )
    .await;
    let snapshot = run(
        &harness,
        &snapshot,
        ConsoleCommand::Assign(harness.guest.user_id()),
    )
    .await;

    let levels: Vec<NotificationLevel> = snapshot
        .notifications
        .iter()
        .map(|notification| notification.level)
        .collect();
    assert_eq!(
        levels,
        vec![NotificationLevel::Info, NotificationLevel::Success]
    );
    assert_eq!(snapshot.members.len(), 2);
}

#[tokio::test]
async fn custom_role_members_are_removable() {
    let harness = Harness::new();
    let snapshot = open(&harness).await;
    let draft = RoleDraft::new("Developer", "Builds features");
    let snapshot = run(&harness, &snapshot, ConsoleCommand::SubmitCreate(draft)).await;
    let Some(role_id) = snapshot.view.role_id() else {
        panic!("details view should focus the new role");
    };
    let snapshot = run(&harness, &snapshot, ConsoleCommand::StartAssignment(role_id)).await;
    let snapshot = run(
        &harness,
        &snapshot,
        ConsoleCommand::Assign(harness.guest.user_id()),
    )
    .await;
    assert_eq!(snapshot.members.len(), 1);
    assert!(snapshot.members[0].removable);

    let snapshot = run(
        &harness,
        &snapshot,
        ConsoleCommand::Unassign(harness.guest.user_id()),
    )
    .await;
    assert!(snapshot.members.is_empty());
}

#[tokio::test]
async fn unknown_role_and_unknown_user_become_notifications() {
    let harness = Harness::new();
    let snapshot = open(&harness).await;
    let snapshot = run(&harness, &snapshot, ConsoleCommand::ShowDetails(RoleId::new())).await;
    assert_eq!(snapshot.view, ConsoleView::List);

    let snapshot = run(
        &harness,
        &snapshot,
        ConsoleCommand::StartAssignment(harness.viewer_role.id()),
    )
    .await;
    let snapshot = run(&harness, &snapshot, ConsoleCommand::Assign(UserId::new())).await;

    assert_eq!(snapshot.view.kind(), ConsoleViewKind::Assignment);
    assert_eq!(snapshot.notifications.len(), 2);
    assert!(
        snapshot
            .notifications
            .iter()
            .all(|notification| notification.level == NotificationLevel::Error)
    );
}

#[tokio::test]
async fn back_returns_to_list() {
    let harness = Harness::new();
    let snapshot = open(&harness).await;
    let snapshot = run(
        &harness,
        &snapshot,
        ConsoleCommand::ShowDetails(harness.viewer_role.id()),
    )
    .await;
    let snapshot = run(&harness, &snapshot, ConsoleCommand::Back).await;

    assert_eq!(snapshot.view, ConsoleView::List);
    assert!(snapshot.selected_role.is_none());
}

#[tokio::test]
async fn member_sees_read_only_affordances_and_gets_forbidden_notifications() {
    let harness = Harness::new();
    let service = harness.console_service();
    let Ok(snapshot) = service.open_session(&harness.member).await else {
        panic!("session should open");
    };
    assert!(!snapshot.affordances.can_create);
    assert!(!snapshot.affordances.can_assign);

    let result = service
        .dispatch(
            &harness.member,
            snapshot.session_id,
            ConsoleCommand::SubmitCreate(RoleDraft::new("Developer", "Builds features")),
        )
        .await;
    let Ok(snapshot) = result else {
        panic!("dispatch should succeed");
    };
    assert_eq!(snapshot.notifications.len(), 1);
    assert_eq!(snapshot.notifications[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn sessions_are_private_to_their_owner() {
    let harness = Harness::new();
    let snapshot = open(&harness).await;
    let service = harness.console_service();

    let foreign = service.snapshot(&harness.member, snapshot.session_id).await;
    assert!(matches!(foreign, Err(AppError::NotFound(_))));

    assert!(
        service
            .close_session(&harness.admin, snapshot.session_id)
            .await
            .is_ok()
    );
    let closed = service.snapshot(&harness.admin, snapshot.session_id).await;
    assert!(matches!(closed, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn repeated_assignments_keep_only_the_newest_notifications() {
    let harness = Harness::new();
    let viewer = harness.viewer_role.id();
    let snapshot = open(&harness).await;
    let mut snapshot = run(&harness, &snapshot, ConsoleCommand::StartAssignment(viewer)).await;

    for _ in 0..(MAX_NOTIFICATIONS * 3) {
        snapshot = run(
            &harness,
            &snapshot,
            ConsoleCommand::Assign(harness.member.user_id()),
        )
        .await;
    }

    assert_eq!(snapshot.notifications.len(), MAX_NOTIFICATIONS);
    let ids: Vec<u64> = snapshot
        .notifications
        .iter()
        .map(|notification| notification.id)
        .collect();
    let newest = u64::try_from(MAX_NOTIFICATIONS * 3).unwrap_or(u64::MAX);
    assert_eq!(ids.last(), Some(&newest));
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}
