use sprintboard_core::AppError;
use sprintboard_domain::{AuditAction, RoleDraft, RoleId, RolePatch};

use crate::test_support::Harness;

fn reviewer_draft() -> RoleDraft {
    RoleDraft::new("Reviewer", "Reviews stories before release")
        .grant("story:read")
        .grant("story:update")
}

#[tokio::test]
async fn list_roles_is_ordered_by_name() {
    let harness = Harness::new();
    let service = harness.role_service();
    let created = service
        .create_role(&harness.admin, RoleDraft::new("Developer", "Builds features"))
        .await;
    assert!(created.is_ok());

    let names: Vec<String> = service
        .list_roles()
        .await
        .iter()
        .map(|role| role.name().to_owned())
        .collect();
    assert_eq!(names, vec!["Admin", "Developer", "Viewer"]);
}

#[tokio::test]
async fn list_roles_falls_back_to_last_listing() {
    let harness = Harness::new();
    let service = harness.role_service();
    let first = service.list_roles().await;
    assert_eq!(first.len(), 2);

    harness.roles.fail_reads(true).await;
    let fallback = service.list_roles().await;
    assert_eq!(fallback, first);
}

#[tokio::test]
async fn list_roles_is_empty_when_store_never_answered() {
    let harness = Harness::new();
    harness.roles.fail_reads(true).await;

    assert!(harness.role_service().list_roles().await.is_empty());
}

#[tokio::test]
async fn create_role_persists_custom_role_and_audits() {
    let harness = Harness::new();
    let service = harness.role_service();

    let Ok(role) = service.create_role(&harness.admin, reviewer_draft()).await else {
        panic!("role should be created");
    };
    assert!(!role.is_system());
    assert_eq!(role.created_at(), role.updated_at());
    assert!(role.permissions().grants("story:update"));

    let found = service.find_role(role.id()).await;
    assert!(matches!(found, Ok(found) if found == role));
    assert_eq!(harness.audit.actions().await, vec![AuditAction::RoleCreated]);
}

#[tokio::test]
async fn create_role_rejects_short_fields_without_writing() {
    let harness = Harness::new();
    let service = harness.role_service();

    let result = service
        .create_role(&harness.admin, RoleDraft::new("X", "tiny"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(harness.roles.stored().await.len(), 2);
    assert!(harness.audit.actions().await.is_empty());
}

#[tokio::test]
async fn create_role_requires_manage_permission() {
    let harness = Harness::new();
    let result = harness
        .role_service()
        .create_role(&harness.member, reviewer_draft())
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert_eq!(harness.roles.stored().await.len(), 2);
}

#[tokio::test]
async fn create_role_surfaces_store_failures() {
    let harness = Harness::new();
    harness.roles.fail_writes(true).await;

    let result = harness
        .role_service()
        .create_role(&harness.admin, reviewer_draft())
        .await;
    assert!(matches!(result, Err(AppError::Store(_))));
}

#[tokio::test]
async fn update_role_merges_fields_and_keeps_system_flag() {
    let harness = Harness::new();
    let service = harness.role_service();
    let patch = RolePatch {
        description: Some("Read-only access for stakeholders".to_owned()),
        ..RolePatch::default()
    };

    let Ok(updated) = service
        .update_role(&harness.admin, harness.viewer_role.id(), patch)
        .await
    else {
        panic!("viewer should be updated");
    };

    assert_eq!(updated.name(), "Viewer");
    assert_eq!(updated.description(), "Read-only access for stakeholders");
    assert!(updated.is_system());
    assert_eq!(updated.created_at(), harness.viewer_role.created_at());
    assert!(updated.updated_at() >= harness.viewer_role.updated_at());
    assert_eq!(harness.audit.actions().await, vec![AuditAction::RoleUpdated]);
}

#[tokio::test]
async fn empty_patch_leaves_role_untouched() {
    let harness = Harness::new();
    let before = harness.roles.stored().await;

    let result = harness
        .role_service()
        .update_role(&harness.admin, harness.viewer_role.id(), RolePatch::default())
        .await;

    assert!(matches!(result, Ok(role) if role == harness.viewer_role));
    assert_eq!(harness.roles.stored().await, before);
    assert!(harness.audit.actions().await.is_empty());

    let forbidden = harness
        .role_service()
        .update_role(&harness.member, harness.viewer_role.id(), RolePatch::default())
        .await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn update_role_reports_unknown_role() {
    let harness = Harness::new();
    let result = harness
        .role_service()
        .update_role(&harness.admin, RoleId::new(), RolePatch::default())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn update_role_rejects_mixed_wildcard() {
    let harness = Harness::new();
    let patch = RolePatch {
        permissions: Some(vec!["*".to_owned(), "story:read".to_owned()]),
        ..RolePatch::default()
    };

    let result = harness
        .role_service()
        .update_role(&harness.admin, harness.viewer_role.id(), patch)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn delete_role_refuses_system_roles() {
    let harness = Harness::new();
    let service = harness.role_service();

    let result = service
        .delete_role(&harness.admin, harness.admin_role.id())
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(
        service
            .list_roles()
            .await
            .iter()
            .any(|role| role.id() == harness.admin_role.id())
    );
}

#[tokio::test]
async fn delete_role_cascades_assignments() {
    let harness = Harness::new();
    let service = harness.role_service();
    let Ok(role) = service.create_role(&harness.admin, reviewer_draft()).await else {
        panic!("role should be created");
    };
    harness
        .assign_directly(harness.member.user_id(), role.id())
        .await;

    assert!(service.delete_role(&harness.admin, role.id()).await.is_ok());

    assert!(matches!(
        service.find_role(role.id()).await,
        Err(AppError::NotFound(_))
    ));
    assert!(
        harness
            .assignments
            .stored()
            .await
            .iter()
            .all(|assignment| assignment.role_id != role.id())
    );
    assert_eq!(
        harness.audit.actions().await,
        vec![AuditAction::RoleCreated, AuditAction::RoleDeleted]
    );
}

#[tokio::test]
async fn delete_role_reports_unknown_role() {
    let harness = Harness::new();
    let result = harness
        .role_service()
        .delete_role(&harness.admin, RoleId::new())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
