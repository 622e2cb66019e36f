use chrono::Utc;
use sprintboard_core::{AppError, UserId};
use sprintboard_domain::{ROLE_MANAGE, RoleDraft, RoleId};

use crate::access_ports::RoleRepository;
use crate::test_support::Harness;

#[tokio::test]
async fn admin_wildcard_grants_unknown_permissions() {
    let harness = Harness::new();
    let service = harness.authorization_service();

    let allowed = service
        .has_permission(harness.admin.user_id(), "release:publish")
        .await;
    assert!(matches!(allowed, Ok(true)));
}

#[tokio::test]
async fn member_is_limited_to_viewer_grants() {
    let harness = Harness::new();
    let service = harness.authorization_service();
    let member = harness.member.user_id();

    assert!(matches!(service.has_permission(member, "story:read").await, Ok(true)));
    assert!(matches!(
        service.has_permission(member, "story:delete").await,
        Ok(false)
    ));
}

#[tokio::test]
async fn aggregate_check_is_true_when_any_role_grants() {
    let harness = Harness::new();
    harness
        .assign_directly(harness.member.user_id(), harness.admin_role.id())
        .await;

    let allowed = harness
        .authorization_service()
        .has_permission(harness.member.user_id(), "story:delete")
        .await;
    assert!(matches!(allowed, Ok(true)));
}

#[tokio::test]
async fn require_permission_denies_missing_grant() {
    let harness = Harness::new();
    let result = harness
        .authorization_service()
        .require_permission(harness.member.user_id(), ROLE_MANAGE)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn unknown_user_has_no_roles() {
    let harness = Harness::new();
    let roles = harness
        .authorization_service()
        .resolve_user_roles(UserId::new())
        .await;

    assert!(matches!(roles, Ok(roles) if roles.is_empty()));
}

#[tokio::test]
async fn dangling_assignments_are_skipped() {
    let harness = Harness::new();
    harness
        .assign_directly(harness.member.user_id(), RoleId::new())
        .await;

    let roles = harness
        .authorization_service()
        .resolve_user_roles(harness.member.user_id())
        .await;
    let Ok(roles) = roles else {
        panic!("role resolution should succeed");
    };
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id(), harness.viewer_role.id());
}

#[tokio::test]
async fn resolved_roles_are_ordered_by_name() {
    let harness = Harness::new();
    let Ok(zeta) = RoleDraft::new("Zeta", "Last in line").commit(Utc::now()) else {
        panic!("fixture role should commit");
    };
    let zeta_id = zeta.id();
    assert!(harness.roles.insert_role(zeta).await.is_ok());
    harness
        .assign_directly(harness.member.user_id(), zeta_id)
        .await;

    let names: Vec<String> = harness
        .authorization_service()
        .resolve_user_roles(harness.member.user_id())
        .await
        .unwrap_or_default()
        .iter()
        .map(|role| role.name().to_owned())
        .collect();
    assert_eq!(names, vec!["Viewer", "Zeta"]);
}

#[tokio::test]
async fn role_store_failure_surfaces_as_store_error() {
    let harness = Harness::new();
    harness.roles.fail_reads(true).await;

    let result = harness
        .authorization_service()
        .has_permission(harness.admin.user_id(), "story:read")
        .await;
    assert!(matches!(result, Err(AppError::Store(_))));
}

#[tokio::test]
async fn effective_permissions_follow_catalog() {
    let harness = Harness::new();
    let service = harness.authorization_service();

    let member_permissions = service
        .effective_permissions(harness.member.user_id())
        .await
        .unwrap_or_default();
    let ids: Vec<&str> = member_permissions
        .iter()
        .map(|permission| permission.id())
        .collect();
    assert_eq!(
        ids,
        vec![
            "project:read",
            "epic:read",
            "story:read",
            "task:read",
            "sprint:read"
        ]
    );

    let admin_permissions = service
        .effective_permissions(harness.admin.user_id())
        .await
        .unwrap_or_default();
    assert_eq!(
        admin_permissions.len(),
        service.catalog().list_permissions().len()
    );
}
