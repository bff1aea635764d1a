use rolegrant_application::{
    CreatePermissionInput, CreateRoleInput, RolePermissionRepository, SysPermissionRepository,
    SysRoleRepository, UpdatePermissionInput,
};
use rolegrant_core::AppError;
use rolegrant_domain::Permission;

use super::PostgresSysPermissionRepository;
use crate::test_support::{test_pool, unique};
use crate::{PostgresRolePermissionRepository, PostgresSysRoleRepository};

async fn create_permission(
    repository: &PostgresSysPermissionRepository,
    prefix: &str,
) -> Permission {
    repository
        .create_permission(CreatePermissionInput {
            name: unique(prefix),
            description: Some("initial".to_owned()),
        })
        .await
        .unwrap_or_else(|error| panic!("failed to create permission: {error}"))
}

#[tokio::test]
async fn lookup_and_listing_return_created_permission() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresSysPermissionRepository::new(pool);
    let first = create_permission(&repository, "audit.read").await;
    let second = create_permission(&repository, "audit.export").await;

    let found = repository
        .get_permission_by_id(first.id.as_str())
        .await
        .ok()
        .flatten();
    assert_eq!(found.map(|item| item.name), Some(first.name.clone()));

    let listed = repository.get_all().await.unwrap_or_default();
    let first_index = listed.iter().position(|item| item.id == first.id);
    let second_index = listed.iter().position(|item| item.id == second.id);
    assert!(first_index.is_some());
    assert!(first_index < second_index);
}

#[tokio::test]
async fn update_renames_clears_and_reports_conflicts() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresSysPermissionRepository::new(pool);
    let permission = create_permission(&repository, "invoice.read").await;
    let taken = create_permission(&repository, "invoice.write").await;
    let new_name = unique("invoice.view");

    let renamed = repository
        .update_permission(
            permission.id.as_str(),
            UpdatePermissionInput {
                name: Some(new_name.clone()),
                description: Some(None),
            },
        )
        .await
        .unwrap_or_else(|error| panic!("failed to update permission: {error}"));
    assert_eq!(renamed.id, permission.id);
    assert_eq!(renamed.name, new_name);
    assert_eq!(renamed.description, None);

    let conflict = repository
        .update_permission(
            permission.id.as_str(),
            UpdatePermissionInput {
                name: Some(taken.name.clone()),
                description: None,
            },
        )
        .await;
    assert!(matches!(conflict, Err(AppError::Conflict(_))));

    let missing = repository
        .update_permission("no-such-permission", UpdatePermissionInput::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn deleting_permission_cascades_grants() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let permissions = PostgresSysPermissionRepository::new(pool.clone());
    let roles = PostgresSysRoleRepository::new(pool.clone());
    let grants = PostgresRolePermissionRepository::new(pool);

    let permission = create_permission(&permissions, "billing.close").await;
    let role = roles
        .create_role(CreateRoleInput {
            name: unique("accountant"),
            description: None,
        })
        .await
        .unwrap_or_else(|error| panic!("failed to create role: {error}"));
    assert!(
        grants
            .assign_permission_to_role(role.id.as_str(), permission.id.as_str())
            .await
            .is_ok()
    );

    assert!(
        permissions
            .delete_permission(permission.id.as_str())
            .await
            .is_ok()
    );

    let granted = grants.get_permissions_by_role(role.id.as_str()).await;
    assert!(matches!(granted, Ok(ref rows) if rows.is_empty()));

    let lookup = permissions
        .get_permission_by_id(permission.id.as_str())
        .await;
    assert!(matches!(lookup, Ok(None)));

    let deleted_again = permissions.delete_permission(permission.id.as_str()).await;
    assert!(matches!(deleted_again, Err(AppError::NotFound(_))));
}
