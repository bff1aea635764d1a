//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod security;

pub use security::{
    Permission, Role, RolePermission, RolePermissionWithPermission, RolePermissionWithRole,
    new_record_id,
};
