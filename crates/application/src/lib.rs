//! Application services and ports.

#![forbid(unsafe_code)]

mod role_admin_service;
mod security_ports;

pub use role_admin_service::RoleAdminService;
pub use security_ports::{
    CreatePermissionInput, CreateRoleInput, RolePermissionRepository, SysPermissionRepository,
    SysRoleRepository, UpdatePermissionInput, UpdateRoleInput,
};
