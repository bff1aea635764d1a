mod inputs;
mod repositories;

pub use inputs::{CreatePermissionInput, CreateRoleInput, UpdatePermissionInput, UpdateRoleInput};
pub use repositories::{RolePermissionRepository, SysPermissionRepository, SysRoleRepository};
