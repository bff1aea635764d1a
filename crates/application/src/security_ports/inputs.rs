/// Input payload for creating roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique role name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Partial update for a role. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// Replacement role name.
    pub name: Option<String>,
    /// Replacement description, `Some(None)` clears it.
    pub description: Option<Option<String>>,
}

/// Input payload for creating permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionInput {
    /// Unique permission name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Partial update for a permission. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePermissionInput {
    /// Replacement permission name.
    pub name: Option<String>,
    /// Replacement description, `Some(None)` clears it.
    pub description: Option<Option<String>>,
}
