use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a fresh identifier for role and permission rows.
#[must_use]
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Persisted role row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable role identifier.
    pub id: String,
    /// Unique role name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Creation timestamp maintained by storage.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp maintained by storage.
    pub updated_at: DateTime<Utc>,
}

/// Persisted permission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Stable permission identifier.
    pub id: String,
    /// Unique permission name, for example `billing.invoice.read`.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Creation timestamp maintained by storage.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp maintained by storage.
    pub updated_at: DateTime<Utc>,
}

/// Association row linking a permission to a role.
///
/// The `(permission_id, role_id)` pair is the identity of the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    /// Granted permission.
    pub permission_id: String,
    /// Receiving role.
    pub role_id: String,
    /// Grant timestamp maintained by storage.
    pub created_at: DateTime<Utc>,
}

impl RolePermission {
    /// Returns the composite key rendered as `permission_id:role_id`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.permission_id, self.role_id)
    }
}

/// Association row expanded with the linked permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionWithPermission {
    /// Association row.
    #[serde(flatten)]
    pub assignment: RolePermission,
    /// Linked permission detail.
    pub permission: Permission,
}

/// Association row expanded with the linked role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionWithRole {
    /// Association row.
    #[serde(flatten)]
    pub assignment: RolePermission,
    /// Linked role detail.
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{Permission, RolePermission, RolePermissionWithPermission, new_record_id};

    fn sample_assignment() -> RolePermissionWithPermission {
        let timestamp = Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default();

        RolePermissionWithPermission {
            assignment: RolePermission {
                permission_id: "p1".to_owned(),
                role_id: "r1".to_owned(),
                created_at: timestamp,
            },
            permission: Permission {
                id: "p1".to_owned(),
                name: "billing.invoice.read".to_owned(),
                description: None,
                created_at: timestamp,
                updated_at: timestamp,
            },
        }
    }

    #[test]
    fn record_ids_are_unique_uuids() {
        let first = new_record_id();
        let second = new_record_id();
        assert_eq!(first.len(), 36);
        assert_ne!(first, second);
    }

    #[test]
    fn composite_key_puts_permission_first() {
        assert_eq!(sample_assignment().assignment.key(), "p1:r1");
    }

    #[test]
    fn expanded_assignment_serializes_flat_with_nested_detail() {
        let value = serde_json::to_value(sample_assignment()).unwrap_or_default();
        assert_eq!(value["permission_id"], "p1");
        assert_eq!(value["role_id"], "r1");
        assert_eq!(value["permission"]["name"], "billing.invoice.read");
    }
}
