use rolegrant_application::{
    CreatePermissionInput, CreateRoleInput, RoleAdminService, UpdatePermissionInput,
    UpdateRoleInput,
};
use rolegrant_core::{AppError, AppResult};
use rolegrant_infrastructure::Database;
use serde::Serialize;
use serde_json::{Value, json};

const USAGE: &str = "usage: rolegrant-console <migrate | ping | roles | role <id> | create-role <name> [description] | update-role <id> <name> [description] | delete-role <id> | permissions | permission <id> | create-permission <name> [description] | update-permission <id> <name> [description] | delete-permission <id> | grant <role_id> <permission_id> | revoke <role_id> <permission_id> | role-permissions <role_id> | permission-roles <permission_id> | check <role_id> <permission_id>>";

/// One console invocation parsed from argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Migrate,
    Ping,
    Roles,
    Role {
        role_id: String,
    },
    CreateRole {
        name: String,
        description: Option<String>,
    },
    UpdateRole {
        role_id: String,
        name: String,
        description: Option<String>,
    },
    DeleteRole {
        role_id: String,
    },
    Permissions,
    Permission {
        permission_id: String,
    },
    CreatePermission {
        name: String,
        description: Option<String>,
    },
    UpdatePermission {
        permission_id: String,
        name: String,
        description: Option<String>,
    },
    DeletePermission {
        permission_id: String,
    },
    Grant {
        role_id: String,
        permission_id: String,
    },
    Revoke {
        role_id: String,
        permission_id: String,
    },
    RolePermissions {
        role_id: String,
    },
    PermissionRoles {
        permission_id: String,
    },
    Check {
        role_id: String,
        permission_id: String,
    },
}

impl Command {
    /// Parses arguments following the program name.
    pub fn parse(args: &[String]) -> AppResult<Self> {
        let words = args.iter().map(String::as_str).collect::<Vec<_>>();
        let command = match words.as_slice() {
            ["migrate"] => Self::Migrate,
            ["ping"] => Self::Ping,
            ["roles"] => Self::Roles,
            ["role", role_id] => Self::Role {
                role_id: (*role_id).to_owned(),
            },
            ["create-role", name, rest @ ..] if rest.len() <= 1 => Self::CreateRole {
                name: (*name).to_owned(),
                description: rest.first().map(|value| (*value).to_owned()),
            },
            ["update-role", role_id, name, rest @ ..] if rest.len() <= 1 => Self::UpdateRole {
                role_id: (*role_id).to_owned(),
                name: (*name).to_owned(),
                description: rest.first().map(|value| (*value).to_owned()),
            },
            ["delete-role", role_id] => Self::DeleteRole {
                role_id: (*role_id).to_owned(),
            },
            ["permissions"] => Self::Permissions,
            ["permission", permission_id] => Self::Permission {
                permission_id: (*permission_id).to_owned(),
            },
            ["create-permission", name, rest @ ..] if rest.len() <= 1 => {
                Self::CreatePermission {
                    name: (*name).to_owned(),
                    description: rest.first().map(|value| (*value).to_owned()),
                }
            }
            ["update-permission", permission_id, name, rest @ ..] if rest.len() <= 1 => {
                Self::UpdatePermission {
                    permission_id: (*permission_id).to_owned(),
                    name: (*name).to_owned(),
                    description: rest.first().map(|value| (*value).to_owned()),
                }
            }
            ["delete-permission", permission_id] => Self::DeletePermission {
                permission_id: (*permission_id).to_owned(),
            },
            ["grant", role_id, permission_id] => Self::Grant {
                role_id: (*role_id).to_owned(),
                permission_id: (*permission_id).to_owned(),
            },
            ["revoke", role_id, permission_id] => Self::Revoke {
                role_id: (*role_id).to_owned(),
                permission_id: (*permission_id).to_owned(),
            },
            ["role-permissions", role_id] => Self::RolePermissions {
                role_id: (*role_id).to_owned(),
            },
            ["permission-roles", permission_id] => Self::PermissionRoles {
                permission_id: (*permission_id).to_owned(),
            },
            ["check", role_id, permission_id] => Self::Check {
                role_id: (*role_id).to_owned(),
                permission_id: (*permission_id).to_owned(),
            },
            _ => return Err(AppError::Validation(USAGE.to_owned())),
        };

        Ok(command)
    }

    /// Stable command name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Migrate => "migrate",
            Self::Ping => "ping",
            Self::Roles => "roles",
            Self::Role { .. } => "role",
            Self::CreateRole { .. } => "create-role",
            Self::UpdateRole { .. } => "update-role",
            Self::DeleteRole { .. } => "delete-role",
            Self::Permissions => "permissions",
            Self::Permission { .. } => "permission",
            Self::CreatePermission { .. } => "create-permission",
            Self::UpdatePermission { .. } => "update-permission",
            Self::DeletePermission { .. } => "delete-permission",
            Self::Grant { .. } => "grant",
            Self::Revoke { .. } => "revoke",
            Self::RolePermissions { .. } => "role-permissions",
            Self::PermissionRoles { .. } => "permission-roles",
            Self::Check { .. } => "check",
        }
    }

    /// Executes the command and returns its JSON output.
    pub async fn run(self, service: &RoleAdminService, database: &Database) -> AppResult<Value> {
        match self {
            Self::Migrate => {
                database.migrate().await?;
                Ok(json!({ "migrated": true }))
            }
            Self::Ping => {
                database.ping().await?;
                Ok(json!({ "ok": true }))
            }
            Self::Roles => to_json(service.list_roles().await?),
            Self::Role { role_id } => to_json(service.find_role(role_id.as_str()).await?),
            Self::CreateRole { name, description } => to_json(
                service
                    .create_role(CreateRoleInput { name, description })
                    .await?,
            ),
            Self::UpdateRole {
                role_id,
                name,
                description,
            } => to_json(
                service
                    .update_role(
                        role_id.as_str(),
                        UpdateRoleInput {
                            name: Some(name),
                            description: description.map(Some),
                        },
                    )
                    .await?,
            ),
            Self::DeleteRole { role_id } => {
                to_json(service.delete_role(role_id.as_str()).await?)
            }
            Self::Permissions => to_json(service.list_permissions().await?),
            Self::Permission { permission_id } => {
                to_json(service.find_permission(permission_id.as_str()).await?)
            }
            Self::CreatePermission { name, description } => to_json(
                service
                    .create_permission(CreatePermissionInput { name, description })
                    .await?,
            ),
            Self::UpdatePermission {
                permission_id,
                name,
                description,
            } => to_json(
                service
                    .update_permission(
                        permission_id.as_str(),
                        UpdatePermissionInput {
                            name: Some(name),
                            description: description.map(Some),
                        },
                    )
                    .await?,
            ),
            Self::DeletePermission { permission_id } => {
                to_json(service.delete_permission(permission_id.as_str()).await?)
            }
            Self::Grant {
                role_id,
                permission_id,
            } => to_json(
                service
                    .assign_permission(role_id.as_str(), permission_id.as_str())
                    .await?,
            ),
            Self::Revoke {
                role_id,
                permission_id,
            } => to_json(
                service
                    .remove_permission(role_id.as_str(), permission_id.as_str())
                    .await?,
            ),
            Self::RolePermissions { role_id } => {
                to_json(service.permissions_for_role(role_id.as_str()).await?)
            }
            Self::PermissionRoles { permission_id } => {
                to_json(service.roles_for_permission(permission_id.as_str()).await?)
            }
            Self::Check {
                role_id,
                permission_id,
            } => {
                let assigned = service
                    .is_permission_assigned(role_id.as_str(), permission_id.as_str())
                    .await?;
                Ok(json!({
                    "role_id": role_id,
                    "permission_id": permission_id,
                    "assigned": assigned,
                }))
            }
        }
    }
}

fn to_json<T: Serialize>(value: T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| AppError::Internal(format!("failed to encode output: {error}")))
}

#[cfg(test)]
mod tests {
    use rolegrant_core::AppError;

    use super::Command;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn grant_takes_role_then_permission() {
        let command = Command::parse(&args(&["grant", "r1", "p1"]));
        assert!(matches!(
            command,
            Ok(Command::Grant { role_id, permission_id }) if role_id == "r1" && permission_id == "p1"
        ));
    }

    #[test]
    fn create_role_description_is_optional() {
        let without = Command::parse(&args(&["create-role", "auditor"]));
        assert!(matches!(
            without,
            Ok(Command::CreateRole { description: None, .. })
        ));

        let with = Command::parse(&args(&["create-role", "auditor", "reads audit logs"]));
        assert!(matches!(
            with,
            Ok(Command::CreateRole { description: Some(description), .. })
                if description == "reads audit logs"
        ));
    }

    #[test]
    fn update_commands_take_id_then_name() {
        let role = Command::parse(&args(&["update-role", "r1", "auditor"]));
        assert!(matches!(
            role,
            Ok(Command::UpdateRole { role_id, name, description: None })
                if role_id == "r1" && name == "auditor"
        ));

        let permission = Command::parse(&args(&[
            "update-permission",
            "p1",
            "audit.read",
            "reads audit logs",
        ]));
        assert!(matches!(
            permission,
            Ok(Command::UpdatePermission { permission_id, name, description: Some(description) })
                if permission_id == "p1" && name == "audit.read" && description == "reads audit logs"
        ));

        let missing_name = Command::parse(&args(&["update-role", "r1"]));
        assert!(missing_name.is_err());
    }

    #[test]
    fn lookup_and_ping_commands_parse() {
        assert_eq!(Command::parse(&args(&["ping"])).ok(), Some(Command::Ping));
        assert_eq!(
            Command::parse(&args(&["permission", "p1"])).ok(),
            Some(Command::Permission {
                permission_id: "p1".to_owned(),
            })
        );
        assert!(Command::parse(&args(&["ping", "now"])).is_err());
    }

    #[test]
    fn unknown_or_incomplete_commands_print_usage() {
        for input in [vec![], vec!["grant", "r1"], vec!["roles", "extra"], vec!["drop"]] {
            let result = Command::parse(&args(&input));
            assert!(matches!(
                result,
                Err(AppError::Validation(message)) if message.starts_with("usage:")
            ));
        }
    }

    #[test]
    fn command_names_match_argv_words() {
        for words in [
            vec!["permission-roles", "p1"],
            vec!["update-permission", "p1", "audit.read"],
            vec!["permission", "p1"],
            vec!["ping"],
        ] {
            let command = Command::parse(&args(&words));
            assert_eq!(command.map(|command| command.name()).ok(), Some(words[0]));
        }
    }
}
