//! The fixed role enumeration

use crate::error::{AuthError, Result};

/// Authorization role carried by a token.
///
/// The set is fixed domain knowledge; a token carries exactly one role
/// and roles are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    SuperAdmin = 1,
    Admin = 2,
    Manager = 3,
    Executive = 4,
    ProgramAdmin = 5,
    Alumnus = 6,
    Respondent = 7,
    PostAdmin = 8,
}

impl Role {
    /// Every known role, in id order.
    pub const ALL: [Role; 8] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::Executive,
        Role::ProgramAdmin,
        Role::Alumnus,
        Role::Respondent,
        Role::PostAdmin,
    ];

    /// Numeric id as stored in tokens and the account directory.
    pub fn id(&self) -> u32 {
        *self as u32
    }

    /// Look up a role by its numeric id.
    pub fn from_id(id: u32) -> Result<Role> {
        match id {
            1 => Ok(Role::SuperAdmin),
            2 => Ok(Role::Admin),
            3 => Ok(Role::Manager),
            4 => Ok(Role::Executive),
            5 => Ok(Role::ProgramAdmin),
            6 => Ok(Role::Alumnus),
            7 => Ok(Role::Respondent),
            8 => Ok(Role::PostAdmin),
            other => Err(AuthError::Config(format!("unknown role id: {}", other))),
        }
    }
}
