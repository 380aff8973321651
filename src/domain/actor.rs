use crate::entities::user::UserRole;

/// The authenticated caller, threaded into every ownership-scoped query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: UserRole,
}

impl Actor {
    pub fn user(user_id: i32) -> Self {
        Self {
            user_id,
            role: UserRole::User,
        }
    }

    pub fn admin(user_id: i32) -> Self {
        Self {
            user_id,
            role: UserRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Whether this caller may see a record owned by `owner_id`.
    pub fn can_access(&self, owner_id: i32) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}
