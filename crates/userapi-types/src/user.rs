//! User types

use serde::{Deserialize, Serialize};

/// A user account.
///
/// `id` is assigned by the store on create and immutable afterwards; a value
/// built from a request body carries `id: None` until it has been persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

impl User {
    /// Build a not-yet-persisted user.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }
}

// Identity equality: two users are the same user iff both carry an assigned
// id and the ids match. Unassigned ids never compare equal, not even to
// themselves, so no Eq impl (the relation is not reflexive).
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// User creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
}

impl From<UserRequest> for User {
    fn from(req: UserRequest) -> Self {
        User::new(req.name, req.email)
    }
}

/// Single-message response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality() {
        let a = User {
            id: Some(1),
            name: "Ivan".to_string(),
            email: "ivan@ya.ru".to_string(),
        };
        let b = User {
            id: Some(1),
            name: "Ivanov".to_string(),
            email: "ivan@gmail.com".to_string(),
        };
        // Same id, different fields: still the same user
        assert_eq!(a, b);

        let c = User {
            id: Some(2),
            ..b.clone()
        };
        assert_ne!(a, c);
    }

    #[test]
    fn test_unassigned_ids_never_equal() {
        let fresh = User::new("Ivan", "ivan@ya.ru");
        assert_ne!(fresh, fresh.clone());

        let stored = User {
            id: Some(1),
            ..fresh.clone()
        };
        assert_ne!(fresh, stored);
    }

    #[test]
    fn test_request_to_user() {
        let req = UserRequest {
            name: "Ivan".to_string(),
            email: "ivan@ya.ru".to_string(),
        };
        let user = User::from(req);
        assert!(user.id.is_none());
        assert_eq!(user.name, "Ivan");
        assert_eq!(user.email, "ivan@ya.ru");
    }

    #[test]
    fn test_unassigned_id_omitted_from_json() {
        let json = serde_json::to_value(User::new("Ivan", "ivan@ya.ru")).unwrap();
        assert!(json.get("id").is_none());

        let stored = User {
            id: Some(1),
            ..User::new("Ivan", "ivan@ya.ru")
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Ivan");
        assert_eq!(json["email"], "ivan@ya.ru");
    }
}
