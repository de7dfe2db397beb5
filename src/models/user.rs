use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account. Only its id is consumed by the todo layer, which
/// uses it to scope visibility and ownership.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["username"], "testuser");
    }
}
