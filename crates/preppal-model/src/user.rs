use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    #[schema(example = "student@example.org")]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub available_tokens: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_skips_missing_username() {
        let id = Uuid::new_v4();
        let user = User {
            id,
            email: "a@b.c".into(),
            username: None,
            available_tokens: 500,
        };
        assert_eq!(
            format!(r#"{{"id":"{id}","email":"a@b.c","available_tokens":500}}"#),
            serde_json::to_string(&user).unwrap()
        );
    }
}
