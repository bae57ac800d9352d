//! Validation properties over generated request bodies

use proptest::prelude::*;
use serde_json::json;
use todo_auth::backend::validation::schemas::{create_todo_input, id_param, register_input};
use todo_auth::backend::BackendError;
use uuid::Uuid;

fn field_names(err: BackendError) -> Vec<String> {
    err.field_errors()
        .unwrap_or_default()
        .into_iter()
        .map(|error| error.field)
        .collect()
}

proptest! {
    #[test]
    fn test_valid_registration_is_normalized(
        username in "[A-Za-z0-9_]{3,30}",
        local in "[a-z0-9]{1,12}",
        domain in "[a-z]{2,10}",
        password in "[ -~]{6,40}",
    ) {
        let email = format!("{}@{}.COM", local.to_uppercase(), domain);
        let request = register_input(json!({
            "username": format!(" {} ", username),
            "email": email,
            "password": password.clone(),
        }))
        .unwrap();
        prop_assert_eq!(request.username, username);
        prop_assert_eq!(request.email, email.to_lowercase());
        prop_assert_eq!(request.password, password);
    }

    #[test]
    fn test_short_passwords_rejected(password in "[a-z]{0,5}") {
        let err = register_input(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": password,
        }))
        .unwrap_err();
        prop_assert_eq!(field_names(err), vec!["password".to_string()]);
    }

    #[test]
    fn test_title_length_bounds(len in 0usize..200) {
        let result = create_todo_input(json!({ "title": "t".repeat(len) }));
        if (1..=100).contains(&len) {
            let request = result.unwrap();
            prop_assert_eq!(request.title.chars().count(), len);
        } else {
            prop_assert_eq!(field_names(result.unwrap_err()), vec!["title".to_string()]);
        }
    }

    #[test]
    fn test_unknown_priorities_rejected(priority in "[a-z]{1,10}") {
        prop_assume!(!["low", "medium", "high"].contains(&priority.as_str()));
        let err = create_todo_input(json!({ "title": "task", "priority": priority })).unwrap_err();
        prop_assert_eq!(field_names(err), vec!["priority".to_string()]);
    }

    #[test]
    fn test_only_uuids_are_ids(raw in "[0-9a-f]{1,40}") {
        prop_assume!(raw.len() != 32);
        prop_assert!(id_param(&raw).is_err());
        let id = Uuid::new_v4();
        prop_assert_eq!(id_param(&id.to_string()).unwrap(), id);
    }
}
