// Denial Payload Contract Tests
//
// The request boundary turns AuthorizationDenied into a 403 response body.
// Clients read these field names.

use roleguard_core::{AuthorizationDenied, AuthzError, PermissionDescriptor};

/// WHY: Field names are the JSON contract with the front end
/// BREAKS: Error displays that read `requiredPermission` / `requiredRole`
#[test]
fn permission_denial_field_names() {
    let body = AuthorizationDenied::for_permission("update:note:own").to_json();
    let object = body.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["error", "message", "requiredPermission"]);
    assert_eq!(body["error"], "Unauthorized");
}

#[test]
fn role_denial_field_names() {
    let body = AuthorizationDenied::for_role("admin").to_json();
    let object = body.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["error", "message", "requiredRole"]);
}

/// WHY: The required entity is echoed verbatim, unknown tokens included
#[test]
fn required_permission_echoes_input_tokens() {
    for input in ["delete:user:any", "read:planet", "frobnicate:note:own,any"] {
        let denial = AuthorizationDenied::for_permission(input);
        let expected = PermissionDescriptor::parse(input);
        let required = denial.required_permission.unwrap();

        assert_eq!(required.entity, expected.entity);
        assert_eq!(required, expected);
        assert_eq!(denial.message, format!("Unauthorized: required permissions: {}", input));
    }
}

/// WHY: Denials are 403, unauthenticated is 401
#[test]
fn denial_status_codes() {
    let denied: AuthzError = AuthorizationDenied::for_role("editor").into();
    assert_eq!(denied.status(), 403);
    assert_eq!(AuthzError::Unauthenticated.status(), 401);
}
