//! Credential shape validation

use std::collections::BTreeMap;

use geodns_provider::{
    CredentialShapeCatalog, CredentialValidationError, Credentials, check_valid_for_provider,
    get_all_provider_metadata,
};

fn anonymous() -> CredentialShapeCatalog {
    CredentialShapeCatalog::anonymous("mock")
}

fn two_part() -> CredentialShapeCatalog {
    CredentialShapeCatalog::new("twopart", Vec::new())
        .with_shape("password", ["username", "password"])
}

fn three_part() -> CredentialShapeCatalog {
    CredentialShapeCatalog::new("threepart", Vec::new())
        .with_shape("password", ["customer", "username", "password"])
}

fn multi_part() -> CredentialShapeCatalog {
    CredentialShapeCatalog::new("multipart", Vec::new())
        .with_shape("accessKey", ["accessKey", "secretKey"])
        .with_shape("session", ["accessKey", "secretKey", "sessionToken"])
}

#[test]
fn test_anonymous_provider_accepts_nothing_supplied() {
    for supplied in [
        None,
        Some(Credentials::Anonymous),
        Some(Credentials::List(Vec::new())),
        Some(Credentials::Map(BTreeMap::new())),
    ] {
        let result = check_valid_for_provider(supplied.as_ref(), Some(&anonymous()));
        assert_eq!(result, Ok(Credentials::Anonymous), "supplied: {supplied:?}");
    }
}

#[test]
fn test_anonymous_provider_rejects_credentials() {
    let result =
        check_valid_for_provider(Some(&Credentials::list(["user", "pass"])), Some(&anonymous()));
    let Err(err) = result else {
        panic!("credentials for an anonymous provider must be rejected");
    };
    assert_eq!(
        err.to_string(),
        "incorrect credentials supplied. mock does not accept credentials"
    );
}

#[test]
fn test_missing_provider_reported_first() {
    assert_eq!(
        check_valid_for_provider(None, None),
        Err(CredentialValidationError::ProviderMissing)
    );
    let result = check_valid_for_provider(Some(&Credentials::list(["a", "b"])), None);
    assert_eq!(
        result.map_err(|e| e.to_string()),
        Err("provider cannot be null".to_string())
    );
}

#[test]
fn test_not_supplied_when_shape_required() {
    for supplied in [None, Some(Credentials::Anonymous), Some(Credentials::List(Vec::new()))] {
        let result = check_valid_for_provider(supplied.as_ref(), Some(&two_part()));
        assert_eq!(
            result.map_err(|e| e.to_string()),
            Err("no credentials supplied. password requires username, password".to_string())
        );
    }
}

#[test]
fn test_matching_arity_returns_supplied() {
    let creds = Credentials::list(["joe", "letmein"]);
    assert_eq!(
        check_valid_for_provider(Some(&creds), Some(&two_part())),
        Ok(creds)
    );

    let creds = Credentials::list(["customer", "joe", "letmein"]);
    assert_eq!(
        check_valid_for_provider(Some(&creds), Some(&three_part())),
        Ok(creds)
    );
}

#[test]
fn test_wrong_arity_is_incorrect() {
    let result = check_valid_for_provider(
        Some(&Credentials::list(["joe", "letmein"])),
        Some(&three_part()),
    );
    assert_eq!(
        result.map_err(|e| e.to_string()),
        Err(
            "incorrect credentials supplied. password requires customer, username, password"
                .to_string()
        )
    );
}

#[test]
fn test_multi_shape_accepts_any_form() {
    let key = Credentials::list(["AKIA", "secret"]);
    let session = Credentials::list(["AKIA", "secret", "token"]);
    assert_eq!(
        check_valid_for_provider(Some(&key), Some(&multi_part())),
        Ok(key)
    );
    assert_eq!(
        check_valid_for_provider(Some(&session), Some(&multi_part())),
        Ok(session)
    );
}

#[test]
fn test_multi_shape_messages_list_every_form() {
    let expected_forms = "multipart requires one of the following forms: when type is \
                          accessKey: accessKey, secretKey; session: accessKey, secretKey, sessionToken";

    let result = check_valid_for_provider(None, Some(&multi_part()));
    assert_eq!(
        result.map_err(|e| e.to_string()),
        Err(format!("no credentials supplied. {expected_forms}"))
    );

    let result = check_valid_for_provider(Some(&Credentials::list(["only"])), Some(&multi_part()));
    assert_eq!(
        result.map_err(|e| e.to_string()),
        Err(format!("incorrect credentials supplied. {expected_forms}"))
    );
}

#[test]
fn test_map_credentials_match_by_name() {
    let session = Credentials::Map(BTreeMap::from([
        ("accessKey".to_string(), "AKIA".to_string()),
        ("secretKey".to_string(), "secret".to_string()),
        ("sessionToken".to_string(), "token".to_string()),
    ]));
    assert_eq!(
        check_valid_for_provider(Some(&session), Some(&multi_part())),
        Ok(session)
    );

    let misnamed = Credentials::Map(BTreeMap::from([
        ("accessKey".to_string(), "AKIA".to_string()),
        ("secret".to_string(), "secret".to_string()),
    ]));
    assert!(matches!(
        check_valid_for_provider(Some(&misnamed), Some(&multi_part())),
        Err(CredentialValidationError::Incorrect { .. })
    ));
}

#[test]
fn test_provider_catalogs_from_metadata() {
    let catalogs: Vec<CredentialShapeCatalog> = get_all_provider_metadata()
        .iter()
        .map(geodns_provider::ProviderMetadata::credential_catalog)
        .collect();

    let ultradns = catalogs.iter().find(|c| c.provider == "ultradns");
    let Some(ultradns) = ultradns else {
        panic!("ultradns metadata missing");
    };
    let result = check_valid_for_provider(None, Some(ultradns));
    assert_eq!(
        result.map_err(|e| e.to_string()),
        Err("no credentials supplied. password requires username, password".to_string())
    );

    let mock = catalogs.iter().find(|c| c.provider == "mock");
    assert!(mock.is_some_and(|c| c.shapes.is_empty()));
}

#[test]
fn test_credentials_serde_shape() {
    let creds = Credentials::list(["joe", "letmein"]);
    let json = serde_json::to_value(&creds).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "type": "list", "values": ["joe", "letmein"] })
    );
    assert_eq!(
        serde_json::to_value(Credentials::Anonymous).unwrap(),
        serde_json::json!({ "type": "anonymous" })
    );
}
