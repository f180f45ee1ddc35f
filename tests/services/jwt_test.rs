use storefront_api::services::jwt::JwtService;

fn service() -> JwtService {
    JwtService::new("access-secret".to_string(), "refresh-secret".to_string())
}

#[test]
fn access_token_round_trip_preserves_claims() {
    let jwt = service();

    let token = jwt.create_access_token("account-1", "Admin").unwrap();
    let data = jwt.verify_access_token(&token).unwrap();

    assert_eq!(data.claims.sub, "account-1");
    assert_eq!(data.claims.role, "Admin");
    assert!(data.claims.exp > data.claims.iat);
}

#[test]
fn refresh_token_round_trip_preserves_subject() {
    let jwt = service();

    let token = jwt.create_refresh_token("account-1").unwrap();
    let data = jwt.verify_refresh_token(&token).unwrap();

    assert_eq!(data.claims.sub, "account-1");
}

#[test]
fn tokens_carry_unique_ids() {
    let jwt = service();

    let a = jwt.create_access_token("account-1", "User").unwrap();
    let b = jwt.create_access_token("account-1", "User").unwrap();

    let a = jwt.verify_access_token(&a).unwrap();
    let b = jwt.verify_access_token(&b).unwrap();
    assert_ne!(a.claims.jti, b.claims.jti);
}

#[test]
fn access_token_is_not_a_valid_refresh_token() {
    let jwt = service();

    // Independent secrets: one kind must never verify as the other
    let access = jwt.create_access_token("account-1", "User").unwrap();
    assert!(jwt.verify_refresh_token(&access).is_err());

    let refresh = jwt.create_refresh_token("account-1").unwrap();
    assert!(jwt.verify_access_token(&refresh).is_err());
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let jwt = service();
    let other = JwtService::new("different".to_string(), "also-different".to_string());

    let token = other.create_access_token("account-1", "User").unwrap();
    assert!(jwt.verify_access_token(&token).is_err());
}

#[test]
fn access_token_lifetime_is_fifteen_minutes() {
    assert_eq!(service().access_token_duration_secs(), 15 * 60);
}
