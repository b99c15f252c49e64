mod support;

use crate::utils::Claims;

#[test]
fn claims_roundtrip() {
    let account = uuid::Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
    let secret = b"test-secret";

    let token = Claims::new(&account, 900).encode(secret).unwrap();
    let decoded = Claims::decode(&token, secret).unwrap();

    assert_eq!(decoded.sub, account);
    assert!(decoded.exp > decoded.iat);
}

#[test]
fn expired_claims_are_rejected() {
    let account = uuid::Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
    let secret = b"test-secret";

    let mut claims = Claims::new(&account, 900);
    claims.iat -= 2000;
    claims.exp = claims.iat + 1;

    let token = claims.encode(secret).unwrap();
    assert!(Claims::decode(&token, secret).is_err());
}
