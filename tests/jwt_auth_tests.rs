// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token tests.
//!
//! These verify that JWTs created by the auth routes can be decoded by the
//! auth middleware, catching compatibility issues early.

use carelink_api::middleware::auth::{create_jwt, Claims};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

#[test]
fn test_jwt_roundtrip() {
    // A token created by the sign-in flow must decode with the claims the
    // middleware expects. If either side changes the Claims structure or
    // algorithm, this test will fail.
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let uid = "firebase-uid-4f9a";

    let token = create_jwt(uid, signing_key).expect("Failed to create JWT");

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, uid);
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_expiration_is_future() {
    use std::time::{SystemTime, UNIX_EPOCH};

    let signing_key = b"test_signing_key_32_bytes_long!!";
    let token = create_jwt("uid-123", signing_key).unwrap();

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    assert!(token_data.claims.exp > now);
}

#[test]
fn test_jwt_rejects_wrong_key() {
    let token = create_jwt("uid-123", b"the_real_signing_key_32_bytes!!!").unwrap();

    let wrong_key = DecodingKey::from_secret(b"a_different_signing_key_32_byte!");
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&token, &wrong_key, &validation).is_err());
}
