//! Property-based tests for issuance and verification.
//!
//! Property 1: Claims Round-Trip
//! Property 2: Secret Isolation
//! Property 3: Token Structure

use jwt_token::{ClaimsSet, Config, JwtTokenService, SigningSecret, TokenCreator, TokenParser};
use proptest::prelude::*;
use serde_json::Value;

/// Generate non-empty secrets. Zero bytes are excluded because HMAC pads
/// short keys with zeros, which makes `[1]` and `[1, 0]` equivalent keys.
fn arb_secret() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=255u8, 1..64)
}

/// Generate claim values, including nested ones.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_filter("JSON has no NaN or infinity", |f| f.is_finite()).prop_map(Value::from),
        "[ -~]{0,32}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Generate claims sets. Keys are prefixed so they never collide with
/// registered time claims.
fn arb_claims() -> impl Strategy<Value = ClaimsSet> {
    prop::collection::btree_map("x_[a-z0-9_]{1,12}", arb_value(), 0..8)
        .prop_map(|m| m.into_iter().collect::<ClaimsSet>())
}

fn service(secret: Vec<u8>) -> JwtTokenService<jwt_token::StaticSecretProvider> {
    JwtTokenService::with_secret(SigningSecret::new(secret).unwrap(), &Config::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: Claims Round-Trip
    ///
    /// For any claims set and any non-empty secret, parsing a created
    /// token yields the original claims.
    #[test]
    fn prop_claims_round_trip(secret in arb_secret(), claims in arb_claims()) {
        let mut svc = service(secret);
        let token = svc.create_token(claims.clone()).unwrap();

        let verified = svc.parse_token(&token).unwrap();
        prop_assert!(verified.valid);
        prop_assert_eq!(&verified.claims, &claims);
        prop_assert_eq!(&svc.snapshot().token_string, &token);
    }

    /// Float claims come back bit-identical.
    #[test]
    fn prop_float_claims_round_trip(
        secret in arb_secret(),
        f in any::<f64>().prop_filter("finite", |f| f.is_finite()),
    ) {
        let mut claims = ClaimsSet::new();
        claims.insert("x_f".to_string(), Value::from(f));
        let mut svc = service(secret);
        let token = svc.create_token(claims.clone()).unwrap();

        let verified = svc.parse_token(&token).unwrap();
        prop_assert_eq!(verified.claims["x_f"].as_f64().map(f64::to_bits), Some(f.to_bits()));
        prop_assert_eq!(&verified.claims, &claims);
    }

    /// Property 2: Secret Isolation
    ///
    /// A token never verifies under a different secret.
    #[test]
    fn prop_secret_mismatch_rejected(
        a in arb_secret(),
        b in arb_secret(),
        claims in arb_claims(),
    ) {
        prop_assume!(a != b);
        let token = service(a).create_token(claims).unwrap();
        let err = service(b).parse_token(&token).unwrap_err();
        prop_assert!(err.is_signature_invalid(), "unexpected error: {}", err);
    }

    /// Property 3: Token Structure
    ///
    /// Every token has three base64url segments and an HS256 header.
    #[test]
    fn prop_token_structure(secret in arb_secret(), claims in arb_claims()) {
        let token = service(secret).create_token(claims).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        prop_assert_eq!(parts.len(), 3, "JWT must have 3 parts");

        let header_json = base64::Engine::decode(
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            parts[0],
        ).unwrap();
        let header: Value = serde_json::from_slice(&header_json).unwrap();
        prop_assert_eq!(&header["alg"], "HS256");
        prop_assert_eq!(&header["typ"], "JWT");
    }

    /// Swapping in a different payload invalidates the signature.
    #[test]
    fn prop_payload_tampering_rejected(secret in arb_secret(), value in "[a-z]{1,16}") {
        let mut claims = ClaimsSet::new();
        claims.insert("x_data".to_string(), Value::from(value));
        let mut svc = service(secret);
        let token = svc.create_token(claims).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let forged_payload = base64::Engine::encode(
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            br#"{"x_data":"forged!"}"#,
        );
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        prop_assert!(svc.parse_token(&forged).unwrap_err().is_signature_invalid());
    }
}
