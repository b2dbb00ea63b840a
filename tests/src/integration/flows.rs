//! # Integration Test Flows
//!
//! An issuer hands out a signed link; a verifier that shares only the secret
//! and the configuration decides whether to serve it.
//!
//! ## Flows Tested:
//!
//! 1. **Issue → Verify**: Separate service instances, same secret
//! 2. **Clock skew**: Verifier up to one bucket ahead or behind
//! 3. **Independent recomputation**: Token matches a hand-rolled two-layer HMAC
//! 4. **Concurrent verification**: One service shared across threads

#[cfg(test)]
mod tests {
    use hmac::{Hmac, Mac};
    use sha1::Sha1;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    use url_signing::{
        FixedClock, HashAlgorithm, Secret, SigningConfig, SigningConfigBuilder, UrlSigningApi,
        UrlSigningService,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const SHARED_SECRET: &str = "edge-and-origin-share-this";

    fn t0() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn issuer(config: SigningConfig) -> UrlSigningService<FixedClock> {
        UrlSigningService::with_clock(
            Secret::from(SHARED_SECRET),
            config,
            FixedClock::new(t0()),
        )
    }

    fn verifier(config: SigningConfig, now: SystemTime) -> UrlSigningService<FixedClock> {
        UrlSigningService::with_clock(Secret::from(SHARED_SECRET), config, FixedClock::new(now))
    }

    fn hmac_sha1(key: &[u8], data: &[u8]) -> Vec<u8> {
        let mut mac = Hmac::<Sha1>::new_from_slice(key).unwrap();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }

    // =============================================================================
    // ISSUE → VERIFY
    // =============================================================================

    #[test]
    fn test_issuer_to_verifier_handoff() {
        let link = issuer(SigningConfig::default())
            .sign_url("https://downloads.example/files/report.pdf?user=42&expires=soon")
            .unwrap();

        let edge = verifier(SigningConfig::default(), t0() + Duration::from_secs(5));
        assert!(edge.is_valid_signature(&link));
    }

    #[test]
    fn test_verifier_sees_only_path_and_query() {
        let link = issuer(SigningConfig::default())
            .sign_url("https://origin.internal/files/a?x=1")
            .unwrap();

        // The edge receives the request line only
        let request_target = link.trim_start_matches("https://origin.internal");
        let edge = verifier(SigningConfig::default(), t0());
        assert!(edge.is_valid_signature(request_target));
    }

    #[test]
    fn test_query_reordered_by_proxy() {
        let issuer = issuer(SigningConfig::default());
        let token = issuer.generate_token("/api/export?format=csv&from=2023&to=2024").unwrap();

        // A proxy that rewrites the query in a different order
        let rewritten = format!("/api/export?token={token}&to=2024&format=csv&from=2023");
        assert!(verifier(SigningConfig::default(), t0()).is_valid_signature(&rewritten));
    }

    #[test]
    fn test_configuration_must_match() {
        let sha256 = SigningConfigBuilder::new().algorithm(HashAlgorithm::Sha256).build();
        let link = issuer(sha256.clone()).sign_url("/r?x=1").unwrap();

        assert!(verifier(sha256, t0()).is_valid_signature(&link));
        assert!(!verifier(SigningConfig::default(), t0()).is_valid_signature(&link));
    }

    // =============================================================================
    // CLOCK SKEW
    // =============================================================================

    #[test]
    fn test_verifier_clock_skew_within_one_bucket() {
        let config = SigningConfigBuilder::new().bucket_secs(300).build();
        let link = issuer(config.clone()).sign_url("/r?x=1").unwrap();

        for skew in [0u64, 60, 200, 299] {
            let skew_d = Duration::from_secs(skew);
            let ahead = verifier(config.clone(), t0() + skew_d);
            let behind = verifier(config.clone(), t0() - skew_d);
            assert!(ahead.is_valid_signature(&link), "ahead by {skew}s");
            assert!(behind.is_valid_signature(&link), "behind by {skew}s");
        }
    }

    #[test]
    fn test_verifier_clock_skew_beyond_window() {
        let config = SigningConfigBuilder::new().bucket_secs(300).build();
        let link = issuer(config.clone()).sign_url("/r?x=1").unwrap();

        let far = Duration::from_secs(900);
        assert!(!verifier(config.clone(), t0() + far).is_valid_signature(&link));
        assert!(!verifier(config, t0() - far).is_valid_signature(&link));
    }

    // =============================================================================
    // INDEPENDENT RECOMPUTATION
    // =============================================================================

    #[test]
    fn test_token_matches_independent_computation() {
        let bucket_index: i64 = 1_700_000_000 / 60;
        let bucket_key = hmac_sha1(SHARED_SECRET.as_bytes(), &bucket_index.to_be_bytes());
        let expected = hex::encode(hmac_sha1(&bucket_key, b"/resource?a=1&b=2"));

        let token = issuer(SigningConfig::default())
            .generate_token("/resource?b=2&a=1")
            .unwrap();
        assert_eq!(token.as_str(), expected);
    }

    #[test]
    fn test_hand_signed_url_accepted() {
        let bucket_index: i64 = 1_700_000_000 / 60;
        let bucket_key = hmac_sha1(SHARED_SECRET.as_bytes(), &bucket_index.to_be_bytes());
        let token = hex::encode(hmac_sha1(&bucket_key, b"/healthz?"));

        let url = format!("/healthz?token={token}");
        assert!(verifier(SigningConfig::default(), t0()).is_valid_signature(&url));
    }

    // =============================================================================
    // CONCURRENT VERIFICATION
    // =============================================================================

    #[test]
    fn test_shared_service_across_threads() {
        let service: Arc<dyn UrlSigningApi> = Arc::new(issuer(SigningConfig::default()));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    (0..50).all(|i| {
                        let url = format!("/w/{worker}?item={i}");
                        let signed = service.sign_url(&url).unwrap();
                        let forged = signed.replace(&format!("item={i}"), "item=-1");
                        service.is_valid_signature(&signed) && !service.is_valid_signature(&forged)
                    })
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
