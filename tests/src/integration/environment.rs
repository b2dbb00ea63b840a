//! # Environment-Driven Setup
//!
//! Services that build their configuration from the environment, with
//! logging installed the same way a deployed service would.

#[cfg(test)]
mod tests {
    use signing_telemetry::{init_logging, TelemetryConfig, TelemetryError};
    use std::collections::HashMap;
    use std::time::{Duration, UNIX_EPOCH};
    use url_signing::{
        ConfigError, FixedClock, HashAlgorithm, Secret, SecretDiagnostics, SigningConfig,
        UrlSigningApi, UrlSigningService,
    };

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn quiet_logging() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("URLSIGN_LOG_LEVEL", "debug"),
            ("URLSIGN_CONSOLE_OUTPUT", "false"),
        ]));
        match init_logging(&config) {
            Ok(()) | Err(TelemetryError::SubscriberInit(_)) => {}
            Err(e) => panic!("unexpected telemetry error: {e}"),
        }
    }

    #[test]
    fn test_both_sides_from_same_environment() {
        quiet_logging();
        let env = lookup(&[
            ("URLSIGN_BUCKET_SECS", "120"),
            ("URLSIGN_HMAC_ALGORITHM", "sha512"),
        ]);
        let config = SigningConfig::from_lookup(&env).unwrap();
        assert_eq!(config.algorithm, HashAlgorithm::Sha512);
        assert_eq!(config.bucket_size, Duration::from_secs(120));

        let at = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let issuer = UrlSigningService::with_clock(
            Secret::from("k"),
            config.clone(),
            FixedClock::new(at),
        );
        let verifier = UrlSigningService::with_clock(
            Secret::from("k"),
            SigningConfig::from_lookup(&env).unwrap(),
            FixedClock::new(at + Duration::from_secs(100)),
        );

        let link = issuer.sign_url("/r?x=1").unwrap();
        assert_eq!(issuer.generate_token("/r?x=1").unwrap().as_str().len(), 128);
        assert!(verifier.is_valid_signature(&link));
    }

    #[test]
    fn test_environment_cannot_expose_secrets() {
        let config = SigningConfig::from_lookup(lookup(&[
            ("URLSIGN_SECRET_DIAGNOSTICS", "exposed"),
            ("URLSIGN_EXPOSE_SECRETS", "true"),
        ]))
        .unwrap();
        assert_eq!(config.secret_diagnostics, SecretDiagnostics::Redacted);
    }

    #[test]
    fn test_exposed_diagnostics_with_subscriber_installed() {
        quiet_logging();
        let config = SigningConfig::default().with_secret_diagnostics(SecretDiagnostics::Exposed);
        let service = UrlSigningService::with_clock(
            Secret::from("k"),
            config,
            FixedClock::new(UNIX_EPOCH + Duration::from_secs(1_700_000_000)),
        );

        let link = service.sign_url("/debug?x=1").unwrap();
        assert!(service.is_valid_signature(&link));
        assert!(!service.is_valid_signature("/debug?x=1&token=00"));
    }

    #[test]
    fn test_bad_environment_is_reported() {
        let result = SigningConfig::from_lookup(lookup(&[("URLSIGN_BUCKET_SECS", "-5")]));
        assert!(matches!(result, Err(ConfigError::InvalidBucketSize(_))));

        let result = SigningConfig::from_lookup(lookup(&[("URLSIGN_HMAC_ALGORITHM", "crc32")]));
        assert!(matches!(result, Err(ConfigError::UnknownAlgorithm(_))));
    }
}
