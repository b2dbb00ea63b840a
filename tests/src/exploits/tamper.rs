//! # Tampering
//!
//! An attacker edits a legitimately signed URL in transit.

#[cfg(test)]
mod tests {
    use rand::seq::SliceRandom;
    use std::time::{Duration, UNIX_EPOCH};
    use url_signing::{FixedClock, Secret, SigningConfig, UrlSigningApi, UrlSigningService};

    fn service() -> UrlSigningService<FixedClock> {
        UrlSigningService::with_clock(
            Secret::from("tamper-secret"),
            SigningConfig::default(),
            FixedClock::new(UNIX_EPOCH + Duration::from_secs(1_700_000_000)),
        )
    }

    /// ATTACK: Flip every single character outside the token
    #[test]
    fn test_single_character_edits() {
        let service = service();
        let signed = service.sign_url("/pay?amount=10&to=alice").unwrap();
        let token_at = signed.find("&token=").unwrap();

        for i in 1..token_at {
            let mut bytes = signed.clone().into_bytes();
            bytes[i] = if bytes[i] == b'z' { b'y' } else { b'z' };
            let edited = String::from_utf8(bytes).unwrap();
            if edited == signed {
                continue;
            }
            assert!(!service.is_valid_signature(&edited), "accepted {edited}");
        }
    }

    /// Shuffling the parameters is not tampering
    #[test]
    fn test_shuffle_is_not_tampering() {
        let service = service();
        let signed = service.sign_url("/r?a=1&b=2&c=3&d=4&e=5").unwrap();
        let (path, query) = signed.split_once('?').unwrap();

        let mut segments: Vec<&str> = query.split('&').collect();
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            segments.shuffle(&mut rng);
            let shuffled = format!("{path}?{}", segments.join("&"));
            assert!(service.is_valid_signature(&shuffled), "rejected {shuffled}");
        }
    }

    /// ATTACK: Decode an encoded separator to split one value into two pairs
    ///
    /// The payload joins decoded pairs with a literal `&`, so a value holding
    /// `%26...%3D` is indistinguishable from two separate pairs once the
    /// split pairs already sort in the same order. The token carries over.
    #[test]
    fn test_encoded_separator_collision_accepted() {
        let service = service();
        let signed = service.sign_url("/r?a=1%26b%3D2").unwrap();

        let split = signed.replace("a=1%26b%3D2", "a=1&b=2");
        assert!(service.is_valid_signature(&split));
    }

    /// Splitting only fails when the resulting pairs sort differently.
    #[test]
    fn test_encoded_separator_split_reordered() {
        let service = service();
        let signed = service.sign_url("/r?note=a%26admin%3Dtrue").unwrap();
        assert!(service.is_valid_signature(&signed));

        // "admin=true" sorts before "note=a", changing the payload
        let split = signed.replace("a%26admin%3Dtrue", "a&admin=true");
        assert!(!service.is_valid_signature(&split));
    }

    /// ATTACK: Change the case of a key
    #[test]
    fn test_key_case_matters() {
        let service = service();
        let signed = service.sign_url("/r?user=1").unwrap();
        assert!(!service.is_valid_signature(&signed.replace("user=", "User=")));
    }
}
