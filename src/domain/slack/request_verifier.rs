//! Slack request signature verification.
//!
//! Slack signs every slash command request with HMAC-SHA256 over
//! `v0:<timestamp>:<raw body>` using the app's signing secret, and sends the
//! result as `X-Slack-Signature: v0=<hex>`. Timestamp validation rejects
//! replayed requests.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::VerificationError;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "X-Slack-Signature";

/// Header carrying the Unix timestamp the signature was computed for.
pub const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";

/// Signature scheme version prefix.
const VERSION: &str = "v0";

/// Maximum allowed clock skew for future timestamps (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Verifier for inbound Slack request signatures.
pub struct SlackRequestVerifier {
    /// Signing secret from the Slack app settings.
    secret: Secret<String>,
    /// Oldest accepted request age in seconds.
    max_age_secs: i64,
}

impl SlackRequestVerifier {
    /// Creates a verifier with the given signing secret and replay window.
    pub fn new(secret: impl Into<String>, max_age_secs: u64) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            max_age_secs: i64::try_from(max_age_secs).unwrap_or(i64::MAX),
        }
    }

    /// Verifies a request against the current time.
    ///
    /// # Errors
    ///
    /// - `MissingHeader` - timestamp or signature header absent
    /// - `InvalidTimestamp` - timestamp is not an integer
    /// - `TimestampOutOfRange` - request older than the replay window
    /// - `TimestampInFuture` - request newer than clock skew allows
    /// - `InvalidSignature` - signature malformed or mismatched
    pub fn verify(
        &self,
        body: &[u8],
        timestamp: Option<&str>,
        signature: Option<&str>,
    ) -> Result<(), VerificationError> {
        self.verify_at(chrono::Utc::now().timestamp(), body, timestamp, signature)
    }

    fn verify_at(
        &self,
        now: i64,
        body: &[u8],
        timestamp: Option<&str>,
        signature: Option<&str>,
    ) -> Result<(), VerificationError> {
        let timestamp = timestamp.ok_or(VerificationError::MissingHeader(TIMESTAMP_HEADER))?;
        let signature = signature.ok_or(VerificationError::MissingHeader(SIGNATURE_HEADER))?;

        let timestamp: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| VerificationError::InvalidTimestamp)?;
        self.validate_timestamp(now, timestamp)?;

        let provided = signature
            .strip_prefix("v0=")
            .and_then(|hex_sig| hex::decode(hex_sig).ok())
            .ok_or(VerificationError::InvalidSignature)?;

        let expected = self.compute_signature(timestamp, body);

        if !constant_time_compare(&expected, &provided) {
            return Err(VerificationError::InvalidSignature);
        }

        Ok(())
    }

    /// Produces the `X-Slack-Signature` header value for a body.
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> String {
        format!("{}={}", VERSION, hex::encode(self.compute_signature(timestamp, body)))
    }

    fn validate_timestamp(&self, now: i64, timestamp: i64) -> Result<(), VerificationError> {
        // Out-of-range headers such as i64::MIN must not overflow.
        let age = now
            .checked_sub(timestamp)
            .ok_or(VerificationError::TimestampOutOfRange)?;

        if age > self.max_age_secs {
            return Err(VerificationError::TimestampOutOfRange);
        }

        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(VerificationError::TimestampInFuture);
        }

        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, body: &[u8]) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(format!("{}:{}:", VERSION, timestamp).as_bytes());
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time comparison so mismatches leak nothing about the expected value.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";
    const NOW: i64 = 1_531_420_618;
    const BODY: &[u8] = b"command=%2Fgenie&text=top+customers&channel_id=C123";

    fn verifier() -> SlackRequestVerifier {
        SlackRequestVerifier::new(SECRET, 300)
    }

    fn signed(timestamp: i64, body: &[u8]) -> String {
        verifier().sign(timestamp, body)
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn known_slack_example_signature_verifies() {
        // Example from Slack's "Verifying requests" documentation.
        let body = b"token=xyzz0WbapA4vBCDEFasx0q6G&team_id=T1DC2JH3J&team_domain=testteamnow&channel_id=G8PSS9T3V&channel_name=foobar&user_id=U2CERLKJA&user_name=roadrunner&command=%2Fwebhook-collect&text=&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2FT1DC2JH3J%2F397700885554%2F96rGlfmibIGlgcZRskXaIFfN&trigger_id=398738663015.47445629121.803a0bc887a14d10d2c447fce8b6703c";
        let signature = "v0=a2114d57b48eac39b9ad189dd8316235a7b4a8d21a10bd27519666489c69b503";

        let result = verifier().verify_at(NOW, body, Some("1531420618"), Some(signature));

        assert!(result.is_ok(), "{result:?}");
    }

    #[test]
    fn valid_signature_verifies() {
        let signature = signed(NOW, BODY);
        let result = verifier().verify_at(NOW, BODY, Some(&NOW.to_string()), Some(&signature));
        assert!(result.is_ok());
    }

    #[test]
    fn tampered_body_fails() {
        let signature = signed(NOW, BODY);

        let result = verifier().verify_at(
            NOW,
            b"command=%2Fgenie&text=drop+table",
            Some(&NOW.to_string()),
            Some(&signature),
        );

        assert_eq!(result, Err(VerificationError::InvalidSignature));
    }

    #[test]
    fn wrong_secret_fails() {
        let other = SlackRequestVerifier::new("another-secret", 300);
        let signature = other.sign(NOW, BODY);

        let result = verifier().verify_at(NOW, BODY, Some(&NOW.to_string()), Some(&signature));

        assert_eq!(result, Err(VerificationError::InvalidSignature));
    }

    #[test]
    fn signature_for_other_timestamp_fails() {
        let signature = signed(NOW - 10, BODY);
        let result = verifier().verify_at(NOW, BODY, Some(&NOW.to_string()), Some(&signature));
        assert_eq!(result, Err(VerificationError::InvalidSignature));
    }

    #[test]
    fn missing_version_prefix_fails() {
        let signature = signed(NOW, BODY).replacen("v0=", "", 1);
        let result = verifier().verify_at(NOW, BODY, Some(&NOW.to_string()), Some(&signature));
        assert_eq!(result, Err(VerificationError::InvalidSignature));
    }

    #[test]
    fn non_hex_signature_fails() {
        let result = verifier().verify_at(NOW, BODY, Some(&NOW.to_string()), Some("v0=zzzz"));
        assert_eq!(result, Err(VerificationError::InvalidSignature));
    }

    #[test]
    fn missing_headers_fail() {
        let signature = signed(NOW, BODY);

        assert_eq!(
            verifier().verify_at(NOW, BODY, None, Some(&signature)),
            Err(VerificationError::MissingHeader(TIMESTAMP_HEADER))
        );
        assert_eq!(
            verifier().verify_at(NOW, BODY, Some(&NOW.to_string()), None),
            Err(VerificationError::MissingHeader(SIGNATURE_HEADER))
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Timestamp Validation
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn non_numeric_timestamp_fails() {
        let result = verifier().verify_at(NOW, BODY, Some("yesterday"), Some("v0=00"));
        assert_eq!(result, Err(VerificationError::InvalidTimestamp));
    }

    #[test]
    fn timestamp_at_boundary_succeeds() {
        let ts = NOW - 300;
        let signature = signed(ts, BODY);
        let result = verifier().verify_at(NOW, BODY, Some(&ts.to_string()), Some(&signature));
        assert!(result.is_ok());
    }

    #[test]
    fn timestamp_past_window_fails() {
        let ts = NOW - 301;
        let signature = signed(ts, BODY);
        let result = verifier().verify_at(NOW, BODY, Some(&ts.to_string()), Some(&signature));
        assert_eq!(result, Err(VerificationError::TimestampOutOfRange));
    }

    #[test]
    fn extreme_timestamps_are_rejected_without_overflow() {
        let result = verifier().verify(b"x", Some("-9223372036854775808"), Some("v0=00"));
        assert_eq!(result, Err(VerificationError::TimestampOutOfRange));

        let result = verifier().verify_at(NOW, BODY, Some(&i64::MAX.to_string()), Some("v0=00"));
        assert_eq!(result, Err(VerificationError::TimestampInFuture));

        let result = verifier().verify_at(-1, BODY, Some(&i64::MAX.to_string()), Some("v0=00"));
        assert_eq!(result, Err(VerificationError::TimestampInFuture));
    }

    #[test]
    fn timestamp_within_skew_succeeds() {
        let ts = NOW + 30;
        let signature = signed(ts, BODY);
        let result = verifier().verify_at(NOW, BODY, Some(&ts.to_string()), Some(&signature));
        assert!(result.is_ok());
    }

    #[test]
    fn timestamp_beyond_skew_fails() {
        let ts = NOW + 120;
        let signature = signed(ts, BODY);
        let result = verifier().verify_at(NOW, BODY, Some(&ts.to_string()), Some(&signature));
        assert_eq!(result, Err(VerificationError::TimestampInFuture));
    }

    #[test]
    fn verify_uses_current_time() {
        let now = chrono::Utc::now().timestamp();
        let signature = signed(now, BODY);
        let result = verifier().verify(BODY, Some(&now.to_string()), Some(&signature));
        assert!(result.is_ok());
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_cases() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 4]));
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
        assert!(constant_time_compare(&[], &[]));
    }
}
