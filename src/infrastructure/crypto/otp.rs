//! One-time password codes for password reset

use rand::Rng;
use sha2::{Digest, Sha256};

pub const OTP_LENGTH: usize = 6;

/// Random zero-padded 6 digit code
pub fn generate_otp() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", n)
}

/// Hex SHA-256 of the code; only the hash is stored
pub fn hash_otp(code: &str) -> String {
    hex::encode(Sha256::digest(code.trim().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..50 {
            let code = generate_otp();
            assert_eq!(code.len(), OTP_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn hash_is_stable_hex() {
        let h = hash_otp("012345");
        assert_eq!(h.len(), 64);
        assert_eq!(h, hash_otp(" 012345 "));
        assert_ne!(h, hash_otp("012346"));
    }
}
