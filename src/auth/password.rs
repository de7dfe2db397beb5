//! Bcrypt password storage. Only the hash ever reaches the database.

use crate::error::AppError;
use bcrypt::{hash, verify};

// bcrypt work factor; the crate default.
const BCRYPT_COST: u32 = 12;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_hash_verifies_only_the_right_password() {
        let hashed = hash_password("correct horse battery staple").unwrap();

        assert_ne!(hashed, "correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &hashed).unwrap());
        assert!(!verify_password("incorrect horse", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        // Two hashes of the same password must differ, or the salt is broken.
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same password", &first).unwrap());
        assert!(verify_password("same password", &second).unwrap());
    }

    #[test]
    fn test_garbage_stored_hash_never_verifies() {
        // bcrypt reports a malformed hash either as an error or as a plain
        // mismatch; both are acceptable, a successful verify is not.
        match verify_password("whatever", "not-a-bcrypt-hash") {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to verify password"));
            }
            Ok(false) => {}
            Ok(true) => panic!("malformed hash must not verify"),
            Err(e) => panic!("unexpected error kind: {:?}", e),
        }
    }
}
