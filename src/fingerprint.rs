use sha2::{Digest, Sha256};

// Short hash of a rate-limit key, so client addresses never land in logs
pub fn fingerprint(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_and_short() {
        let a = fingerprint("1.2.3.4");
        assert_eq!(a.len(), 12);
        assert_eq!(a, fingerprint("1.2.3.4"));
        assert_ne!(a, fingerprint("1.2.3.5"));
        assert!(!a.contains("1.2.3.4"));
    }
}
