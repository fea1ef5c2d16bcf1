//! Sailthru request signing
//!
//! Every call carries `sig`: the hex MD5 of the shared secret followed by the
//! values of all other request parameters, sorted bytewise and concatenated.

/// Computes the request signature for the given parameter values
pub fn sign(secret: &str, values: &[&str]) -> String {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mut payload = String::with_capacity(secret.len() + sorted.iter().map(|v| v.len()).sum::<usize>());
    payload.push_str(secret);
    for value in sorted {
        payload.push_str(value);
    }

    format!("{:x}", md5::compute(payload.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_known_vector() {
        let sig = sign("secret", &["key", "json", r#"{"job_id":"abc"}"#]);
        assert_eq!(sig, "fd775d268ce4793e98d3780170b5702e");
    }

    #[test]
    fn test_sign_is_order_independent() {
        let a = sign("secret", &["key", "json", r#"{"job_id":"abc"}"#]);
        let b = sign("secret", &[r#"{"job_id":"abc"}"#, "key", "json"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sign_empty() {
        assert_eq!(sign("", &[]), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
