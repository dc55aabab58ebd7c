use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Creates a random alphanumeric secret of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

/// Creates a human readable reference code, e.g. `BK-7F2K9QXA`.
/// These codes end up in customer facing messages so they are kept
/// short and uppercase.
pub fn create_reference_code(prefix: &str, len: usize) -> String {
    format!("{}-{}", prefix, create_random_secret(len).to_uppercase())
}
