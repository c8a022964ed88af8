//! Input-shape checks shared by the write handlers. Each route composes
//! these into its own 422 message; the caller is expected to have run the
//! same checks client-side.

pub const INVALID_INPUT: &str = "Invalid input, check your data.";

pub fn non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn min_len(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Normalize then shape-check an email address. Matches the usual
/// client-side `isEmail` check closely enough for a server-side gate.
pub fn normalize_email(value: &str) -> Option<String> {
    let email = value.trim().to_lowercase();
    let mut parts = email.split('@');
    let (local, domain) = (parts.next().unwrap_or(""), parts.next().unwrap_or(""));
    let well_formed = parts.next().is_none()
        && !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    well_formed.then_some(email)
}
