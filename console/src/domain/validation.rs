//! Field rules for manager registration.
//!
//! # Validation Rules
//!
//! - Name: at least [`NAME_MIN`] characters, ASCII letters and spaces only,
//!   starting with a letter.
//! - Email: `local@domain.tld` with no whitespace and exactly one `@`.
//! - Password: [`PASSWORD_MIN`] to [`PASSWORD_MAX`] characters with at least
//!   one uppercase letter, one lowercase letter, one digit and one character
//!   from [`PASSWORD_SPECIALS`].
//! - Password confirmation: identical to a valid password.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum allowed length for a manager name.
pub const NAME_MIN: usize = 3;
/// Minimum allowed length for a password.
pub const PASSWORD_MIN: usize = 8;
/// Maximum allowed length for a password.
pub const PASSWORD_MAX: usize = 24;
/// Special characters a password must draw at least one character from.
pub const PASSWORD_SPECIALS: &str = "!@#$%";

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        let pattern = format!("^[A-Za-z][A-Za-z ]{{{},}}$", NAME_MIN - 1);
        Regex::new(&pattern).unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `name` is acceptable as a manager name.
///
/// ```
/// use console::domain::validation::is_valid_name;
///
/// assert!(is_valid_name("Jane Doe"));
/// assert!(!is_valid_name("Jo"));
/// ```
pub fn is_valid_name(name: &str) -> bool {
    name_regex().is_match(name)
}

/// Whether `email` looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Whether `password` satisfies the length and character-class rules.
///
/// ```
/// use console::domain::validation::is_valid_password;
///
/// assert!(is_valid_password("Abc123!@"));
/// assert!(!is_valid_password("abc123!@"));
/// ```
pub fn is_valid_password(password: &str) -> bool {
    let length = password.chars().count();
    (PASSWORD_MIN..=PASSWORD_MAX).contains(&length)
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Whether `confirmation` confirms a valid `password`.
pub fn is_confirmed_password(password: &str, confirmation: &str) -> bool {
    is_valid_password(password) && password == confirmation
}
