use validator::ValidateEmail;

/// Validates that the input looks like a deliverable email address.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}
