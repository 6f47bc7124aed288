//! User-facing validation messages (English only)

pub fn required(title: &str) -> String {
    format!("{} is required", title)
}

pub fn too_short(title: &str, min: u64) -> String {
    format!("{} must be at least {} characters", title, min)
}

pub fn too_long(title: &str, max: u64) -> String {
    format!("{} must be at most {} characters", title, max)
}

pub fn below_minimum(title: &str, minimum: f64) -> String {
    format!("{} must be at least {}", title, minimum)
}

pub fn above_maximum(title: &str, maximum: f64) -> String {
    format!("{} must be at most {}", title, maximum)
}

pub fn pattern_mismatch(title: &str) -> String {
    format!("{} is not in the correct format", title)
}

pub fn not_in_enum(title: &str) -> String {
    format!("{} must be one of the allowed values", title)
}

pub fn invalid_email(title: &str) -> String {
    format!("{} must be a valid email", title)
}

pub fn invalid_date(title: &str) -> String {
    format!("{} must be a valid date (YYYY-MM-DD)", title)
}

pub fn invalid_url(title: &str) -> String {
    format!("{} must be a valid URL", title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_bounds_render_without_trailing_zero() {
        assert_eq!(below_minimum("Age", 18.0), "Age must be at least 18");
        assert_eq!(above_maximum("Score", 9.5), "Score must be at most 9.5");
    }

    #[test]
    fn test_required_message() {
        assert_eq!(required("Email"), "Email is required");
    }
}
