use regex::Regex;

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// Length is counted in chars (Unicode scalar values), so an emoji outside
/// the BMP is one character here where a UTF-16 count would see two.
pub fn min_length(min_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() < min_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn regex(pattern: &str, message: impl Into<String>) -> Validator {
    let re = Regex::new(pattern).expect("Invalid regex pattern");
    let message = message.into();
    Box::new(move |value: &str| {
        if re.is_match(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn email(message: impl Into<String>) -> Validator {
    regex(EMAIL_PATTERN, message)
}

#[cfg(test)]
mod tests {
    use super::{email, min_length, run_validators};

    #[test]
    fn min_length_counts_chars_not_bytes() {
        let validator = min_length(2, "too short");
        assert!(validator("é").is_err());
        assert!(validator("éa").is_ok());
        assert!(validator("😀").is_err());
        assert!(validator("😀😀").is_ok());
    }

    #[test]
    fn email_requires_a_dot_in_the_domain() {
        let validator = email("bad");
        assert!(validator("a@b.com").is_ok());
        assert!(validator("a@b").is_err());
        assert!(validator("a b@c.de").is_err());
        assert!(validator("@b.com").is_err());
    }

    #[test]
    fn run_validators_stops_at_first_failure() {
        let validators = vec![min_length(3, "short"), email("bad")];
        assert_eq!(run_validators(&validators, "ab"), Err("short".to_string()));
        assert_eq!(run_validators(&validators, "abc"), Err("bad".to_string()));
        assert_eq!(run_validators(&validators, "a@b.co"), Ok(()));
    }
}
