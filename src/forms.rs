use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Field-level messages for redisplaying a form, one per field.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, String)>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push((field.into(), message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Keeps one message per field. A missing value outranks whatever else the
/// empty string failed.
impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        for (field, field_errors) in errors.field_errors() {
            let shown = field_errors
                .iter()
                .find(|error| error.code == "required")
                .or_else(|| field_errors.first());
            if let Some(error) = shown {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                };
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

/// For `#[validate(custom(function = "crate::forms::required"))]` on
/// already-trimmed text.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("This field is required.")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(custom(function = "crate::forms::required"), email(message = "Enter a valid email address."))]
        email: String,
        #[validate(length(max = 3, message = "Too long."))]
        nick: String,
    }

    #[test]
    fn required_wins_over_other_failures() {
        let errors: FieldErrors = Signup {
            email: String::new(),
            nick: "abcd".to_owned(),
        }
        .validate()
        .unwrap_err()
        .into();

        assert_eq!(errors.get("email"), Some("This field is required."));
        assert_eq!(errors.get("nick"), Some("Too long."));
        assert_eq!(errors.get("other"), None);
    }

    #[test]
    fn valid_input_has_no_errors() {
        let signup = Signup {
            email: "li@example.com".to_owned(),
            nick: "li".to_owned(),
        };
        assert!(signup.validate().is_ok());
    }
}
