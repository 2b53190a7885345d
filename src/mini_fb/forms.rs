use serde::Deserialize;
use validator::Validate;

pub use crate::forms::FieldErrors;

use super::models::{NewProfile, ProfileUpdate};

#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct CreateProfileForm {
    #[validate(custom(function = "crate::forms::required"), length(max = 50, message = "Keep this under 50 characters."))]
    pub first_name: String,
    #[validate(custom(function = "crate::forms::required"), length(max = 50, message = "Keep this under 50 characters."))]
    pub last_name: String,
    #[validate(custom(function = "crate::forms::required"), length(max = 50, message = "Keep this under 50 characters."))]
    pub city: String,
    #[validate(custom(function = "crate::forms::required"), email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(max = 200, message = "Keep this under 200 characters."))]
    pub profile_image_url: String,
}

impl CreateProfileForm {
    fn trimmed(&self) -> CreateProfileForm {
        CreateProfileForm {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            city: self.city.trim().to_owned(),
            email: self.email.trim().to_owned(),
            profile_image_url: self.profile_image_url.trim().to_owned(),
        }
    }

    pub fn to_new_profile(&self) -> Result<NewProfile, FieldErrors> {
        let form = self.trimmed();
        form.validate()?;
        Ok(NewProfile {
            user_id: None,
            first_name: form.first_name,
            last_name: form.last_name,
            city: form.city,
            email: form.email,
            profile_image_url: form.profile_image_url,
        })
    }
}

/// Names are fixed once the profile exists.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfileForm {
    #[validate(custom(function = "crate::forms::required"), length(max = 50, message = "Keep this under 50 characters."))]
    pub city: String,
    #[validate(custom(function = "crate::forms::required"), email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(max = 200, message = "Keep this under 200 characters."))]
    pub profile_image_url: String,
}

impl UpdateProfileForm {
    fn trimmed(&self) -> UpdateProfileForm {
        UpdateProfileForm {
            city: self.city.trim().to_owned(),
            email: self.email.trim().to_owned(),
            profile_image_url: self.profile_image_url.trim().to_owned(),
        }
    }

    pub fn to_update(&self) -> Result<ProfileUpdate, FieldErrors> {
        let form = self.trimmed();
        form.validate()?;
        Ok(ProfileUpdate {
            city: form.city,
            email: form.email,
            profile_image_url: form.profile_image_url,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct StatusForm {
    #[validate(custom(function = "crate::forms::required"), length(max = 1000, message = "Keep this under 1000 characters."))]
    pub message: String,
}

impl StatusForm {
    pub fn to_message(&self) -> Result<String, FieldErrors> {
        let form = StatusForm {
            message: self.message.trim().to_owned(),
        };
        form.validate()?;
        Ok(form.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CreateProfileForm {
        CreateProfileForm {
            first_name: " Guanyu ".to_owned(),
            last_name: "Zhou".to_owned(),
            city: "Shanghai".to_owned(),
            email: " zhou@example.com ".to_owned(),
            profile_image_url: String::new(),
        }
    }

    #[test]
    fn accepts_and_trims_a_complete_profile() {
        let new = filled().to_new_profile().unwrap();
        assert_eq!(new.first_name, "Guanyu");
        assert_eq!(new.email, "zhou@example.com");
        assert_eq!(new.profile_image_url, "");
        assert_eq!(new.user_id, None);
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = CreateProfileForm::default().to_new_profile().unwrap_err();
        for field in ["first_name", "last_name", "city", "email"] {
            assert_eq!(errors.get(field), Some("This field is required."), "{field}");
        }
        assert_eq!(errors.get("profile_image_url"), None);
    }

    #[test]
    fn blank_is_missing() {
        let form = CreateProfileForm {
            last_name: "   ".to_owned(),
            ..filled()
        };
        assert_eq!(
            form.to_new_profile().unwrap_err().get("last_name"),
            Some("This field is required.")
        );
    }

    #[test]
    fn rejects_bad_emails() {
        for bad in ["zhou", "zhou@", "@example.com", "zh ou@example.com", "a@b@c.com", "zhou@example."] {
            let form = CreateProfileForm {
                email: bad.to_owned(),
                ..filled()
            };
            let errors = form.to_new_profile().unwrap_err();
            assert_eq!(errors.get("email"), Some("Enter a valid email address."), "{bad}");
        }
    }

    #[test]
    fn limits_lengths() {
        let form = CreateProfileForm {
            city: "x".repeat(51),
            profile_image_url: "y".repeat(201),
            ..filled()
        };
        let errors = form.to_new_profile().unwrap_err();
        assert_eq!(errors.get("city"), Some("Keep this under 50 characters."));
        assert_eq!(errors.get("profile_image_url"), Some("Keep this under 200 characters."));
    }

    #[test]
    fn update_keeps_names_out() {
        let update = UpdateProfileForm {
            city: "Boston".to_owned(),
            email: "zhou@bu.edu".to_owned(),
            profile_image_url: "mini_fb/images/zhou.jpg".to_owned(),
        }
        .to_update();
        assert_eq!(
            update,
            Ok(ProfileUpdate {
                city: "Boston".to_owned(),
                email: "zhou@bu.edu".to_owned(),
                profile_image_url: "mini_fb/images/zhou.jpg".to_owned(),
            })
        );
    }

    #[test]
    fn status_needs_text() {
        assert_eq!(StatusForm { message: "  hi ".to_owned() }.to_message(), Ok("hi".to_owned()));
        assert!(StatusForm { message: "   ".to_owned() }.to_message().is_err());
        assert_eq!(
            StatusForm { message: "z".repeat(1001) }.to_message().unwrap_err().get("message"),
            Some("Keep this under 1000 characters.")
        );
    }
}
