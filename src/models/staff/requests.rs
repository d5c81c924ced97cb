use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::lenient::null_as_default;
use crate::utils::validate::{FieldErrors, require_text, validate_email};

fn required_email(errors: &mut FieldErrors, value: &str) -> String {
    let email = require_text(errors, "email", value, "Email is required");
    if !email.is_empty()
        && let Err(msg) = validate_email(&email)
    {
        errors.add("email", msg);
    }
    email
}

// 新建讲师表单
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct CreateInstructorRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewInstructor {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CreateInstructorRequest {
    pub fn validate(&self) -> Result<NewInstructor, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = require_text(&mut errors, "name", &self.name, "Name is required");
        let email = required_email(&mut errors, &self.email);
        let phone = self
            .phone
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        errors.into_result(NewInstructor { name, email, phone })
    }
}

// 新建教师表单
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct CreateTeacherRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
}

impl CreateTeacherRequest {
    pub fn validate(&self) -> Result<NewTeacher, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = require_text(&mut errors, "name", &self.name, "Name is required");
        let email = required_email(&mut errors, &self.email);

        errors.into_result(NewTeacher { name, email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructor_phone_is_optional() {
        let request = CreateInstructorRequest {
            name: "Dr. Smith".to_string(),
            email: "smith@example.com".to_string(),
            phone: None,
        };
        assert_eq!(request.validate().unwrap().phone, "");
    }

    #[test]
    fn test_teacher_fields_are_trimmed() {
        let request = CreateTeacherRequest {
            name: "  ".to_string(),
            email: " ".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));

        let teacher = CreateTeacherRequest {
            name: " Ana ".to_string(),
            email: " ana@example.com ".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(teacher.name, "Ana");
        assert_eq!(teacher.email, "ana@example.com");
    }

    #[test]
    fn test_invalid_email_shape() {
        let errors = CreateTeacherRequest {
            name: "Ana".to_string(),
            email: "ana-at-example".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
    }
}
