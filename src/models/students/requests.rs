use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::lenient::null_as_default;
use crate::utils::validate::{FieldErrors, require_text, validate_email};

// 新建学生表单
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<NewStudent, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = require_text(&mut errors, "name", &self.name, "Name is required");
        let email = self.email.trim().to_string();
        if let Err(msg) = validate_email(&email) {
            errors.add("email", msg);
        }
        let phone = require_text(&mut errors, "phone", &self.phone, "Phone is required");

        errors.into_result(NewStudent { name, email, phone })
    }
}
