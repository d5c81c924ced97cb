use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::lenient::{null_as_default, optional_number};
use crate::utils::validate::{
    FieldErrors, parse_timestamp, positive_integer, require_text, to_iso_string, validate_uuid,
};

// 新建班级表单（来自前端）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "optional_number")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub main_instructor_id: String,
}

// 校验通过后发往 POST /classes 的内容
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClass {
    pub title: String,
    pub date: String,
    pub description: String,
    pub duration: i64,
    pub main_instructor_id: String,
}

impl CreateClassRequest {
    pub fn validate(&self) -> Result<NewClass, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = require_text(&mut errors, "title", &self.title, "Title is required");
        let description = require_text(
            &mut errors,
            "description",
            &self.description,
            "Description is required",
        );

        let date = match parse_timestamp(&self.date) {
            Ok(date) => to_iso_string(&date),
            Err(msg) => {
                errors.add("date", msg);
                String::new()
            }
        };

        let duration = match positive_integer(self.duration) {
            Ok(duration) => duration,
            Err("Value is required") => {
                errors.add("duration", "Duration is required");
                0
            }
            Err(_) => {
                errors.add("duration", "Duration must be a positive number");
                0
            }
        };

        let main_instructor_id = self.main_instructor_id.trim().to_string();
        if validate_uuid(&main_instructor_id).is_err() {
            errors.add("mainInstructorId", "Please select an instructor");
        }

        errors.into_result(NewClass {
            title,
            date,
            description,
            duration,
            main_instructor_id,
        })
    }
}

// 发往 POST /{classes|students}/{id}/status 的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateClassRequest {
        CreateClassRequest {
            title: "Algebra I".to_string(),
            date: "2025-03-10T14:00:00Z".to_string(),
            description: "Linear equations".to_string(),
            duration: Some(60.0),
            main_instructor_id: "3f1c7d0e-8a2b-4c3d-9e4f-5a6b7c8d9e0f".to_string(),
        }
    }

    #[test]
    fn test_valid_class() {
        let class = valid().validate().unwrap();
        assert_eq!(class.duration, 60);
        assert_eq!(class.date, "2025-03-10T14:00:00.000Z");
    }

    #[test]
    fn test_negative_duration_rejected() {
        let request = CreateClassRequest {
            duration: Some(-5.0),
            ..valid()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.get("duration"),
            Some("Duration must be a positive number")
        );
        assert_eq!(errors.fields.len(), 1);
    }

    #[test]
    fn test_fractional_duration_rejected() {
        let request = CreateClassRequest {
            duration: Some(1.5),
            ..valid()
        };
        assert!(request.validate().unwrap_err().get("duration").is_some());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = CreateClassRequest::default().validate().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert_eq!(errors.get("date"), Some("Date is required"));
        assert_eq!(errors.get("duration"), Some("Duration is required"));
        assert_eq!(
            errors.get("mainInstructorId"),
            Some("Please select an instructor")
        );
    }

    #[test]
    fn test_payload_shape() {
        let json = serde_json::to_value(valid().validate().unwrap()).unwrap();
        assert_eq!(json["mainInstructorId"], "3f1c7d0e-8a2b-4c3d-9e4f-5a6b7c8d9e0f");
        assert_eq!(json["duration"], 60);
    }
}
