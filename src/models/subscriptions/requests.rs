use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::lenient::{null_as_default, optional_number};
use crate::utils::validate::{FieldErrors, positive_amount, require_text, validate_email};

const ALL: &str = "all";

fn default_all() -> String {
    ALL.to_string()
}

// 学生订阅列表筛选条件（查询参数）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct SubscriptionFilters {
    // all | active | inactive
    #[serde(default = "default_all")]
    pub status: String,
    // all | 订阅类型名称
    #[serde(rename = "type", default = "default_all")]
    pub subscription_type: String,
    // all | today | this-week | this-month | last-month
    #[serde(default = "default_all")]
    pub period: String,
}

impl Default for SubscriptionFilters {
    fn default() -> Self {
        Self {
            status: default_all(),
            subscription_type: default_all(),
            period: default_all(),
        }
    }
}

impl SubscriptionFilters {
    /// 后端查询路径，值为 all 或空的条件不发送
    pub fn to_path(&self) -> String {
        let params: Vec<String> = [
            ("status", &self.status),
            ("type", &self.subscription_type),
            ("period", &self.period),
        ]
        .into_iter()
        .filter(|(_, value)| {
            let value = value.trim();
            !value.is_empty() && value != ALL
        })
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value.trim())))
        .collect();

        if params.is_empty() {
            "/subscriptions/students".to_string()
        } else {
            format!("/subscriptions/students?{}", params.join("&"))
        }
    }
}

// 登记学生订阅表单
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct RegisterSubscriptionRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub student_email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscription_type: String,
    #[serde(default, deserialize_with = "optional_number")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub student_email: String,
    pub subscription_type: String,
    pub amount: f64,
}

impl RegisterSubscriptionRequest {
    pub fn validate(&self) -> Result<NewSubscription, FieldErrors> {
        let mut errors = FieldErrors::new();

        let student_email = self.student_email.trim().to_string();
        if student_email.is_empty() {
            errors.add("studentEmail", "Student email is required");
        } else if let Err(msg) = validate_email(&student_email) {
            errors.add("studentEmail", msg);
        }

        let subscription_type = require_text(
            &mut errors,
            "subscriptionType",
            &self.subscription_type,
            "Subscription type is required",
        );

        let amount = positive_amount(self.amount).unwrap_or_else(|msg| {
            errors.add("amount", msg);
            0.0
        });

        errors.into_result(NewSubscription {
            student_email,
            subscription_type,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_to_path() {
        assert_eq!(
            SubscriptionFilters::default().to_path(),
            "/subscriptions/students"
        );

        let filters = SubscriptionFilters {
            status: "active".to_string(),
            subscription_type: "Monthly Plan".to_string(),
            period: ALL.to_string(),
        };
        assert_eq!(
            filters.to_path(),
            "/subscriptions/students?status=active&type=Monthly%20Plan"
        );
    }

    #[test]
    fn test_filters_from_query() {
        let filters: SubscriptionFilters =
            serde_json::from_str(r#"{"type":"Annual","period":"this-month"}"#).unwrap();
        assert_eq!(filters.status, "all");
        assert_eq!(
            filters.to_path(),
            "/subscriptions/students?type=Annual&period=this-month"
        );
    }

    #[test]
    fn test_register_validation() {
        let request = RegisterSubscriptionRequest {
            student_email: "alice@example.com".to_string(),
            subscription_type: "Monthly".to_string(),
            amount: Some(49.9),
        };
        assert_eq!(request.validate().unwrap().amount, 49.9);

        let errors = RegisterSubscriptionRequest::default().validate().unwrap_err();
        assert_eq!(errors.get("studentEmail"), Some("Student email is required"));
        assert_eq!(
            errors.get("subscriptionType"),
            Some("Subscription type is required")
        );
        assert_eq!(errors.get("amount"), Some("Amount is required"));

        let errors = RegisterSubscriptionRequest {
            student_email: "nope".to_string(),
            subscription_type: "Monthly".to_string(),
            amount: Some(-1.0),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("studentEmail"), Some("Invalid email address"));
        assert_eq!(errors.get("amount"), Some("Amount must be greater than zero"));
    }
}
