//! 表单校验
//!
//! 所有写操作在发往远端之前都先经过这里的校验，失败时按字段返回错误信息。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

/// 按字段聚合的校验错误，每个字段只保留第一条
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/form.ts")]
pub struct FieldErrors {
    pub fields: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 没有错误时返回 `value`
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// 必填文本，返回去掉首尾空白后的值
pub fn require_text(errors: &mut FieldErrors, field: &str, value: &str, message: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
    }
    trimmed.to_string()
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err("Invalid email address");
    }
    Ok(())
}

pub fn validate_uuid(value: &str) -> Result<(), &'static str> {
    uuid::Uuid::parse_str(value.trim())
        .map(|_| ())
        .map_err(|_| "Must be a valid identifier")
}

/// 正整数（允许 JSON 中写成 60.0）
pub fn positive_integer(value: Option<f64>) -> Result<i64, &'static str> {
    let value = value.ok_or("Value is required")?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err("Must be a whole number");
    }
    if value <= 0.0 {
        return Err("Must be a positive number");
    }
    Ok(value as i64)
}

pub fn positive_amount(value: Option<f64>) -> Result<f64, &'static str> {
    match value {
        Some(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        Some(_) => Err("Amount must be greater than zero"),
        None => Err("Amount is required"),
    }
}

/// 解析时间，接受 RFC 3339、不带时区的 ISO 时间或纯日期（按 UTC 处理）
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Date is required");
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
        .ok_or("Date format is invalid")
}

/// 与浏览器 `toISOString()` 相同的输出格式
pub fn to_iso_string(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
