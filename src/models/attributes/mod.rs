//! EAV 属性模型
//!
//! 属性以 `(entity_type, entity_id, name)` 为键，值按 `value_type` 编码成文本存储。
//! 每种实体类型有自己的命名与取值规则，写入前由 [`AttributeSchema::check`] 校验并归一化。

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_.]{0,63}$").expect("Invalid attribute name regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "attribute.ts")]
pub enum EntityType {
    OfferedCourse,
    Enrollment,
    Announcement,
    Room,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::OfferedCourse => "offered_course",
            EntityType::Enrollment => "enrollment",
            EntityType::Announcement => "announcement",
            EntityType::Room => "room",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offered_course" => Ok(EntityType::OfferedCourse),
            "enrollment" => Ok(EntityType::Enrollment),
            "announcement" => Ok(EntityType::Announcement),
            "room" => Ok(EntityType::Room),
            _ => Err(format!("Invalid entity type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "attribute.ts")]
pub enum AttributeType {
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    Json,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Text => "text",
            AttributeType::Integer => "integer",
            AttributeType::Decimal => "decimal",
            AttributeType::Boolean => "boolean",
            AttributeType::Date => "date",
            AttributeType::Json => "json",
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttributeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(AttributeType::Text),
            "integer" => Ok(AttributeType::Integer),
            "decimal" => Ok(AttributeType::Decimal),
            "boolean" => Ok(AttributeType::Boolean),
            "date" => Ok(AttributeType::Date),
            "json" => Ok(AttributeType::Json),
            _ => Err(format!("Invalid attribute type: {s}")),
        }
    }
}

/// 类型化的属性值
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Date(chrono::NaiveDate),
    Json(Value),
}

impl AttributeValue {
    pub fn value_type(&self) -> AttributeType {
        match self {
            AttributeValue::Text(_) => AttributeType::Text,
            AttributeValue::Integer(_) => AttributeType::Integer,
            AttributeValue::Decimal(_) => AttributeType::Decimal,
            AttributeValue::Boolean(_) => AttributeType::Boolean,
            AttributeValue::Date(_) => AttributeType::Date,
            AttributeValue::Json(_) => AttributeType::Json,
        }
    }

    /// 编码为存储文本
    pub fn encode(&self) -> String {
        match self {
            AttributeValue::Text(s) => s.clone(),
            AttributeValue::Integer(i) => i.to_string(),
            AttributeValue::Decimal(d) => d.to_string(),
            AttributeValue::Boolean(b) => b.to_string(),
            AttributeValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            AttributeValue::Json(v) => v.to_string(),
        }
    }

    /// 按声明类型解码存储文本
    pub fn decode(value_type: AttributeType, raw: &str) -> Result<Self, String> {
        let invalid = || format!("Stored value '{raw}' is not a valid {value_type}");
        Ok(match value_type {
            AttributeType::Text => AttributeValue::Text(raw.to_string()),
            AttributeType::Integer => AttributeValue::Integer(raw.parse().map_err(|_| invalid())?),
            AttributeType::Decimal => AttributeValue::Decimal(raw.parse().map_err(|_| invalid())?),
            AttributeType::Boolean => AttributeValue::Boolean(raw.parse().map_err(|_| invalid())?),
            AttributeType::Date => AttributeValue::Date(
                chrono::NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())?,
            ),
            AttributeType::Json => AttributeValue::Json(
                serde_json::from_str(raw).map_err(|_| invalid())?,
            ),
        })
    }

    /// 从 JSON 推断类型；`YYYY-MM-DD` 格式的字符串视为日期
    pub fn infer(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Err("Attribute value must not be null".to_string()),
            Value::Bool(b) => Ok(AttributeValue::Boolean(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(AttributeValue::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(AttributeValue::Decimal(f))
                } else {
                    Err(format!("Unsupported number: {n}"))
                }
            }
            Value::String(s) => match chrono::NaiveDate::parse_from_str(s, DATE_FORMAT) {
                Ok(date) if s.len() == 10 => Ok(AttributeValue::Date(date)),
                _ => Ok(AttributeValue::Text(s.clone())),
            },
            Value::Array(_) | Value::Object(_) => Ok(AttributeValue::Json(value.clone())),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            AttributeValue::Text(s) => Value::String(s.clone()),
            AttributeValue::Integer(i) => Value::from(*i),
            AttributeValue::Decimal(d) => Value::from(*d),
            AttributeValue::Boolean(b) => Value::Bool(*b),
            AttributeValue::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            AttributeValue::Json(v) => v.clone(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Decimal(d) => Some(*d),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

// 一条属性记录
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub name: String,
    pub value: AttributeValue,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 缓存与 API 使用的序列化形式
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attribute.ts")]
pub struct AttributeRecord {
    pub name: String,
    pub value_type: AttributeType,
    #[ts(type = "unknown")]
    pub value: Value,
}

impl From<&Attribute> for AttributeRecord {
    fn from(attr: &Attribute) -> Self {
        Self {
            name: attr.name.clone(),
            value_type: attr.value.value_type(),
            value: attr.value.to_json(),
        }
    }
}

impl AttributeRecord {
    pub fn typed_value(&self) -> Result<AttributeValue, String> {
        match (self.value_type, &self.value) {
            (AttributeType::Json, v) => Ok(AttributeValue::Json(v.clone())),
            (AttributeType::Text, Value::String(s)) => Ok(AttributeValue::Text(s.clone())),
            (AttributeType::Date, Value::String(s)) => {
                AttributeValue::decode(AttributeType::Date, s)
            }
            (AttributeType::Decimal, Value::Number(n)) => n
                .as_f64()
                .map(AttributeValue::Decimal)
                .ok_or_else(|| format!("Invalid decimal for '{}'", self.name)),
            (AttributeType::Integer, Value::Number(n)) => n
                .as_i64()
                .map(AttributeValue::Integer)
                .ok_or_else(|| format!("Invalid integer for '{}'", self.name)),
            (AttributeType::Boolean, Value::Bool(b)) => Ok(AttributeValue::Boolean(*b)),
            (ty, v) => Err(format!("Value {v} does not match type {ty}")),
        }
    }
}

/// 某个实体的全部属性
pub type AttributeMap = HashMap<String, AttributeValue>;

pub fn to_json_map(attrs: &AttributeMap) -> serde_json::Map<String, Value> {
    let mut keys: Vec<&String> = attrs.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|k| (k.clone(), attrs[k].to_json()))
        .collect()
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(format!(
            "Invalid attribute name '{name}': must match ^[a-z][a-z0-9_.]{{0,63}}$"
        ))
    }
}

/// 每种实体类型的属性规则
pub struct AttributeSchema;

impl AttributeSchema {
    /// 校验属性并返回归一化后的值（如整数写入小数字段时转为小数）
    pub fn check(
        entity_type: EntityType,
        name: &str,
        value: AttributeValue,
    ) -> Result<AttributeValue, String> {
        validate_name(name)?;

        match entity_type {
            EntityType::OfferedCourse => {
                if name.strip_prefix("component.").is_some_and(|n| !n.is_empty()) {
                    let weight = Self::decimal(name, &value)?;
                    if !(weight > 0.0 && weight <= 100.0) {
                        return Err(format!("'{name}' must be in (0, 100], got {weight}"));
                    }
                    return Ok(AttributeValue::Decimal(weight));
                }
                Err(format!("Unknown offered course attribute '{name}'"))
            }
            EntityType::Enrollment => {
                if name.strip_prefix("score.").is_some_and(|n| !n.is_empty()) {
                    let score = Self::decimal(name, &value)?;
                    if !(0.0..=100.0).contains(&score) {
                        return Err(format!("'{name}' must be in [0, 100], got {score}"));
                    }
                    return Ok(AttributeValue::Decimal(score));
                }
                match name {
                    "drop_reason" | "review_note" => Self::text(name, value),
                    _ => Err(format!("Unknown enrollment attribute '{name}'")),
                }
            }
            EntityType::Announcement => match name {
                "scope.offered_course_id" => match value {
                    AttributeValue::Integer(id) if id > 0 => Ok(value),
                    _ => Err(format!("'{name}' must be a positive integer")),
                },
                "scope.role" => {
                    let role = Self::text(name, value)?;
                    let parsed = role
                        .as_text()
                        .map(|r| r.parse::<UserRole>().is_ok())
                        .unwrap_or(false);
                    if parsed {
                        Ok(role)
                    } else {
                        Err(format!("'{name}' must be a role name"))
                    }
                }
                _ => Err(format!("Unknown announcement attribute '{name}'")),
            },
            EntityType::Room => match value {
                AttributeValue::Json(Value::Null) => Err(format!("'{name}' must not be null")),
                _ => Ok(value),
            },
        }
    }

    fn decimal(name: &str, value: &AttributeValue) -> Result<f64, String> {
        match value {
            AttributeValue::Decimal(_) | AttributeValue::Integer(_) => value
                .as_f64()
                .ok_or_else(|| format!("'{name}' must be a decimal")),
            _ => Err(format!("'{name}' must be a decimal")),
        }
    }

    fn text(name: &str, value: AttributeValue) -> Result<AttributeValue, String> {
        match value {
            AttributeValue::Text(ref s) if !s.trim().is_empty() => Ok(value),
            _ => Err(format!("'{name}' must be non-empty text")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_types() {
        assert_eq!(
            AttributeValue::infer(&json!(true)).unwrap(),
            AttributeValue::Boolean(true)
        );
        assert_eq!(
            AttributeValue::infer(&json!(42)).unwrap(),
            AttributeValue::Integer(42)
        );
        assert_eq!(
            AttributeValue::infer(&json!(1.5)).unwrap(),
            AttributeValue::Decimal(1.5)
        );
        assert_eq!(
            AttributeValue::infer(&json!("2026-09-01")).unwrap().value_type(),
            AttributeType::Date
        );
        assert_eq!(
            AttributeValue::infer(&json!("north wing")).unwrap().value_type(),
            AttributeType::Text
        );
        assert_eq!(
            AttributeValue::infer(&json!(["hdmi", "vga"])).unwrap().value_type(),
            AttributeType::Json
        );
        assert!(AttributeValue::infer(&Value::Null).is_err());
    }

    #[test]
    fn test_encode_decode_preserves_type() {
        let values = [
            AttributeValue::Decimal(37.5),
            AttributeValue::Date(chrono::NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()),
            AttributeValue::Json(json!({"ports": 4})),
        ];
        for v in values {
            let decoded = AttributeValue::decode(v.value_type(), &v.encode()).unwrap();
            assert_eq!(decoded, v);
        }
        assert!(AttributeValue::decode(AttributeType::Integer, "abc").is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("component.midterm").is_ok());
        assert!(validate_name("projector").is_ok());
        assert!(validate_name("Projector").is_err());
        assert!(validate_name("1st").is_err());
        assert!(validate_name(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_offered_course_components() {
        let v = AttributeSchema::check(
            EntityType::OfferedCourse,
            "component.final",
            AttributeValue::Integer(60),
        )
        .unwrap();
        assert_eq!(v, AttributeValue::Decimal(60.0));

        assert!(
            AttributeSchema::check(
                EntityType::OfferedCourse,
                "component.final",
                AttributeValue::Decimal(0.0)
            )
            .is_err()
        );
        assert!(
            AttributeSchema::check(
                EntityType::OfferedCourse,
                "color",
                AttributeValue::Text("red".into())
            )
            .is_err()
        );
    }

    #[test]
    fn test_enrollment_rules() {
        assert!(
            AttributeSchema::check(
                EntityType::Enrollment,
                "score.midterm",
                AttributeValue::Decimal(100.0)
            )
            .is_ok()
        );
        assert!(
            AttributeSchema::check(
                EntityType::Enrollment,
                "score.midterm",
                AttributeValue::Decimal(100.5)
            )
            .is_err()
        );
        assert!(
            AttributeSchema::check(
                EntityType::Enrollment,
                "drop_reason",
                AttributeValue::Text("schedule clash".into())
            )
            .is_ok()
        );
        assert!(
            AttributeSchema::check(
                EntityType::Enrollment,
                "drop_reason",
                AttributeValue::Integer(1)
            )
            .is_err()
        );
    }

    #[test]
    fn test_announcement_scope_rules() {
        assert!(
            AttributeSchema::check(
                EntityType::Announcement,
                "scope.role",
                AttributeValue::Text("student".into())
            )
            .is_ok()
        );
        assert!(
            AttributeSchema::check(
                EntityType::Announcement,
                "scope.role",
                AttributeValue::Text("dean".into())
            )
            .is_err()
        );
        assert!(
            AttributeSchema::check(
                EntityType::Announcement,
                "scope.offered_course_id",
                AttributeValue::Integer(0)
            )
            .is_err()
        );
    }

    #[test]
    fn test_record_round_trip_through_cache_form() {
        let attr = Attribute {
            entity_type: EntityType::Room,
            entity_id: 1,
            name: "opened_on".into(),
            value: AttributeValue::Date(chrono::NaiveDate::from_ymd_opt(2020, 5, 1).unwrap()),
            updated_at: chrono::Utc::now(),
        };
        let record = AttributeRecord::from(&attr);
        assert_eq!(record.value, json!("2020-05-01"));
        assert_eq!(record.typed_value().unwrap(), attr.value);
    }
}
