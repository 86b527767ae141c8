use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 配置值类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "system.ts")]
pub enum SettingValueType {
    String,
    Integer,
    Boolean,
    JsonArray,
}

impl<'de> Deserialize<'de> for SettingValueType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for SettingValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValueType::String => write!(f, "string"),
            SettingValueType::Integer => write!(f, "integer"),
            SettingValueType::Boolean => write!(f, "boolean"),
            SettingValueType::JsonArray => write!(f, "json_array"),
        }
    }
}

impl std::str::FromStr for SettingValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(SettingValueType::String),
            "integer" => Ok(SettingValueType::Integer),
            "boolean" => Ok(SettingValueType::Boolean),
            "json_array" => Ok(SettingValueType::JsonArray),
            _ => Err(format!(
                "Invalid setting value type: '{s}'. Supported: string, integer, boolean, json_array"
            )),
        }
    }
}

impl SettingValueType {
    /// 检查文本值是否符合声明类型
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            SettingValueType::String => Ok(()),
            SettingValueType::Integer => value
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| format!("'{value}' is not an integer")),
            SettingValueType::Boolean => value
                .parse::<bool>()
                .map(|_| ())
                .map_err(|_| format!("'{value}' is not a boolean")),
            SettingValueType::JsonArray => serde_json::from_str::<Vec<serde_json::Value>>(value)
                .map(|_| ())
                .map_err(|_| format!("'{value}' is not a JSON array")),
        }
    }
}

/// 已知配置键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownSettingKey {
    EnrollmentOpen,
    EnrollmentMaxCredits,
    ReservationMaxHours,
    UploadMaxSize,
    UploadAllowedTypes,
}

impl KnownSettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownSettingKey::EnrollmentOpen => "enrollment.open",
            KnownSettingKey::EnrollmentMaxCredits => "enrollment.max_credits",
            KnownSettingKey::ReservationMaxHours => "reservation.max_hours",
            KnownSettingKey::UploadMaxSize => "upload.max_size",
            KnownSettingKey::UploadAllowedTypes => "upload.allowed_types",
        }
    }

    pub fn value_type(&self) -> SettingValueType {
        match self {
            KnownSettingKey::EnrollmentOpen => SettingValueType::Boolean,
            KnownSettingKey::EnrollmentMaxCredits => SettingValueType::Integer,
            KnownSettingKey::ReservationMaxHours => SettingValueType::Integer,
            KnownSettingKey::UploadMaxSize => SettingValueType::Integer,
            KnownSettingKey::UploadAllowedTypes => SettingValueType::JsonArray,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            KnownSettingKey::EnrollmentOpen,
            KnownSettingKey::EnrollmentMaxCredits,
            KnownSettingKey::ReservationMaxHours,
            KnownSettingKey::UploadMaxSize,
            KnownSettingKey::UploadAllowedTypes,
        ]
    }

    /// 整数型配置的取值范围（闭区间）
    pub fn integer_bounds(&self) -> Option<(i64, i64)> {
        match self {
            KnownSettingKey::EnrollmentMaxCredits => Some((1, 60)),
            // 一年
            KnownSettingKey::ReservationMaxHours => Some((1, 8760)),
            // 1 GiB
            KnownSettingKey::UploadMaxSize => Some((1, 1 << 30)),
            KnownSettingKey::EnrollmentOpen | KnownSettingKey::UploadAllowedTypes => None,
        }
    }

    pub fn validate(&self, value: &str) -> Result<(), String> {
        self.value_type().check(value)?;
        if let Some((min, max)) = self.integer_bounds() {
            let parsed = value.parse::<i64>().map_err(|e| e.to_string())?;
            if !(min..=max).contains(&parsed) {
                return Err(format!(
                    "'{}' must be between {min} and {max}, got {parsed}",
                    self.as_str()
                ));
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for KnownSettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownSettingKey::all()
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown setting key: {s}"))
    }
}

/// 系统设置实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub value_type: SettingValueType,
    pub description: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_parse() {
        for key in KnownSettingKey::all() {
            assert_eq!(key.as_str().parse::<KnownSettingKey>().unwrap(), key);
        }
        assert!("jwt.access_token_expiry".parse::<KnownSettingKey>().is_err());
    }

    #[test]
    fn test_value_type_checks() {
        assert!(KnownSettingKey::EnrollmentOpen.validate("false").is_ok());
        assert!(KnownSettingKey::EnrollmentOpen.validate("yes").is_err());
        assert!(KnownSettingKey::EnrollmentMaxCredits.validate("18").is_ok());
        assert!(KnownSettingKey::EnrollmentMaxCredits.validate("0").is_err());
        assert!(KnownSettingKey::UploadAllowedTypes.validate(r#"["pdf"]"#).is_ok());
        assert!(KnownSettingKey::UploadAllowedTypes.validate("pdf").is_err());
    }

    #[test]
    fn test_integer_settings_are_bounded() {
        assert!(KnownSettingKey::ReservationMaxHours.validate("8760").is_ok());
        assert!(KnownSettingKey::ReservationMaxHours.validate("8761").is_err());
        assert!(
            KnownSettingKey::ReservationMaxHours
                .validate("9223372036854775807")
                .is_err()
        );
        assert!(KnownSettingKey::EnrollmentMaxCredits.validate("61").is_err());
        assert!(KnownSettingKey::UploadMaxSize.validate("-1").is_err());
    }
}
