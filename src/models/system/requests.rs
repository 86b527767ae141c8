use serde::Deserialize;
use ts_rs::TS;

/// 更新配置请求
///
/// `value` 可以是 JSON 字符串，也可以是布尔、数字或数组，统一转成文本存储。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct UpdateSettingRequest {
    #[ts(type = "unknown")]
    pub value: serde_json::Value,
}

impl UpdateSettingRequest {
    pub fn value_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
