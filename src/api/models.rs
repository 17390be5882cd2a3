use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepts strings, numbers and booleans; `null` and empty strings become `None`.
fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return Ok(None),
    };
    Ok(if text.is_empty() { None } else { Some(text) })
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChatSummary {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
}

/// A row returned by the chat search, which matches individual messages.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChatHit {
    #[serde(default, deserialize_with = "lenient")]
    pub sender: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
}

impl ChatHit {
    pub fn contact(&self) -> Option<&str> {
        self.sender.as_deref().or(self.name.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SmsSummary {
    #[serde(default, deserialize_with = "lenient")]
    pub from_to: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CallRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub from_to: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub call_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct KeylogEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub application: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

// The contacts table has been seen with both `email_id` and `email`;
// `email_id` wins when both are present.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_contacted_dt: Option<String>,
}

impl Contact {
    pub fn email(&self) -> Option<&str> {
        self.email_id.as_deref().or(self.email.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct InstalledApp {
    #[serde(default, deserialize_with = "lenient")]
    pub application_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub package_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub installed_date: Option<String>,
}

/// One message of a chat or SMS thread.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Message {
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub formatted_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sender: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sms_type: Option<String>,
}

impl Message {
    pub fn timestamp(&self) -> Option<&str> {
        self.time.as_deref().or(self.formatted_time.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_null_fields_decode_as_absent() {
        let chat: ChatSummary = serde_json::from_value(json!({"name": null, "time": ""})).unwrap();
        assert!(chat.name.is_none());
        assert!(chat.last_message.is_none());
        assert!(chat.time.is_none());
    }

    #[test]
    fn numeric_fields_keep_their_json_text() {
        let call: CallRecord =
            serde_json::from_value(json!({"from_to": 5551234, "duration": 42})).unwrap();
        assert_eq!(call.from_to.as_deref(), Some("5551234"));
        assert_eq!(call.duration.as_deref(), Some("42"));
    }

    #[test]
    fn contact_prefers_email_id_over_email() {
        let both: Contact =
            serde_json::from_value(json!({"email_id": "a@x.io", "email": "b@x.io"})).unwrap();
        assert_eq!(both.email(), Some("a@x.io"));
        let legacy: Contact = serde_json::from_value(json!({"email": "b@x.io"})).unwrap();
        assert_eq!(legacy.email(), Some("b@x.io"));
    }

    #[test]
    fn message_falls_back_to_formatted_time() {
        let msg: Message =
            serde_json::from_value(json!({"text": "hi", "formatted_time": "2024-01-01 09:30:00"}))
                .unwrap();
        assert_eq!(msg.timestamp(), Some("2024-01-01 09:30:00"));
    }

    #[test]
    fn chat_hit_uses_sender_then_name() {
        let hit: ChatHit = serde_json::from_value(json!({"name": "Ann", "text": "yo"})).unwrap();
        assert_eq!(hit.contact(), Some("Ann"));
        let hit: ChatHit =
            serde_json::from_value(json!({"sender": "Bob", "name": "Ann"})).unwrap();
        assert_eq!(hit.contact(), Some("Bob"));
    }
}
