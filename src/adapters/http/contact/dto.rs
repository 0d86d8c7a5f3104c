//! Request/response DTOs for the contact form endpoint.

use serde::{Deserialize, Serialize};

use crate::application::{SendContactMessageCommand, SendContactMessageResult};

/// Contact form body. Absent and `null` fields both become empty and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendContactRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub visitor_name: Option<String>,
    #[serde(default)]
    pub visitor_email: Option<String>,
}

impl From<SendContactRequest> for SendContactMessageCommand {
    fn from(req: SendContactRequest) -> Self {
        Self {
            visitor_name: req.visitor_name.unwrap_or_default(),
            message: req.message.unwrap_or_default(),
            visitor_email: req.visitor_email,
        }
    }
}

/// `{ok: true, method, sid}`
#[derive(Debug, Clone, Serialize)]
pub struct SendContactResponse {
    pub ok: bool,
    pub method: &'static str,
    pub sid: String,
}

impl From<SendContactMessageResult> for SendContactResponse {
    fn from(result: SendContactMessageResult) -> Self {
        Self {
            ok: true,
            method: result.delivery.channel.method(),
            sid: result.delivery.provider_message_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::{Channel, DeliveryResult};

    #[test]
    fn request_reads_camel_case_and_defaults() {
        let req: SendContactRequest =
            serde_json::from_str(r#"{"visitorName":"Alice","message":"Hi"}"#).unwrap();
        assert_eq!(req.visitor_name.as_deref(), Some("Alice"));
        assert_eq!(req.visitor_email, None);

        let empty: SendContactRequest = serde_json::from_str("{}").unwrap();
        assert!(SendContactMessageCommand::from(empty).message.is_empty());
    }

    #[test]
    fn null_fields_become_empty_strings() {
        let req: SendContactRequest = serde_json::from_str(
            r#"{"visitorName":null,"message":"Hi","visitorEmail":null}"#,
        )
        .unwrap();
        let cmd = SendContactMessageCommand::from(req);
        assert_eq!(cmd.visitor_name, "");
        assert_eq!(cmd.message, "Hi");
        assert_eq!(cmd.visitor_email, None);
    }

    #[test]
    fn response_uses_wire_method_names() {
        let response = SendContactResponse::from(SendContactMessageResult {
            delivery: DeliveryResult::new(Channel::Secondary, "<m@x>"),
            conversation_id: None,
        });
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({ "ok": true, "method": "email", "sid": "<m@x>" })
        );
    }
}
