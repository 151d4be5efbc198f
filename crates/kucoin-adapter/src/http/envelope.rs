/*
[INPUT]:  Raw response status and body bytes
[OUTPUT]: Typed payloads, business errors, or decode errors
[POS]:    HTTP layer - generic {code, msg, data} envelope handling
[UPDATE]: When the envelope shape, success codes or message policy change
*/

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::http::{KucoinError, Result};

/// Codes meaning success; "200" is used by older endpoints
pub const SUCCESS_CODES: [&str; 2] = ["200000", "200"];

/// Longest body excerpt kept in a decode error
const BODY_SNIPPET_BYTES: usize = 512;

/// The wrapper every response uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    #[serde(deserialize_with = "deserialize_code")]
    pub code: String,
    #[serde(default, deserialize_with = "deserialize_msg")]
    pub msg: String,
    pub data: Option<T>,
}

/// How a non-empty `msg` on a success code is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagePolicy {
    /// Any message on a success code is a business error
    #[default]
    Strict,
    /// Only `code` decides
    Lenient,
}

/// Classification of an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    BusinessError { code: String, message: String },
}

/// The single success/error rule shared by every operation
pub fn classify(code: &str, msg: &str, policy: MessagePolicy) -> Outcome {
    let success_code = SUCCESS_CODES.contains(&code);
    let message_ok = match policy {
        MessagePolicy::Strict => msg.is_empty(),
        MessagePolicy::Lenient => true,
    };

    if success_code && message_ok {
        Outcome::Success
    } else {
        Outcome::BusinessError {
            code: code.to_string(),
            message: msg.to_string(),
        }
    }
}

/// Parse, classify and extract `data` as `T`.
///
/// Business errors are reported even when the HTTP status is not 2xx, since
/// the venue answers rejected requests with 4xx and a regular envelope.
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8], policy: MessagePolicy) -> Result<T> {
    // Classify before touching `data`: rejections often carry no payload
    let envelope: ResponseEnvelope<IgnoredAny> =
        serde_json::from_slice(body).map_err(|err| decode_error(status, err, body))?;

    if let Outcome::BusinessError { code, message } =
        classify(&envelope.code, &envelope.msg, policy)
    {
        return Err(KucoinError::Api { code, message });
    }

    let envelope: ResponseEnvelope<T> =
        serde_json::from_slice(body).map_err(|err| decode_error(status, err, body))?;
    match envelope.data {
        Some(data) => Ok(data),
        None => serde_json::from_value(Value::Null).map_err(|err| decode_error(status, err, body)),
    }
}

fn decode_error(status: u16, err: serde_json::Error, body: &[u8]) -> KucoinError {
    KucoinError::Decode {
        status,
        message: err.to_string(),
        body: body_snippet(body),
    }
}

fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= BODY_SNIPPET_BYTES {
        return text.into_owned();
    }
    let mut end = BODY_SNIPPET_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

fn deserialize_code<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(code) => code,
        Code::Number(code) => code.to_string(),
    })
}

fn deserialize_msg<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct OrderId {
        order_id: String,
    }

    #[test]
    fn test_success_envelope() {
        let body = br#"{"code":"200000","msg":"","data":{"orderId":"X"}}"#;
        let data: OrderId = decode(200, body, MessagePolicy::Strict).unwrap();
        assert_eq!(
            data,
            OrderId {
                order_id: "X".to_string()
            }
        );
    }

    #[test]
    fn test_legacy_success_code_and_missing_msg() {
        let body = br#"{"code":"200","data":{"orderId":"Y"}}"#;
        let data: OrderId = decode(200, body, MessagePolicy::Strict).unwrap();
        assert_eq!(data.order_id, "Y");
    }

    #[test]
    fn test_numeric_code_and_null_msg() {
        let body = br#"{"code":200000,"msg":null,"data":[1,2]}"#;
        let data: Vec<u32> = decode(200, body, MessagePolicy::Strict).unwrap();
        assert_eq!(data, vec![1, 2]);
    }

    #[test]
    fn test_business_error_is_carried_verbatim() {
        let body = br#"{"code":"400100","msg":"Invalid Order Price."}"#;
        let err = decode::<OrderId>(400, body, MessagePolicy::Strict).unwrap_err();
        match err {
            KucoinError::Api { code, message } => {
                assert_eq!(code, "400100");
                assert_eq!(message, "Invalid Order Price.");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_message_on_success_code_follows_policy() {
        let body = br#"{"code":"200000","msg":"partially applied","data":{"orderId":"Z"}}"#;

        let strict = decode::<OrderId>(200, body, MessagePolicy::Strict).unwrap_err();
        assert_eq!(strict.api_code(), Some("200000"));

        let lenient: OrderId = decode(200, body, MessagePolicy::Lenient).unwrap();
        assert_eq!(lenient.order_id, "Z");
    }

    #[test]
    fn test_missing_data_decodes_as_null() {
        let body = br#"{"code":"200000","msg":""}"#;
        let data: Option<OrderId> = decode(200, body, MessagePolicy::Strict).unwrap();
        assert!(data.is_none());

        let err = decode::<OrderId>(200, body, MessagePolicy::Strict).unwrap_err();
        assert!(matches!(err, KucoinError::Decode { .. }));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("200000", "", MessagePolicy::Strict), Outcome::Success);
        assert_eq!(classify("200", "", MessagePolicy::Strict), Outcome::Success);
        assert_eq!(
            classify("400001", "", MessagePolicy::Lenient),
            Outcome::BusinessError {
                code: "400001".to_string(),
                message: String::new(),
            }
        );
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::html(b"<html>502 Bad Gateway</html>".as_slice())]
    #[case::truncated(br#"{"code":"200000","data":{"#.as_slice())]
    #[case::missing_code(br#"{"msg":"","data":{}}"#.as_slice())]
    #[case::wrong_code_type(br#"{"code":true,"data":{}}"#.as_slice())]
    #[case::array(b"[1,2,3]".as_slice())]
    #[case::invalid_utf8(b"\xff\xfe\xfd".as_slice())]
    fn test_decode_is_total(#[case] body: &[u8]) {
        let err = decode::<Value>(502, body, MessagePolicy::Strict).unwrap_err();
        match err {
            KucoinError::Decode { status, .. } => assert_eq!(status, 502),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_body_snippet_is_truncated_on_char_boundary() {
        let body = "é".repeat(BODY_SNIPPET_BYTES);
        let snippet = body_snippet(body.as_bytes());
        assert!(snippet.ends_with("..."));
        assert!(snippet.len() <= BODY_SNIPPET_BYTES + 3);
    }
}
