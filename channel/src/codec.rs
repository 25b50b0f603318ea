//! Wire encoding of method calls and their replies.

use serde_json::{Value, json};

use crate::{ChannelError, MethodCall, MethodResponse};

/// Encodes calls and replies exchanged over a channel.
pub trait MethodCodec: Send + Sync {
    /// Encode a call as sent by the UI layer.
    fn encode_method_call(&self, call: &MethodCall) -> Vec<u8>;

    /// Decode a call received from the UI layer.
    ///
    /// # Errors
    /// Fails if the bytes do not describe a method call.
    fn decode_method_call(&self, bytes: &[u8]) -> Result<MethodCall, ChannelError>;

    /// Encode a reply. `NotImplemented` encodes to an empty message.
    fn encode_response(&self, response: &MethodResponse) -> Vec<u8>;

    /// Decode a reply. An empty message decodes to `NotImplemented`.
    ///
    /// # Errors
    /// Fails if a non-empty message is not a result envelope.
    fn decode_response(&self, bytes: &[u8]) -> Result<MethodResponse, ChannelError>;
}

/// JSON codec compatible with the Flutter `JSONMethodCodec`.
///
/// Calls are `{"method": name, "args": value}`. Successful replies are
/// `[result]`, error replies are `[code, message, details]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMethodCodec;

impl MethodCodec for JsonMethodCodec {
    fn encode_method_call(&self, call: &MethodCall) -> Vec<u8> {
        let value = json!({
            "method": call.method,
            "args": call.arguments,
        });
        value.to_string().into_bytes()
    }

    fn decode_method_call(&self, bytes: &[u8]) -> Result<MethodCall, ChannelError> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Object(mut map) = value else {
            return Err(ChannelError::MalformedCall("expected a JSON object".into()));
        };

        let method = match map.remove("method") {
            Some(Value::String(method)) => method,
            Some(_) => return Err(ChannelError::MalformedCall("method is not a string".into())),
            None => return Err(ChannelError::MalformedCall("missing method".into())),
        };

        Ok(MethodCall {
            method,
            arguments: map.remove("args").unwrap_or(Value::Null),
        })
    }

    fn encode_response(&self, response: &MethodResponse) -> Vec<u8> {
        let envelope = match response {
            MethodResponse::Success(result) => json!([result]),
            MethodResponse::Error {
                code,
                message,
                details,
            } => json!([code, message, details]),
            MethodResponse::NotImplemented => return Vec::new(),
        };
        envelope.to_string().into_bytes()
    }

    fn decode_response(&self, bytes: &[u8]) -> Result<MethodResponse, ChannelError> {
        if bytes.is_empty() {
            return Ok(MethodResponse::NotImplemented);
        }

        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Array(mut items) = value else {
            return Err(ChannelError::MalformedEnvelope("expected a JSON array".into()));
        };

        match items.len() {
            1 => Ok(MethodResponse::Success(items.remove(0))),
            3 => {
                let details = items.remove(2);
                let message = match items.remove(1) {
                    Value::String(message) => Some(message),
                    Value::Null => None,
                    _ => {
                        return Err(ChannelError::MalformedEnvelope(
                            "error message is not a string".into(),
                        ));
                    }
                };
                let Value::String(code) = items.remove(0) else {
                    return Err(ChannelError::MalformedEnvelope(
                        "error code is not a string".into(),
                    ));
                };
                Ok(MethodResponse::Error {
                    code,
                    message,
                    details,
                })
            }
            n => Err(ChannelError::MalformedEnvelope(format!(
                "unexpected envelope length {n}"
            ))),
        }
    }
}
