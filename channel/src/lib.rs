//! Named method channels for platform bridges.
//!
//! A channel carries a method call from the UI layer to a native handler and
//! carries a single reply back. Calls and replies travel as bytes encoded
//! with a [`MethodCodec`]; [`ChannelRegistry`] routes them by channel name.

#![warn(missing_docs)]

mod codec;
mod error;
mod registry;

pub use codec::{JsonMethodCodec, MethodCodec};
pub use error::ChannelError;
pub use registry::{ChannelRegistry, MALFORMED_CALL};

use serde_json::Value;

/// A method invocation received over a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// Name of the invoked method.
    pub method: String,
    /// Arguments supplied by the caller, `Value::Null` when absent.
    pub arguments: Value,
}

impl MethodCall {
    /// Create a call without arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }

    /// Attach arguments to the call.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Value) -> Self {
        self.arguments = arguments;
        self
    }
}

/// The reply to a [`MethodCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// The method ran and produced a result.
    Success(Value),
    /// The method ran and reported an error.
    Error {
        /// Machine-readable error code.
        code: String,
        /// Human-readable message.
        message: Option<String>,
        /// Extra error payload.
        details: Value,
    },
    /// No handler knows the method.
    NotImplemented,
}

impl MethodResponse {
    /// Build an error response without details.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: Some(message.into()),
            details: Value::Null,
        }
    }

    /// Returns the boolean result of a successful call, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Success(value) => value.as_bool(),
            _ => None,
        }
    }

    /// Whether this is the "not implemented" reply.
    pub const fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented)
    }
}

impl From<bool> for MethodResponse {
    fn from(value: bool) -> Self {
        Self::Success(Value::Bool(value))
    }
}

/// Handles method calls arriving on a channel.
///
/// Handlers are invoked synchronously on the thread that delivered the message.
pub trait MethodCallHandler: Send + Sync {
    /// Answer a single call.
    fn on_method_call(&self, call: &MethodCall) -> MethodResponse;
}

impl<F> MethodCallHandler for F
where
    F: Fn(&MethodCall) -> MethodResponse + Send + Sync,
{
    fn on_method_call(&self, call: &MethodCall) -> MethodResponse {
        self(call)
    }
}
