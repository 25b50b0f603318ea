use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};

use crate::{ChannelError, JsonMethodCodec, MethodCall, MethodCallHandler, MethodCodec, MethodResponse};

/// Error code sent back when an incoming message is not a method call.
pub const MALFORMED_CALL: &str = "malformed_call";

/// Routes encoded messages to the handler registered for their channel.
pub struct ChannelRegistry<C = JsonMethodCodec> {
    codec: C,
    handlers: RwLock<HashMap<String, Arc<dyn MethodCallHandler>>>,
}

impl<C: fmt::Debug> fmt::Debug for ChannelRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let mut channels: Vec<_> = handlers.keys().collect();
        channels.sort();
        f.debug_struct("ChannelRegistry")
            .field("codec", &self.codec)
            .field("channels", &channels)
            .finish()
    }
}

impl Default for ChannelRegistry<JsonMethodCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelRegistry<JsonMethodCodec> {
    /// Create an empty registry using the JSON method codec.
    pub fn new() -> Self {
        Self::with_codec(JsonMethodCodec)
    }
}

impl<C: MethodCodec> ChannelRegistry<C> {
    /// Create an empty registry using `codec`.
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// The codec messages are encoded with.
    pub const fn codec(&self) -> &C {
        &self.codec
    }

    /// Install `handler` for `channel`, replacing any previous handler.
    pub fn register(&self, channel: impl Into<String>, handler: Arc<dyn MethodCallHandler>) {
        let channel = channel.into();
        debug!("registering handler for channel {channel}");
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(channel, handler);
    }

    /// Remove the handler for `channel`. Returns whether one was installed.
    pub fn unregister(&self, channel: &str) -> bool {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(channel)
            .is_some()
    }

    /// Whether a handler is installed for `channel`.
    pub fn is_registered(&self, channel: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(channel)
    }

    fn handler(&self, channel: &str) -> Option<Arc<dyn MethodCallHandler>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(channel)
            .cloned()
    }

    /// Encode an error reply, for failures that happen before a call reaches
    /// a handler.
    pub fn error_reply(&self, code: &str, message: impl Into<String>) -> Vec<u8> {
        self.codec
            .encode_response(&MethodResponse::error(code, message))
    }

    /// Deliver an encoded call and return the encoded reply.
    ///
    /// A channel without a handler answers with the empty "not implemented"
    /// reply. A message that is not a method call answers with an error
    /// envelope coded [`MALFORMED_CALL`].
    pub fn dispatch(&self, channel: &str, message: &[u8]) -> Vec<u8> {
        let Some(handler) = self.handler(channel) else {
            debug!("no handler for channel {channel}");
            return self.codec.encode_response(&MethodResponse::NotImplemented);
        };

        let response = match self.codec.decode_method_call(message) {
            Ok(call) => handler.on_method_call(&call),
            Err(err) => {
                warn!("undecodable message on channel {channel}: {err}");
                return self.error_reply(MALFORMED_CALL, err.to_string());
            }
        };

        self.codec.encode_response(&response)
    }

    /// Send `call` over `channel` as the UI layer would and decode the reply.
    ///
    /// # Errors
    /// Fails if the reply cannot be decoded.
    pub fn invoke(&self, channel: &str, call: &MethodCall) -> Result<MethodResponse, ChannelError> {
        let message = self.codec.encode_method_call(call);
        let reply = self.dispatch(channel, &message);
        self.codec.decode_response(&reply)
    }
}
