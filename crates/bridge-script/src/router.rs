//! Name -> handler router (§4.4). Every handler is a pure function of a
//! decoded payload returning a serialisable result; the router itself
//! carries no chunking awareness, since that happens a layer below at the
//! frame codec.

use std::collections::HashMap;

use note_ipc::Staging;
use serde_json::Value;

use crate::error::BridgeScriptError;
use crate::handlers;
use crate::host_api::HostApi;

pub type HandlerFn =
    fn(&mut dyn HostApi, &Staging, Value) -> Result<Value, BridgeScriptError>;

pub struct Router {
    handlers: HashMap<&'static str, HandlerFn>,
}

impl Router {
    /// Build a router with the standard action set wired in (§4.6 discover,
    /// §4.6 set/get, §4.5 add_notes/clear/read_state).
    pub fn with_defaults() -> Self {
        let mut router = Self { handlers: HashMap::new() };
        router.register("discover", handlers::discover::handle);
        router.register("set_param", handlers::set_param::handle);
        router.register("get_param", handlers::get_param::handle);
        router.register("add_notes", handlers::add_notes::handle);
        router.register("clear", handlers::clear::handle);
        router.register("read_state", handlers::read_state::handle);
        router
    }

    pub fn register(&mut self, action: &'static str, handler: HandlerFn) {
        self.handlers.insert(action, handler);
    }

    pub fn dispatch(
        &self,
        action: &str,
        host: &mut dyn HostApi,
        staging: &Staging,
        params: Value,
    ) -> Result<Value, BridgeScriptError> {
        let handler = self
            .handlers
            .get(action)
            .ok_or_else(|| BridgeScriptError::RouterUnknownAction(action.to_string()))?;
        handler(host, staging, params)
    }
}
