use crate::engine::assets::scene_manifest::BakeVariant;
use crate::engine::core::app_state::AppState;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::engine::systems::scene_controls::{ControlSource, SceneControl, SceneControlEvent};
use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request, or a notification when `id` is absent.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    pub id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

/// One-way message pushed to the page.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

impl RpcError {
    fn new(code: i32, message: &str, data: Option<Value>) -> Self {
        Self {
            code,
            message: message.to_string(),
            data,
        }
    }

    pub fn parse_error(detail: &str) -> Self {
        Self::new(-32700, "Parse error", Some(Value::String(detail.to_string())))
    }

    pub fn invalid_request(detail: &str) -> Self {
        Self::new(-32600, "Invalid request", Some(Value::String(detail.to_string())))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            -32601,
            "Method not found",
            Some(serde_json::json!({ "method": method })),
        )
    }

    pub fn invalid_params(message: &str) -> Self {
        Self::new(-32602, message, None)
    }
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }
    }
}

/// Outgoing traffic for the page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications waiting for the next flush, oldest first.
    pub fn queued_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    /// Serialise everything queued, notifications ahead of responses.
    fn drain_serialised(&mut self) -> Vec<String> {
        let notifications = self.outgoing_notifications.drain(..).map(|n| serde_json::to_string(&n));
        let responses = self.outgoing_responses.drain(..).map(|r| serde_json::to_string(&r));
        notifications
            .chain(responses)
            .filter_map(|encoded| match encoded {
                Ok(json) => Some(json),
                Err(err) => {
                    error!("Failed to serialise RPC message: {}", err);
                    None
                }
            })
            .collect()
    }
}

/// Read-only engine state available to request handlers.
pub struct RpcContext<'a> {
    pub fps: f32,
    pub state: AppState,
    pub progress: &'a LoadingProgress,
}

/// Raw strings received from the page, shared with the browser's message callback.
#[derive(Resource, Clone, Default)]
struct PageInbox(Arc<Mutex<VecDeque<String>>>);

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

/// JSON-RPC bridge between the engine and the page hosting its canvas.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<PageInbox>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (drain_page_inbox, handle_rpc_messages, flush_outgoing).chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, install_page_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn install_page_listener(inbox: Res<PageInbox>) {
    if let Err(err) = listen_for_page_messages(inbox.clone()) {
        error!("RPC disabled, could not listen for page messages: {:?}", err);
    }
}

#[cfg(target_arch = "wasm32")]
fn listen_for_page_messages(inbox: PageInbox) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let on_message = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(
        move |event: web_sys::MessageEvent| {
            let Some(text) = event.data().as_string() else {
                return;
            };
            // Other scripts share the channel; only JSON-RPC traffic is ours.
            if !text.contains("jsonrpc") {
                return;
            }
            if let Ok(mut queue) = inbox.0.lock() {
                queue.push_back(text);
            }
        },
    );

    window.add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())?;
    // The listener lives as long as the page.
    on_message.forget();
    Ok(())
}

fn drain_page_inbox(inbox: Res<PageInbox>, mut incoming: EventWriter<IncomingRpcMessage>) {
    let pending: Vec<String> = match inbox.0.lock() {
        Ok(mut queue) => queue.drain(..).collect(),
        Err(_) => return,
    };
    for content in pending {
        incoming.write(IncomingRpcMessage { content });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    state: Res<State<AppState>>,
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut control_events: EventWriter<SceneControlEvent>,
) {
    let context = RpcContext {
        fps: smoothed_fps(&diagnostics).unwrap_or(0.0),
        state: *state.get(),
        progress: &loading_progress,
    };

    for event in events.read() {
        let request = match parse_rpc_message(&event.content) {
            Ok(request) => request,
            Err(response) => {
                warn!("Rejecting malformed RPC message: {}", event.content);
                rpc_interface.queue_response(response);
                continue;
            }
        };

        debug!("Processing RPC method: {}", request.method);
        let mut controls = Vec::new();
        if let Some(response) = handle_rpc_request(&request, &context, &mut controls) {
            rpc_interface.queue_response(response);
        }
        control_events.write_batch(controls.into_iter().map(|control| SceneControlEvent {
            control,
            source: ControlSource::Rpc,
        }));
    }
}

/// Decode one message from the page. Invalid JSON and objects that are not
/// requests produce the error response the page should receive instead.
pub fn parse_rpc_message(content: &str) -> Result<RpcRequest, RpcResponse> {
    let value: Value = serde_json::from_str(content)
        .map_err(|err| RpcResponse::failure(Value::Null, RpcError::parse_error(&err.to_string())))?;

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: RpcRequest = serde_json::from_value(value)
        .map_err(|err| RpcResponse::failure(id.clone(), RpcError::invalid_request(&err.to_string())))?;

    if request.jsonrpc != JSONRPC_VERSION {
        return Err(RpcResponse::failure(
            id,
            RpcError::invalid_request("jsonrpc must be \"2.0\""),
        ));
    }
    Ok(request)
}

/// Route a request to its handler, collecting any scene changes it asks for.
///
/// Requests without an ID are notifications: their controls still apply but
/// no response is produced.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    controls: &mut Vec<SceneControl>,
) -> Option<RpcResponse> {
    let outcome = match request.method.as_str() {
        "get_fps" => Ok(serde_json::json!({ "fps": context.fps })),
        "get_loading_progress" => Ok(context.progress.to_json(context.state.as_str())),
        "set_bake_variant" => handle_set_bake_variant(&request.params, controls),
        "set_animation_paused" => handle_set_animation_paused(&request.params, controls),
        other => {
            warn!("Unknown RPC method: {}", other);
            Err(RpcError::method_not_found(other))
        }
    };

    let id = request.id.clone()?;
    Some(match outcome {
        Ok(result) => RpcResponse::success(id, result),
        Err(error) => RpcResponse::failure(id, error),
    })
}

fn handle_set_bake_variant(
    params: &Value,
    controls: &mut Vec<SceneControl>,
) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct BakeVariantParams {
        variant: String,
    }

    let parsed = BakeVariantParams::deserialize(params)
        .map_err(|_| RpcError::invalid_params("Expected 'variant' parameter"))?;

    let variant = BakeVariant::from_string(&parsed.variant).ok_or_else(|| {
        RpcError::invalid_params(&format!("Unknown bake variant: {}", parsed.variant))
    })?;

    controls.push(SceneControl::SetBakeVariant(variant));
    Ok(serde_json::json!({ "variant": variant.as_str() }))
}

fn handle_set_animation_paused(
    params: &Value,
    controls: &mut Vec<SceneControl>,
) -> Result<Value, RpcError> {
    #[derive(Deserialize)]
    struct PausedParams {
        paused: bool,
    }

    let parsed = PausedParams::deserialize(params)
        .map_err(|_| RpcError::invalid_params("Expected boolean 'paused' parameter"))?;

    controls.push(SceneControl::SetAnimationPaused(parsed.paused));
    Ok(serde_json::json!({ "paused": parsed.paused }))
}

fn flush_outgoing(mut rpc_interface: ResMut<WebRpcInterface>) {
    for message in rpc_interface.drain_serialised() {
        post_to_parent(&message);
    }
}

#[cfg(target_arch = "wasm32")]
fn post_to_parent(message: &str) {
    let Some(parent) = web_sys::window().and_then(|window| window.parent().ok().flatten()) else {
        warn!("No parent window to receive RPC message");
        return;
    };
    if let Err(err) = parent.post_message(&JsValue::from_str(message), "*") {
        error!("Failed to post RPC message to parent: {:?}", err);
    }
}

// Native builds have no page to talk to.
#[cfg(not(target_arch = "wasm32"))]
fn post_to_parent(_message: &str) {}
