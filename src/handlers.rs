use serde_json::{json, Value};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::chat_history::{ConversationTurn, SessionLog};
use crate::error::ChatError;
use crate::ollama::generate;
use crate::state::{AppState, ChatSession};
use crate::utils::format_response;

/// Outbound half of a session: each string is one JSON frame.
pub type WebSocketSend = mpsc::UnboundedSender<String>;

const GENERATION_HINT: &str = "Make sure Ollama is running and the selected model is available.";

const UNAVAILABLE_INSTRUCTIONS: [&str; 4] = [
    "Install Ollama from https://ollama.com/download",
    "Start the service in a new terminal: `ollama serve`",
    "Pull a model: `ollama pull llama3.2` (or any other model)",
    "Reload this page once Ollama is running",
];

fn send(sender: &WebSocketSend, msg: Value) {
    // The receiving task only goes away when the socket closes.
    let _ = sender.send(msg.to_string());
}

/// Greeting sent when a session opens: connection status, then either the
/// setup instructions or the model list and sample prompts.
pub async fn on_connect(state: &AppState, session: &mut ChatSession, sender: &WebSocketSend) {
    let available = state.backend.is_available().await;
    send(
        sender,
        json!({
            "type": "connection-status",
            "available": available,
            "client_uid": session.client_uid
        }),
    );

    if !available {
        send_unavailable(sender);
        return;
    }

    send_model_list(state, session, sender).await;
    send(
        sender,
        json!({
            "type": "sample-prompts",
            "prompts": state.config.sample_prompts
        }),
    );
}

pub async fn handle_message(
    state: &AppState,
    session: &mut ChatSession,
    text: &str,
    sender: &WebSocketSend,
) -> anyhow::Result<()> {
    let msg: Value = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            send(sender, json!({"type": "error", "message": format!("Invalid message: {}", e)}));
            return Err(e.into());
        }
    };
    let msg_type = msg.get("type").and_then(|v| v.as_str());

    match msg_type {
        Some("fetch-models") => {
            send_model_list(state, session, sender).await;
        }
        Some("text-input") => {
            handle_text_input(state, session, &msg, sender).await;
        }
        Some("clear-history") => {
            session.log.clear();
            info!("Cleared history for {}", session.client_uid);
            send_history(&session.log, sender);
        }
        Some("use-sample-prompt") => {
            handle_sample_prompt(state, &msg, sender);
        }
        Some("fetch-history") => {
            send_history(&session.log, sender);
        }
        _ => {
            warn!("Unknown message type: {:?}", msg_type);
            send(
                sender,
                json!({"type": "error", "message": format!("Unknown message type: {:?}", msg_type)}),
            );
        }
    }

    Ok(())
}

async fn handle_text_input(
    state: &AppState,
    session: &mut ChatSession,
    msg: &Value,
    sender: &WebSocketSend,
) {
    let prompt = msg.get("text").and_then(|v| v.as_str()).unwrap_or("");
    if prompt.trim().is_empty() {
        send(
            sender,
            json!({"type": "prompt-warning", "message": "Please enter a prompt to generate a response."}),
        );
        return;
    }

    if let Some(model) = msg
        .get("model")
        .and_then(|v| v.as_str())
        .filter(|m| !m.trim().is_empty())
    {
        session.selected_model = model.to_string();
    }
    let model = session.selected_model.clone();

    match run_generation(state, &mut session.log, prompt, &model, sender).await {
        Ok(()) => send_history(&session.log, sender),
        Err(ChatError::Unavailable) => send_unavailable(sender),
        Err(ChatError::Generation(e)) => {
            warn!("Generation failed for {}: {}", session.client_uid, e);
            send(
                sender,
                json!({
                    "type": "generation-error",
                    "message": e.to_string(),
                    "hint": GENERATION_HINT
                }),
            );
        }
    }
}

/// One submit: probe, generate, format, record. Nothing is appended unless
/// the whole round trip succeeds.
async fn run_generation(
    state: &AppState,
    log: &mut SessionLog,
    prompt: &str,
    model: &str,
    sender: &WebSocketSend,
) -> Result<(), ChatError> {
    if !state.backend.is_available().await {
        return Err(ChatError::Unavailable);
    }

    send(sender, json!({"type": "generation-started", "model": model}));

    let started = Instant::now();
    let raw = generate(state.backend.as_ref(), prompt, model).await?;
    let elapsed = started.elapsed().as_secs_f64();
    info!("Generated response with {} in {:.2}s", model, elapsed);

    let turn = ConversationTurn::new(prompt.to_string(), format_response(&raw), model.to_string());
    log.append(turn.clone());

    send(
        sender,
        json!({
            "type": "generation-result",
            "turn": turn,
            "elapsed_secs": elapsed,
            "generated_at": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
        }),
    );
    Ok(())
}

fn handle_sample_prompt(state: &AppState, msg: &Value, sender: &WebSocketSend) {
    let prompt = msg
        .get("index")
        .and_then(|v| v.as_u64())
        .and_then(|i| state.config.sample_prompts.get(i as usize));

    match prompt {
        Some(text) => send(sender, json!({"type": "prompt-prefill", "text": text})),
        None => send(
            sender,
            json!({"type": "error", "message": "No sample prompt at that index"}),
        ),
    }
}

async fn send_model_list(state: &AppState, session: &mut ChatSession, sender: &WebSocketSend) {
    let options = state.model_options().await;
    if !options.options.contains(&session.selected_model) {
        session.selected_model = options.default_model.clone();
    }
    send(
        sender,
        json!({
            "type": "model-list",
            "options": options.options,
            "default_model": options.default_model,
            "discovered": options.discovered,
            "selected_model": session.selected_model
        }),
    );
}

fn send_unavailable(sender: &WebSocketSend) {
    send(
        sender,
        json!({
            "type": "ollama-unavailable",
            "message": ChatError::Unavailable.to_string(),
            "instructions": UNAVAILABLE_INSTRUCTIONS
        }),
    );
}

fn send_history(log: &SessionLog, sender: &WebSocketSend) {
    let turns: Vec<Value> = log
        .recent_first()
        .map(|turn| {
            json!({
                "prompt": turn.prompt,
                "response": turn.response,
                "model": turn.model,
                "timestamp": turn.timestamp,
                "summary": turn.summary()
            })
        })
        .collect();
    send(sender, json!({"type": "history", "turns": turns}));
}
