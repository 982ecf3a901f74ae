use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::Response,
};
use axum::extract::ws::WebSocket;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use futures_util::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::handlers;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// One connection is one chat session. Frames are handled strictly in
/// order, so a session never has two generations in flight.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let mut session = state.open_session();
    info!("New WebSocket connection: {}", session.client_uid);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let forward = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame)).await {
                debug!("Dropping outbound frame: {}", e);
                break;
            }
        }
    });

    handlers::on_connect(&state, &mut session, &tx).await;

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Err(e) = handlers::handle_message(&state, &mut session, &text, &tx).await {
                    error!("Error handling message: {}", e);
                }
            }
            Ok(Message::Close(_)) => {
                info!("Client {} disconnected", session.client_uid);
                break;
            }
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    // Cleanup
    drop(tx);
    if let Err(e) = forward.await {
        debug!("Forward task ended abnormally: {}", e);
    }
    state.close_session(session);
}
