//! Hero carousel over a WebSocket.
//!
//! One task per socket owns the [`RotationController`], the [`AutoAdvance`]
//! timer and the page-request generations; everything that changes them
//! goes through its `select!` loop.
//!
//! Client → server (`{"action": ...}`):
//! `next`, `prev`, `jump {index}`, `pointer_enter`, `pointer_leave`,
//! `page {page, limit}`.
//!
//! Server → client (`{"type": ...}`): `state`, `page`, `error`.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{Sink, SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::select;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::application::catalog::DEFAULT_MOVIE_LIMIT;
use crate::application::{AutoAdvance, DashboardService};
use crate::domain::{Movie, RotationController, RotationError};
use crate::interfaces::http::common::PaginatedResponse;
use crate::interfaces::http::modules::dashboard::CarouselItemDto;
use crate::interfaces::http::modules::movies::MovieDto;
use crate::shared::{DomainResult, Generation, PageRequest, PageResult, RequestGenerations};

#[derive(Clone)]
pub struct HeroSocketState {
    pub dashboard: Arc<DashboardService>,
    pub interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HeroAction {
    Next,
    Prev,
    Jump { index: i64 },
    PointerEnter,
    PointerLeave,
    Page { page: Option<u32>, limit: Option<u32> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeroFrame {
    State {
        index: usize,
        count: usize,
        auto_advance: bool,
        item: Option<CarouselItemDto>,
    },
    Page {
        generation: u64,
        #[serde(flatten)]
        page: PaginatedResponse<MovieDto>,
    },
    Error {
        message: String,
    },
}

impl HeroFrame {
    fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// What the socket loop should do after an action.
#[derive(Debug)]
pub enum Outcome {
    Send(HeroFrame),
    Fetch(Generation, PageRequest),
}

type PageReply = (Generation, DomainResult<PageResult<Movie>>);

/// Per-socket carousel state, independent of the transport.
pub struct HeroSession {
    items: Vec<CarouselItemDto>,
    rotation: RotationController,
    autoplay: AutoAdvance,
    generations: RequestGenerations,
}

impl HeroSession {
    /// Auto-advance is armed only when there is something to rotate.
    pub fn new(items: Vec<CarouselItemDto>, interval: Duration) -> Self {
        let mut rotation = RotationController::new(items.len());
        let mut autoplay = AutoAdvance::new(interval);
        if items.is_empty() {
            rotation.set_auto_advance(false);
        } else {
            autoplay.start();
        }
        Self {
            items,
            rotation,
            autoplay,
            generations: RequestGenerations::new(),
        }
    }

    pub fn state_frame(&self) -> HeroFrame {
        let state = self.rotation.state();
        HeroFrame::State {
            index: state.current_index,
            count: state.item_count,
            auto_advance: state.auto_advance,
            item: self
                .rotation
                .current_index()
                .and_then(|i| self.items.get(i).cloned()),
        }
    }

    fn navigated(&mut self, result: Result<usize, RotationError>) -> Outcome {
        match result {
            Ok(_) => {
                self.autoplay.reset();
                Outcome::Send(self.state_frame())
            }
            Err(e) => Outcome::Send(HeroFrame::error(e.to_string())),
        }
    }

    pub fn handle(&mut self, action: HeroAction) -> Outcome {
        match action {
            HeroAction::Next => {
                let r = self.rotation.advance();
                self.navigated(r)
            }
            HeroAction::Prev => {
                let r = self.rotation.retreat();
                self.navigated(r)
            }
            HeroAction::Jump { index } => {
                let r = self.rotation.jump_to(index);
                self.navigated(r)
            }
            HeroAction::PointerEnter => {
                self.rotation.set_auto_advance(false);
                self.autoplay.stop();
                Outcome::Send(self.state_frame())
            }
            HeroAction::PointerLeave => {
                // an empty carousel stays paused
                if !self.items.is_empty() {
                    self.rotation.set_auto_advance(true);
                    // full interval from now, never a leftover remainder
                    self.autoplay.start();
                }
                Outcome::Send(self.state_frame())
            }
            HeroAction::Page { page, limit } => {
                match PageRequest::from_params(page, limit, DEFAULT_MOVIE_LIMIT) {
                    Ok(request) => Outcome::Fetch(self.generations.next(), request),
                    Err(e) => Outcome::Send(HeroFrame::error(e.to_string())),
                }
            }
        }
    }

    /// Resolves on the next automatic step; pending forever while paused.
    pub async fn tick(&mut self) -> HeroFrame {
        self.autoplay.tick().await;
        match self.rotation.on_tick() {
            Ok(_) => self.state_frame(),
            Err(e) => HeroFrame::error(e.to_string()),
        }
    }

    /// `None` when a newer page request has superseded this one.
    pub fn accept_page(&self, reply: PageReply) -> Option<HeroFrame> {
        let (generation, result) = reply;
        if !self.generations.is_current(generation) {
            debug!(generation = generation.value(), "Dropping superseded page response");
            return None;
        }
        Some(match result {
            Ok(page) => HeroFrame::Page {
                generation: generation.value(),
                page: PaginatedResponse::from_page(page),
            },
            Err(e) => HeroFrame::error(e.to_string()),
        })
    }
}

pub async fn ws_hero_handler(
    ws: WebSocketUpgrade,
    State(state): State<HeroSocketState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_hero_socket(socket, state))
}

async fn send_frame<S>(sender: &mut S, frame: &HeroFrame) -> bool
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize hero frame: {}", e);
            return true;
        }
    };
    match sender.send(Message::Text(json.into())).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to send hero frame: {}", e);
            false
        }
    }
}

async fn handle_hero_socket(socket: WebSocket, state: HeroSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let items = match state.dashboard.hero().await {
        Ok(items) => items.into_iter().map(CarouselItemDto::from).collect(),
        Err(e) => {
            error!("Failed to load hero items: {}", e);
            send_frame(&mut sender, &HeroFrame::error(e.to_string())).await;
            return;
        }
    };

    let mut session = HeroSession::new(items, state.interval);
    let (page_tx, mut page_rx) = mpsc::channel::<PageReply>(8);

    metrics::gauge!("hero_sessions_active").increment(1.0);
    info!(slides = session.items.len(), "Hero session opened");

    if send_frame(&mut sender, &session.state_frame()).await {
        loop {
            select! {
                msg = receiver.next() => {
                    let outcome = match msg {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<HeroAction>(&text) {
                                Ok(action) => session.handle(action),
                                Err(e) => Outcome::Send(HeroFrame::error(format!("invalid action: {e}"))),
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if sender.send(Message::Pong(data)).await.is_err() {
                                break;
                            }
                            continue;
                        }
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Err(e)) => {
                            warn!("Hero socket error: {}", e);
                            break;
                        }
                        Some(Ok(_)) => continue,
                    };

                    match outcome {
                        Outcome::Send(frame) => {
                            if !send_frame(&mut sender, &frame).await {
                                break;
                            }
                        }
                        Outcome::Fetch(generation, request) => {
                            let dashboard = Arc::clone(&state.dashboard);
                            let tx = page_tx.clone();
                            tokio::spawn(async move {
                                let result = dashboard.trending(request).await;
                                // receiver gone means the socket closed
                                let _ = tx.send((generation, result)).await;
                            });
                        }
                    }
                }

                frame = session.tick() => {
                    if !send_frame(&mut sender, &frame).await {
                        break;
                    }
                }

                Some(reply) = page_rx.recv() => {
                    if let Some(frame) = session.accept_page(reply) {
                        if !send_frame(&mut sender, &frame).await {
                            break;
                        }
                    }
                }
            }
        }
    }

    metrics::gauge!("hero_sessions_active").decrement(1.0);
    info!("Hero session closed");
}
