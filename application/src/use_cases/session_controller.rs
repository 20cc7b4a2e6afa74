//! Session controller use case.
//!
//! Owns the single active conversation and drives the turn-taking protocol:
//!
//! ```text
//! Idle --submit--> AwaitingResponse --success/failure/timeout/cancel--> Idle
//! ```
//!
//! All mutations go through one mutex that is never held across the model
//! call, so the only suspension point is the gateway await. At most one
//! request is outstanding; a second `submit` while one is pending is
//! rejected, not queued.

use crate::config::SessionConfig;
use crate::ports::attachment_reader::DecodedAttachment;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use persevan_domain::util::log_preview;
use persevan_domain::{
    AttachedFile, AttachedImage, AttachmentBuffer, AttachmentKind, ConsoleMode, Message,
    MessageId, MessageStore, Model, ModelRequest, RequestBuilder, Role,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Assistant text appended when the model call fails or times out.
pub const FAILURE_MESSAGE: &str =
    "SYSTEM ERROR: Cognitive bridge collapsed. Verify API key and link.";

/// Assistant text appended when the model returns no text.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Connection to Neural Core lost.";

/// Assistant text appended when a pending request is abandoned.
pub const CANCELLED_MESSAGE: &str = "Request cancelled.";

/// Errors from session operations other than submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Mode cannot change while a request is in flight")]
    ModeLocked,
}

/// Controller state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AwaitingResponse,
}

/// Why a submit did not dispatch anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// Blank prompt and no attachments.
    NothingToSend,
    /// Another request is still outstanding.
    RequestInFlight,
}

/// How the assistant side of a turn was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Answered,
    EmptyFallback,
    Failed,
    TimedOut,
    Cancelled,
}

impl TurnOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TurnOutcome::Answered | TurnOutcome::EmptyFallback)
    }
}

/// Ids and outcome of one completed submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummary {
    pub user_message: MessageId,
    pub assistant_message: MessageId,
    /// Mode the request was built with.
    pub mode: ConsoleMode,
    pub outcome: TurnOutcome,
}

/// Result of [`SessionController::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed(TurnSummary),
    Rejected(SubmitRejection),
}

impl SubmitOutcome {
    pub fn summary(&self) -> Option<&TurnSummary> {
        match self {
            SubmitOutcome::Completed(summary) => Some(summary),
            SubmitOutcome::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmitOutcome::Rejected(_))
    }
}

struct SessionState {
    messages: MessageStore,
    attachments: AttachmentBuffer,
    prompt: String,
    mode: ConsoleMode,
    inflight: bool,
}

/// A dispatched request whose assistant turn has not been appended yet.
///
/// Dropping it unsettled (e.g. the `submit` future was dropped) settles the
/// turn as cancelled so the session never stays stuck in-flight.
struct PendingTurn<'a> {
    controller: &'a SessionController,
    user_message: MessageId,
    mode: ConsoleMode,
    settled: bool,
}

impl PendingTurn<'_> {
    fn settle(mut self, result: Result<String, GatewayError>) -> TurnSummary {
        self.settled = true;
        self.controller
            .complete_turn(self.user_message, self.mode, result)
    }
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Pending request dropped before settling; recording cancellation");
            self.controller.complete_turn(
                self.user_message,
                self.mode,
                Err(GatewayError::Cancelled),
            );
        }
    }
}

/// Controller for the single active conversation.
///
/// Exposes transition methods only; callers read snapshots of the state.
pub struct SessionController {
    gateway: Arc<dyn LlmGateway>,
    builder: RequestBuilder,
    config: SessionConfig,
    state: Mutex<SessionState>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SessionController {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: SessionConfig) -> Self {
        let mut messages = MessageStore::new();
        if let Some(greeting) = &config.greeting {
            messages.append(Role::Assistant, greeting.as_str(), config.initial_mode);
        }

        Self {
            gateway,
            builder: RequestBuilder::new(config.model.clone()),
            state: Mutex::new(SessionState {
                messages,
                attachments: AttachmentBuffer::new(),
                prompt: String::new(),
                mode: config.initial_mode,
                inflight: false,
            }),
            config,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Read Access ====================

    pub fn model(&self) -> &Model {
        &self.config.model
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state().messages.messages().to_vec()
    }

    pub fn message_count(&self) -> usize {
        self.state().messages.len()
    }

    pub fn last_message(&self) -> Option<Message> {
        self.state().messages.last().cloned()
    }

    pub fn message(&self, id: MessageId) -> Option<Message> {
        self.state().messages.get(id).cloned()
    }

    pub fn prompt(&self) -> String {
        self.state().prompt.clone()
    }

    pub fn mode(&self) -> ConsoleMode {
        self.state().mode
    }

    pub fn pending_files(&self) -> Vec<AttachedFile> {
        self.state().attachments.files().to_vec()
    }

    pub fn pending_images(&self) -> Vec<AttachedImage> {
        self.state().attachments.images().to_vec()
    }

    pub fn pending_attachment_count(&self) -> usize {
        self.state().attachments.len()
    }

    pub fn is_inflight(&self) -> bool {
        self.state().inflight
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_inflight() {
            SessionPhase::AwaitingResponse
        } else {
            SessionPhase::Idle
        }
    }

    /// Whether `submit` would dispatch right now.
    pub fn can_submit(&self) -> bool {
        let state = self.state();
        Self::check_submittable(&state).is_ok()
    }

    // ==================== Draft & Mode ====================

    pub fn set_prompt(&self, text: impl Into<String>) {
        self.state().prompt = text.into();
    }

    pub fn set_mode(&self, mode: ConsoleMode) -> Result<(), SessionError> {
        let mut state = self.state();
        if state.inflight && !self.config.allow_mode_switch_while_pending {
            return Err(SessionError::ModeLocked);
        }
        if state.mode != mode {
            info!("Switching mode: {} -> {}", state.mode, mode);
            state.mode = mode;
            self.conversation_logger.log(ConversationEvent::new(
                ConversationEventKind::ModeSwitch,
                serde_json::json!({ "mode": mode }),
            ));
        }
        Ok(())
    }

    // ==================== Attachment Buffer ====================

    pub fn attach_file(&self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        debug!("Attaching file {}", name);
        self.state().attachments.add_file(name, content);
    }

    pub fn attach_image(
        &self,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<String>,
    ) {
        let name = name.into();
        debug!("Attaching image {}", name);
        self.state().attachments.add_image(name, mime_type, data);
    }

    pub fn attach(&self, attachment: DecodedAttachment) {
        match attachment {
            DecodedAttachment::File(f) => self.attach_file(f.name, f.content),
            DecodedAttachment::Image(i) => self.attach_image(i.name, i.mime_type, i.data),
        }
    }

    /// Remove a pending attachment; out-of-range indices do nothing.
    pub fn remove_attachment(&self, kind: AttachmentKind, index: usize) -> Option<String> {
        let removed = self.state().attachments.remove(kind, index);
        if removed.is_none() {
            debug!("No pending {} at index {}", kind, index);
        }
        removed
    }

    // ==================== Turn Protocol ====================

    /// Submit the current prompt and attachments.
    pub async fn submit(&self) -> SubmitOutcome {
        self.submit_with_cancellation(CancellationToken::new()).await
    }

    /// Submit, abandoning the model call if `token` is cancelled first.
    pub async fn submit_with_cancellation(&self, token: CancellationToken) -> SubmitOutcome {
        let (pending, request) = match self.dispatch() {
            Ok(dispatched) => dispatched,
            Err(rejection) => {
                debug!("Submit rejected: {:?}", rejection);
                return SubmitOutcome::Rejected(rejection);
            }
        };

        let result = self.invoke(&request, &token).await;
        SubmitOutcome::Completed(pending.settle(result))
    }

    fn check_submittable(state: &SessionState) -> Result<(), SubmitRejection> {
        if state.inflight {
            return Err(SubmitRejection::RequestInFlight);
        }
        if state.prompt.trim().is_empty() && state.attachments.is_empty() {
            return Err(SubmitRejection::NothingToSend);
        }
        Ok(())
    }

    /// `idle -> awaiting-response`, atomically under the state lock.
    fn dispatch(&self) -> Result<(PendingTurn<'_>, ModelRequest), SubmitRejection> {
        let mut state = self.state();
        Self::check_submittable(&state)?;

        let mode = state.mode;
        let has_attachments = !state.attachments.is_empty();
        let prompt = std::mem::take(&mut state.prompt);
        let user_text = RequestBuilder::effective_prompt(&prompt, has_attachments).to_string();

        let user_message = state
            .messages
            .append(Role::User, user_text.as_str(), mode)
            .id();
        let attachments = state.attachments.take();
        state.inflight = true;
        drop(state);

        let request = self
            .builder
            .build(&prompt, mode, &attachments.files, &attachments.images);

        info!(
            "Dispatching {} request: {} ({} file(s), {} image(s))",
            mode,
            log_preview(&user_text, 80),
            attachments.files.len(),
            attachments.images.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::UserTurn,
            serde_json::json!({
                "id": user_message.to_string(),
                "mode": mode,
                "model": request.model.as_str(),
                "text": user_text,
                "files": attachments.files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
                "images": attachments.images.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            }),
        ));

        let pending = PendingTurn {
            controller: self,
            user_message,
            mode,
            settled: false,
        };
        Ok((pending, request))
    }

    async fn invoke(
        &self,
        request: &ModelRequest,
        token: &CancellationToken,
    ) -> Result<String, GatewayError> {
        let call = async {
            match self.config.request_timeout {
                Some(limit) => tokio::time::timeout(limit, self.gateway.generate(request))
                    .await
                    .unwrap_or(Err(GatewayError::Timeout)),
                None => self.gateway.generate(request).await,
            }
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(GatewayError::Cancelled),
            result = call => result,
        }
    }

    /// `awaiting-response -> idle`: append the assistant turn and clear the flag.
    fn complete_turn(
        &self,
        user_message: MessageId,
        mode: ConsoleMode,
        result: Result<String, GatewayError>,
    ) -> TurnSummary {
        let (content, outcome) = match result {
            Ok(text) if text.is_empty() => {
                (EMPTY_RESPONSE_FALLBACK.to_string(), TurnOutcome::EmptyFallback)
            }
            Ok(text) => (text, TurnOutcome::Answered),
            Err(GatewayError::Cancelled) => (CANCELLED_MESSAGE.to_string(), TurnOutcome::Cancelled),
            Err(error) => {
                warn!("Model request failed ({})", error.category());
                self.conversation_logger.log(ConversationEvent::new(
                    ConversationEventKind::RequestFailed,
                    serde_json::json!({
                        "id": user_message.to_string(),
                        "category": error.category(),
                    }),
                ));
                let outcome = match error {
                    GatewayError::Timeout => TurnOutcome::TimedOut,
                    _ => TurnOutcome::Failed,
                };
                (FAILURE_MESSAGE.to_string(), outcome)
            }
        };

        let mut state = self.state();
        let assistant_message = state
            .messages
            .append(Role::Assistant, content.as_str(), mode)
            .id();
        state.inflight = false;
        drop(state);

        info!("Turn settled: {:?} ({} bytes)", outcome, content.len());
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::AssistantTurn,
            serde_json::json!({
                "id": assistant_message.to_string(),
                "reply_to": user_message.to_string(),
                "mode": mode,
                "outcome": format!("{:?}", outcome),
                "text": content,
            }),
        ));

        TurnSummary {
            user_message,
            assistant_message,
            mode,
            outcome,
        }
    }
}
