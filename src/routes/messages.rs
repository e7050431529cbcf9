use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{validation_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::{
    Conversation, ConversationView, Message, MessageResponse, MessageView,
    OpenConversationRequest, SendMessageRequest, User, UserSummary,
};
use crate::routes::{require_user, AppState};
use crate::services::BusEvent;

/// Configure messaging routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/message")
            .route("/conversation", web::post().to(open_conversation))
            .route("/conversations", web::get().to(get_conversations))
            .route("", web::post().to(send_message))
            .route("/{conversationId}", web::get().to(get_messages))
            .route("/{conversationId}/read", web::put().to(mark_as_read)),
    );
}

async fn populate_conversation(
    state: &AppState,
    conversation: Conversation,
) -> Result<ConversationView, ApiError> {
    let mut participants: Vec<UserSummary> = Vec::with_capacity(2);
    for id in conversation.participants {
        participants.push(require_user(state, id).await?.summary());
    }

    let last_message = match conversation.last_message {
        Some(id) => state.store.find_message(id).await?,
        None => None,
    };

    Ok(ConversationView {
        id: conversation.id,
        participants,
        last_message,
        created_at: conversation.created_at,
        updated_at: conversation.updated_at,
    })
}

async fn require_participant(
    state: &AppState,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Result<Conversation, ApiError> {
    let conversation = state
        .store
        .find_conversation(conversation_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("conversation not found".to_string()))?;

    if !conversation.includes(user_id) {
        return Err(ApiError::Forbidden("not authorized".to_string()));
    }
    Ok(conversation)
}

/// Get or create the conversation with another user
///
/// POST /api/message/conversation
async fn open_conversation(
    state: web::Data<AppState>,
    caller: AuthUser,
    req: web::Json<OpenConversationRequest>,
) -> Result<HttpResponse, ApiError> {
    let participant = require_user(&state, req.participant_id).await?;

    if participant.id == caller.user_id {
        return Err(ApiError::BadRequest(
            "cannot open a conversation with yourself".to_string(),
        ));
    }

    let existing = state
        .store
        .find_conversation_between(caller.user_id, participant.id)
        .await?;

    let conversation = match existing {
        Some(conversation) => conversation,
        None => {
            let now = Utc::now();
            state
                .store
                .create_conversation(Conversation {
                    id: Uuid::new_v4(),
                    participants: [caller.user_id, participant.id],
                    last_message: None,
                    created_at: now,
                    updated_at: now,
                })
                .await?
        }
    };

    let view = populate_conversation(&state, conversation).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// The caller's conversations, most recently updated first
///
/// GET /api/message/conversations
async fn get_conversations(
    state: web::Data<AppState>,
    caller: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let conversations = state.store.conversations_for_user(caller.user_id).await?;

    let mut views = Vec::with_capacity(conversations.len());
    for conversation in conversations {
        views.push(populate_conversation(&state, conversation).await?);
    }

    Ok(HttpResponse::Ok().json(views))
}

/// Send a message and fan it out to the conversation room
///
/// POST /api/message
async fn send_message(
    state: web::Data<AppState>,
    caller: AuthUser,
    req: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(validation_error)?;
    let req = req.into_inner();

    let mut conversation = require_participant(&state, req.conversation_id, caller.user_id).await?;
    let sender = require_user(&state, caller.user_id).await?;

    let message = state
        .store
        .create_message(Message {
            id: Uuid::new_v4(),
            conversation: conversation.id,
            sender: sender.id,
            content: req.content,
            read: false,
            created_at: Utc::now(),
        })
        .await?;

    conversation.last_message = Some(message.id);
    conversation.updated_at = Utc::now();
    state.store.update_conversation(conversation).await?;

    let view = MessageView::populate(message, &sender);

    // Real-time fan-out to everyone subscribed to this conversation's room
    state.bus.publish(
        &view.conversation.to_string(),
        BusEvent::MessageReceived(view.clone()),
    );

    Ok(HttpResponse::Created().json(view))
}

/// Messages in a conversation, oldest first
///
/// GET /api/message/{conversationId}
async fn get_messages(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let conversation = require_participant(&state, path.into_inner(), caller.user_id).await?;
    let messages = state.store.messages_for_conversation(conversation.id).await?;

    // Senders repeat; fetch each participant once
    let mut senders: HashMap<Uuid, User> = HashMap::new();
    let mut views = Vec::with_capacity(messages.len());
    for message in messages {
        if !senders.contains_key(&message.sender) {
            let user = require_user(&state, message.sender).await?;
            senders.insert(message.sender, user);
        }
        let sender = &senders[&message.sender];
        views.push(MessageView::populate(message, sender));
    }

    Ok(HttpResponse::Ok().json(views))
}

/// Mark everything the other side sent as read
///
/// PUT /api/message/{conversationId}/read
async fn mark_as_read(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let conversation = require_participant(&state, path.into_inner(), caller.user_id).await?;

    state
        .store
        .mark_messages_read(conversation.id, caller.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Messages marked as read".to_string(),
    }))
}
