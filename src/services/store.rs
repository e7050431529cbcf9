use std::future::Future;
use std::pin::Pin;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Conversation, Message, Review, Session, User};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors from the storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Secondary-index style query over user profiles
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Case-insensitive substring match on offered skill names
    pub skill: Option<String>,
    /// Exact match on offered skill categories
    pub category: Option<String>,
    /// Case-insensitive substring match on the profile city
    pub city: Option<String>,
}

/// Repository interface over the document store
///
/// Every entity gets plain create/find/query/update/delete operations; the
/// engine behind them is interchangeable. Dyn-compatible via boxed futures so
/// handlers can hold an `Arc<dyn Store>`.
pub trait Store: Send + Sync {
    // Users
    fn create_user(&self, user: User) -> BoxFuture<'_, Result<User, StoreError>>;
    fn find_user(&self, id: Uuid) -> BoxFuture<'_, Result<Option<User>, StoreError>>;
    fn find_user_by_email(&self, email: String)
        -> BoxFuture<'_, Result<Option<User>, StoreError>>;
    fn list_users(&self) -> BoxFuture<'_, Result<Vec<User>, StoreError>>;
    fn search_users(&self, query: UserQuery) -> BoxFuture<'_, Result<Vec<User>, StoreError>>;
    fn update_user(&self, user: User) -> BoxFuture<'_, Result<User, StoreError>>;

    // Sessions
    fn create_session(&self, session: Session) -> BoxFuture<'_, Result<Session, StoreError>>;
    fn find_session(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Session>, StoreError>>;
    /// Sessions where the user is requester or recipient, ascending by
    /// scheduled date
    fn sessions_for_user(&self, user_id: Uuid) -> BoxFuture<'_, Result<Vec<Session>, StoreError>>;
    fn update_session(&self, session: Session) -> BoxFuture<'_, Result<Session, StoreError>>;
    fn delete_session(&self, id: Uuid) -> BoxFuture<'_, Result<(), StoreError>>;

    // Reviews
    /// Fails with `Duplicate` when the reviewer already reviewed the session
    fn create_review(&self, review: Review) -> BoxFuture<'_, Result<Review, StoreError>>;
    /// Reviews about a user, newest first
    fn reviews_for_reviewee(&self, user_id: Uuid)
        -> BoxFuture<'_, Result<Vec<Review>, StoreError>>;
    /// Reviews written by a user, newest first
    fn reviews_by_reviewer(&self, user_id: Uuid)
        -> BoxFuture<'_, Result<Vec<Review>, StoreError>>;

    // Conversations
    fn create_conversation(
        &self,
        conversation: Conversation,
    ) -> BoxFuture<'_, Result<Conversation, StoreError>>;
    fn find_conversation(
        &self,
        id: Uuid,
    ) -> BoxFuture<'_, Result<Option<Conversation>, StoreError>>;
    fn find_conversation_between(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> BoxFuture<'_, Result<Option<Conversation>, StoreError>>;
    /// Conversations involving the user, most recently updated first
    fn conversations_for_user(
        &self,
        user_id: Uuid,
    ) -> BoxFuture<'_, Result<Vec<Conversation>, StoreError>>;
    fn update_conversation(
        &self,
        conversation: Conversation,
    ) -> BoxFuture<'_, Result<Conversation, StoreError>>;

    // Messages
    fn create_message(&self, message: Message) -> BoxFuture<'_, Result<Message, StoreError>>;
    fn find_message(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Message>, StoreError>>;
    /// Messages in a conversation, oldest first
    fn messages_for_conversation(
        &self,
        conversation_id: Uuid,
    ) -> BoxFuture<'_, Result<Vec<Message>, StoreError>>;
    /// Mark unread messages not sent by `reader` as read; returns how many
    fn mark_messages_read(
        &self,
        conversation_id: Uuid,
        reader: Uuid,
    ) -> BoxFuture<'_, Result<usize, StoreError>>;
}

/// In-memory document store
///
/// Entities live in insertion-ordered vectors behind `RwLock`s; every query
/// is a scan. Enumeration order is deterministic (insertion order), which the
/// ranking endpoint relies on for stable tie order.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    sessions: RwLock<Vec<Session>>,
    reviews: RwLock<Vec<Review>>,
    conversations: RwLock<Vec<Conversation>>,
    messages: RwLock<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

fn ready<'a, T: Send + 'a>(result: T) -> BoxFuture<'a, T> {
    Box::pin(async move { result })
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Store for MemoryStore {
    fn create_user(&self, user: User) -> BoxFuture<'_, Result<User, StoreError>> {
        let result = self.users.write().map_err(poisoned).and_then(|mut users| {
            if users
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(&user.email))
            {
                return Err(StoreError::Duplicate(format!(
                    "user with email {} already exists",
                    user.email
                )));
            }
            users.push(user.clone());
            Ok(user)
        });
        ready(result)
    }

    fn find_user(&self, id: Uuid) -> BoxFuture<'_, Result<Option<User>, StoreError>> {
        let result = self
            .users
            .read()
            .map_err(poisoned)
            .map(|users| users.iter().find(|u| u.id == id).cloned());
        ready(result)
    }

    fn find_user_by_email(
        &self,
        email: String,
    ) -> BoxFuture<'_, Result<Option<User>, StoreError>> {
        let result = self.users.read().map_err(poisoned).map(|users| {
            users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(&email))
                .cloned()
        });
        ready(result)
    }

    fn list_users(&self) -> BoxFuture<'_, Result<Vec<User>, StoreError>> {
        let result = self
            .users
            .read()
            .map_err(poisoned)
            .map(|users| users.clone());
        ready(result)
    }

    fn search_users(&self, query: UserQuery) -> BoxFuture<'_, Result<Vec<User>, StoreError>> {
        let result = self.users.read().map_err(poisoned).map(|users| {
            users
                .iter()
                .filter(|u| {
                    query.skill.as_deref().map_or(true, |skill| {
                        u.skills_offered
                            .iter()
                            .any(|s| contains_ci(&s.skill_name, skill))
                    })
                })
                .filter(|u| {
                    query.category.as_deref().map_or(true, |category| {
                        u.skills_offered.iter().any(|s| s.category == category)
                    })
                })
                .filter(|u| {
                    query.city.as_deref().map_or(true, |city| {
                        u.location
                            .as_ref()
                            .and_then(|l| l.city.as_deref())
                            .map_or(false, |c| contains_ci(c, city))
                    })
                })
                .cloned()
                .collect()
        });
        ready(result)
    }

    fn update_user(&self, user: User) -> BoxFuture<'_, Result<User, StoreError>> {
        let result = self.users.write().map_err(poisoned).and_then(|mut users| {
            match users.iter_mut().find(|u| u.id == user.id) {
                Some(slot) => {
                    *slot = user.clone();
                    Ok(user)
                }
                None => Err(StoreError::NotFound(format!("user {}", user.id))),
            }
        });
        ready(result)
    }

    fn create_session(&self, session: Session) -> BoxFuture<'_, Result<Session, StoreError>> {
        let result = self
            .sessions
            .write()
            .map_err(poisoned)
            .map(|mut sessions| {
                sessions.push(session.clone());
                session
            });
        ready(result)
    }

    fn find_session(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Session>, StoreError>> {
        let result = self
            .sessions
            .read()
            .map_err(poisoned)
            .map(|sessions| sessions.iter().find(|s| s.id == id).cloned());
        ready(result)
    }

    fn sessions_for_user(&self, user_id: Uuid) -> BoxFuture<'_, Result<Vec<Session>, StoreError>> {
        let result = self.sessions.read().map_err(poisoned).map(|sessions| {
            let mut found: Vec<Session> = sessions
                .iter()
                .filter(|s| s.involves(user_id))
                .cloned()
                .collect();
            found.sort_by_key(|s| s.scheduled_date);
            found
        });
        ready(result)
    }

    fn update_session(&self, session: Session) -> BoxFuture<'_, Result<Session, StoreError>> {
        let result = self
            .sessions
            .write()
            .map_err(poisoned)
            .and_then(|mut sessions| {
                match sessions.iter_mut().find(|s| s.id == session.id) {
                    Some(slot) => {
                        *slot = session.clone();
                        Ok(session)
                    }
                    None => Err(StoreError::NotFound(format!("session {}", session.id))),
                }
            });
        ready(result)
    }

    fn delete_session(&self, id: Uuid) -> BoxFuture<'_, Result<(), StoreError>> {
        let result = self
            .sessions
            .write()
            .map_err(poisoned)
            .and_then(|mut sessions| {
                let before = sessions.len();
                sessions.retain(|s| s.id != id);
                if sessions.len() == before {
                    Err(StoreError::NotFound(format!("session {}", id)))
                } else {
                    Ok(())
                }
            });
        ready(result)
    }

    fn create_review(&self, review: Review) -> BoxFuture<'_, Result<Review, StoreError>> {
        let result = self
            .reviews
            .write()
            .map_err(poisoned)
            .and_then(|mut reviews| {
                if reviews
                    .iter()
                    .any(|r| r.reviewer == review.reviewer && r.session == review.session)
                {
                    return Err(StoreError::Duplicate(
                        "session already reviewed by this user".to_string(),
                    ));
                }
                reviews.push(review.clone());
                Ok(review)
            });
        ready(result)
    }

    fn reviews_for_reviewee(
        &self,
        user_id: Uuid,
    ) -> BoxFuture<'_, Result<Vec<Review>, StoreError>> {
        let result = self.reviews.read().map_err(poisoned).map(|reviews| {
            let mut found: Vec<Review> = reviews
                .iter()
                .filter(|r| r.reviewee == user_id)
                .cloned()
                .collect();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            found
        });
        ready(result)
    }

    fn reviews_by_reviewer(
        &self,
        user_id: Uuid,
    ) -> BoxFuture<'_, Result<Vec<Review>, StoreError>> {
        let result = self.reviews.read().map_err(poisoned).map(|reviews| {
            let mut found: Vec<Review> = reviews
                .iter()
                .filter(|r| r.reviewer == user_id)
                .cloned()
                .collect();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            found
        });
        ready(result)
    }

    fn create_conversation(
        &self,
        conversation: Conversation,
    ) -> BoxFuture<'_, Result<Conversation, StoreError>> {
        let result = self
            .conversations
            .write()
            .map_err(poisoned)
            .map(|mut conversations| {
                conversations.push(conversation.clone());
                conversation
            });
        ready(result)
    }

    fn find_conversation(
        &self,
        id: Uuid,
    ) -> BoxFuture<'_, Result<Option<Conversation>, StoreError>> {
        let result = self
            .conversations
            .read()
            .map_err(poisoned)
            .map(|conversations| conversations.iter().find(|c| c.id == id).cloned());
        ready(result)
    }

    fn find_conversation_between(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> BoxFuture<'_, Result<Option<Conversation>, StoreError>> {
        let result = self
            .conversations
            .read()
            .map_err(poisoned)
            .map(|conversations| {
                conversations
                    .iter()
                    .find(|c| c.includes(a) && c.includes(b))
                    .cloned()
            });
        ready(result)
    }

    fn conversations_for_user(
        &self,
        user_id: Uuid,
    ) -> BoxFuture<'_, Result<Vec<Conversation>, StoreError>> {
        let result = self
            .conversations
            .read()
            .map_err(poisoned)
            .map(|conversations| {
                let mut found: Vec<Conversation> = conversations
                    .iter()
                    .filter(|c| c.includes(user_id))
                    .cloned()
                    .collect();
                found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                found
            });
        ready(result)
    }

    fn update_conversation(
        &self,
        conversation: Conversation,
    ) -> BoxFuture<'_, Result<Conversation, StoreError>> {
        let result =
            self.conversations
                .write()
                .map_err(poisoned)
                .and_then(|mut conversations| {
                    match conversations.iter_mut().find(|c| c.id == conversation.id) {
                        Some(slot) => {
                            *slot = conversation.clone();
                            Ok(conversation)
                        }
                        None => Err(StoreError::NotFound(format!(
                            "conversation {}",
                            conversation.id
                        ))),
                    }
                });
        ready(result)
    }

    fn create_message(&self, message: Message) -> BoxFuture<'_, Result<Message, StoreError>> {
        let result = self
            .messages
            .write()
            .map_err(poisoned)
            .map(|mut messages| {
                messages.push(message.clone());
                message
            });
        ready(result)
    }

    fn find_message(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Message>, StoreError>> {
        let result = self
            .messages
            .read()
            .map_err(poisoned)
            .map(|messages| messages.iter().find(|m| m.id == id).cloned());
        ready(result)
    }

    fn messages_for_conversation(
        &self,
        conversation_id: Uuid,
    ) -> BoxFuture<'_, Result<Vec<Message>, StoreError>> {
        let result = self.messages.read().map_err(poisoned).map(|messages| {
            let mut found: Vec<Message> = messages
                .iter()
                .filter(|m| m.conversation == conversation_id)
                .cloned()
                .collect();
            found.sort_by_key(|m| m.created_at);
            found
        });
        ready(result)
    }

    fn mark_messages_read(
        &self,
        conversation_id: Uuid,
        reader: Uuid,
    ) -> BoxFuture<'_, Result<usize, StoreError>> {
        let result = self
            .messages
            .write()
            .map_err(poisoned)
            .map(|mut messages| {
                let mut updated = 0;
                for message in messages
                    .iter_mut()
                    .filter(|m| m.conversation == conversation_id && m.sender != reader && !m.read)
                {
                    message.read = true;
                    updated += 1;
                }
                updated
            });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(name: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            bio: None,
            profile_image: String::new(),
            skills_offered: vec![],
            skills_wanted: vec![],
            availability: vec![],
            rating: 0.0,
            review_count: 0,
            location: None,
            timezone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.create_user(user("Alice", "alice@example.com")).await.unwrap();

        let err = store
            .create_user(user("Imposter", "ALICE@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_user_by_email_is_case_insensitive() {
        let store = MemoryStore::new();
        let alice = store.create_user(user("Alice", "alice@example.com")).await.unwrap();

        let found = store
            .find_user_by_email("Alice@Example.com".to_string())
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.id), Some(alice.id));
    }

    #[tokio::test]
    async fn test_update_user_requires_existing() {
        let store = MemoryStore::new();
        let err = store.update_user(user("Ghost", "ghost@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_users_combines_filters() {
        let store = MemoryStore::new();

        let mut alice = user("Alice", "alice@example.com");
        alice.skills_offered = vec![crate::models::SkillOffered {
            id: Uuid::new_v4(),
            skill_name: "Python".to_string(),
            category: "Programming & Development".to_string(),
            proficiency_level: None,
            description: None,
        }];
        alice.location = Some(crate::models::Location {
            city: Some("Paris".to_string()),
            country: None,
        });
        store.create_user(alice).await.unwrap();
        store.create_user(user("Bob", "bob@example.com")).await.unwrap();

        let hits = store
            .search_users(UserQuery {
                skill: Some("pyth".to_string()),
                category: Some("Programming & Development".to_string()),
                city: Some("par".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alice");

        let misses = store
            .search_users(UserQuery {
                skill: Some("rust".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_review_rejected() {
        let store = MemoryStore::new();
        let reviewer = Uuid::new_v4();
        let session = Uuid::new_v4();

        let review = Review {
            id: Uuid::new_v4(),
            reviewer,
            reviewee: Uuid::new_v4(),
            session,
            rating: 5,
            comment: None,
            skill_taught: None,
            created_at: Utc::now(),
        };
        store.create_review(review.clone()).await.unwrap();

        let mut again = review;
        again.id = Uuid::new_v4();
        let err = store.create_review(again).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_mark_messages_read_skips_own_messages() {
        let store = MemoryStore::new();
        let conversation = Uuid::new_v4();
        let me = Uuid::new_v4();
        let them = Uuid::new_v4();

        for sender in [me, them, them] {
            store
                .create_message(Message {
                    id: Uuid::new_v4(),
                    conversation,
                    sender,
                    content: "hi".to_string(),
                    read: false,
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
        }

        let updated = store.mark_messages_read(conversation, me).await.unwrap();
        assert_eq!(updated, 2);

        let messages = store.messages_for_conversation(conversation).await.unwrap();
        for message in messages {
            if message.sender == me {
                assert!(!message.read);
            } else {
                assert!(message.read);
            }
        }
    }
}
