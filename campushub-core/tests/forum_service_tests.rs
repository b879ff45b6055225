// tests/forum_service_tests.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use campushub_common::models::{ForumComment, ForumThread};
use campushub_common::traits::repository_traits::ForumRepository;
use campushub_core::services::ForumService;
use campushub_core::Error;

#[derive(Default)]
struct MockForumState {
    threads: Vec<ForumThread>,
    comments: Vec<ForumComment>,
    thread_likes: HashSet<(Uuid, Uuid)>,
    comment_likes: HashSet<(Uuid, Uuid)>,
}

/// In-memory ForumRepository. Counter updates happen under the same
/// lock as the membership change, like the transactional SQL version.
#[derive(Default)]
struct MockForumRepo {
    state: Mutex<MockForumState>,
}

#[async_trait]
impl ForumRepository for MockForumRepo {
    async fn create_thread(&self, thread: &ForumThread) -> Result<(), Error> {
        self.state.lock().unwrap().threads.push(thread.clone());
        Ok(())
    }

    async fn get_thread(&self, forum_id: Uuid) -> Result<Option<ForumThread>, Error> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .threads
            .iter()
            .find(|t| t.forum_id == forum_id)
            .cloned())
    }

    async fn list_threads(&self) -> Result<Vec<ForumThread>, Error> {
        let mut threads = self.state.lock().unwrap().threads.clone();
        threads.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        Ok(threads)
    }

    async fn delete_thread(&self, forum_id: Uuid) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.threads.retain(|t| t.forum_id != forum_id);
        state.comments.retain(|c| c.forum_id != forum_id);
        state.thread_likes.retain(|(f, _)| *f != forum_id);
        Ok(())
    }

    async fn insert_comment(&self, comment: &ForumComment) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.comments.push(comment.clone());
        if let Some(thread) = state
            .threads
            .iter_mut()
            .find(|t| t.forum_id == comment.forum_id)
        {
            thread.comments_count += 1;
            thread.last_activity = comment.created_at;
        }
        Ok(())
    }

    async fn list_comments(&self, forum_id: Uuid) -> Result<Vec<ForumComment>, Error> {
        let mut comments: Vec<ForumComment> = self
            .state
            .lock()
            .unwrap()
            .comments
            .iter()
            .filter(|c| c.forum_id == forum_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn toggle_thread_like(
        &self,
        forum_id: Uuid,
        user_id: Uuid,
        _at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mut state = self.state.lock().unwrap();
        let key = (forum_id, user_id);
        let liked = if state.thread_likes.contains(&key) {
            state.thread_likes.remove(&key);
            false
        } else {
            state.thread_likes.insert(key);
            true
        };
        if let Some(thread) = state.threads.iter_mut().find(|t| t.forum_id == forum_id) {
            thread.likes += if liked { 1 } else { -1 };
        }
        Ok(liked)
    }

    async fn toggle_comment_like(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        _at: DateTime<Utc>,
    ) -> Result<bool, Error> {
        let mut state = self.state.lock().unwrap();
        let key = (comment_id, user_id);
        let liked = if state.comment_likes.contains(&key) {
            state.comment_likes.remove(&key);
            false
        } else {
            state.comment_likes.insert(key);
            true
        };
        if let Some(comment) = state
            .comments
            .iter_mut()
            .find(|c| c.comment_id == comment_id)
        {
            comment.likes += if liked { 1 } else { -1 };
        }
        Ok(liked)
    }
}

fn service() -> ForumService {
    ForumService::new(Arc::new(MockForumRepo::default()))
}

#[tokio::test]
async fn create_thread_requires_title_and_category() {
    let service = service();

    let err = service
        .create_thread("  ", "general", None, "Maya L")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = service
        .create_thread("Study group", "", None, "Maya L")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn comment_bumps_count_and_activity() -> Result<(), Error> {
    let service = service();

    let thread = service
        .create_thread("Exam prep", "study", Some("Week 12 plan"), "Jonas B")
        .await?;
    assert_eq!(thread.comments_count, 0);

    service.add_comment(thread.forum_id, "I am in", "Sara H").await?;
    service.add_comment(thread.forum_id, "Same here", "Omar K").await?;

    let reloaded = service.get_thread(thread.forum_id).await?;
    assert_eq!(reloaded.comments_count, 2);
    assert!(reloaded.last_activity > thread.created_at || reloaded.last_activity == thread.created_at);

    let comments = service.list_comments(thread.forum_id).await?;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].body, "I am in");
    Ok(())
}

#[tokio::test]
async fn comment_on_missing_thread_is_not_found() {
    let service = service();
    let err = service
        .add_comment(Uuid::new_v4(), "Hello?", "Sara H")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn empty_comment_is_rejected() -> Result<(), Error> {
    let service = service();
    let thread = service
        .create_thread("Lost keys", "misc", None, "Tim F")
        .await?;

    let err = service
        .add_comment(thread.forum_id, "   ", "Tim F")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn thread_like_toggles_per_user() -> Result<(), Error> {
    let service = service();
    let thread = service
        .create_thread("Spring party", "events", None, "Lea N")
        .await?;
    let user = Uuid::new_v4();

    assert!(service.toggle_thread_like(thread.forum_id, user).await?);
    assert_eq!(service.get_thread(thread.forum_id).await?.likes, 1);

    // Same user again: un-like, never a double count.
    assert!(!service.toggle_thread_like(thread.forum_id, user).await?);
    assert_eq!(service.get_thread(thread.forum_id).await?.likes, 0);

    let other = Uuid::new_v4();
    assert!(service.toggle_thread_like(thread.forum_id, user).await?);
    assert!(service.toggle_thread_like(thread.forum_id, other).await?);
    assert_eq!(service.get_thread(thread.forum_id).await?.likes, 2);
    Ok(())
}

#[tokio::test]
async fn comment_like_toggles_per_user() -> Result<(), Error> {
    let service = service();
    let thread = service
        .create_thread("Course reviews", "study", None, "Vera L")
        .await?;
    let comment = service
        .add_comment(thread.forum_id, "Take the stats course", "Vera L")
        .await?;
    let user = Uuid::new_v4();

    assert!(service.toggle_comment_like(comment.comment_id, user).await?);
    let comments = service.list_comments(thread.forum_id).await?;
    assert_eq!(comments[0].likes, 1);

    assert!(!service.toggle_comment_like(comment.comment_id, user).await?);
    let comments = service.list_comments(thread.forum_id).await?;
    assert_eq!(comments[0].likes, 0);
    Ok(())
}

#[tokio::test]
async fn threads_list_newest_activity_first() -> Result<(), Error> {
    let service = service();

    let first = service
        .create_thread("Older thread", "misc", None, "Maya L")
        .await?;
    let second = service
        .create_thread("Newer thread", "misc", None, "Jonas B")
        .await?;

    // A comment on the older thread moves it back to the top.
    service.add_comment(first.forum_id, "Bump", "Sara H").await?;

    let threads = service.list_threads().await?;
    assert_eq!(threads[0].forum_id, first.forum_id);
    assert_eq!(threads[1].forum_id, second.forum_id);
    Ok(())
}
