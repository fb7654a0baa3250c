//! Editable state store
//!
//! Owns the single [`Post`] being edited and the draft [`Comment`] of the
//! new-comment form. Every change to the post is pushed to one
//! [`PostObserver`], which is how the preview stays in sync.

use crate::models::{Comment, CommentField, FieldError, FieldValue, Post, PostField};

/// Receives the post after every mutation
pub trait PostObserver {
    /// Called with the updated post
    fn post_changed(&mut self, post: &Post);
}

/// No-op observer
impl PostObserver for () {
    fn post_changed(&mut self, _post: &Post) {}
}

/// Holds the post, the draft comment and the observer
#[derive(Debug)]
pub struct EditorStore<O: PostObserver = ()> {
    post: Post,
    draft: Comment,
    observer: O,
    revision: u64,
}

impl Default for EditorStore<()> {
    fn default() -> Self {
        Self::new(Post::default())
    }
}

impl EditorStore<()> {
    /// Create a store without an observer
    pub fn new(post: Post) -> Self {
        Self::with_observer(post, ())
    }
}

impl<O: PostObserver> EditorStore<O> {
    /// Create a store; the observer sees the initial post right away
    pub fn with_observer(post: Post, mut observer: O) -> Self {
        observer.post_changed(&post);
        Self {
            post,
            draft: Comment::default(),
            observer,
            revision: 0,
        }
    }

    /// Current post
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// Current draft comment
    pub fn draft(&self) -> &Comment {
        &self.draft
    }

    /// The observer
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Number of post mutations so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace one attribute of the post
    pub fn set_post_field(&mut self, field: PostField, value: FieldValue) -> Result<(), FieldError> {
        self.post.set(field, value)?;
        tracing::trace!(?field, "post field updated");
        self.notify();
        Ok(())
    }

    /// Replace one attribute of the draft comment
    pub fn set_draft_field(
        &mut self,
        field: CommentField,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        self.draft.set(field, value)?;
        tracing::trace!(?field, "draft field updated");
        Ok(())
    }

    /// Append the draft to the post's comments and start a fresh draft.
    ///
    /// Returns `false` and changes nothing when the draft is missing its
    /// name, handle or text.
    pub fn commit_draft_comment(&mut self) -> bool {
        if !self.draft.is_complete() {
            tracing::debug!("incomplete draft comment ignored");
            return false;
        }
        let comment = std::mem::take(&mut self.draft);
        self.post.comments.push(comment);
        self.notify();
        true
    }

    /// Remove the comment at `index`, keeping the others in order.
    ///
    /// Out of range indices are ignored.
    pub fn remove_comment(&mut self, index: usize) -> Option<Comment> {
        if index >= self.post.comments.len() {
            return None;
        }
        let removed = self.post.comments.remove(index);
        self.notify();
        Some(removed)
    }

    /// Discard the draft
    pub fn reset_draft(&mut self) {
        self.draft = Comment::default();
    }

    fn notify(&mut self) {
        self.revision += 1;
        self.observer.post_changed(&self.post);
    }
}
