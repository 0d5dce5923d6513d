//! Sidebar engagement widgets: the comment box and the like/dislike counters.
//!
//! Both widgets read their persisted state once when constructed and write
//! through to the store on every change. The store is passed in per call; a
//! widget never keeps a reference to it.
//!
//! A failed store write is logged and otherwise ignored: the in-memory state
//! still advances so the page stays consistent with what the user did.

use crate::store::{self, DISLIKE_COUNT_KEY, KeyValueStore, LIKE_COUNT_KEY};

// =============================================================================
// Comment box
// =============================================================================

/// Draft input plus the append-only list of submitted comments.
#[derive(Debug, Clone, Default)]
pub struct CommentBox {
    draft: String,
    comments: Vec<String>,
}

impl CommentBox {
    /// Load previously submitted comments. Missing or corrupt data loads as
    /// an empty list.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            draft: String::new(),
            comments: store::load_json(store, store::COMMENTS_KEY, Vec::new()),
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Submit the draft.
    ///
    /// A draft that is blank after trimming is ignored. Otherwise the draft
    /// is appended exactly as typed, persisted, and cleared. Returns whether
    /// a comment was added.
    pub fn submit(&mut self, store: &mut dyn KeyValueStore) -> bool {
        if self.draft.trim().is_empty() {
            return false;
        }
        let comment = std::mem::take(&mut self.draft);
        self.comments.push(comment);
        if let Err(e) = store::save_json(store, store::COMMENTS_KEY, &self.comments) {
            tracing::error!(error = %e, "failed to persist comments");
        }
        tracing::info!(total = self.comments.len(), "comment submitted");
        true
    }
}

// =============================================================================
// Like / dislike counters
// =============================================================================

/// Which counter a widget drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Like,
    Dislike,
}

impl Polarity {
    /// Store key holding this counter.
    pub fn store_key(self) -> &'static str {
        match self {
            Self::Like => LIKE_COUNT_KEY,
            Self::Dislike => DISLIKE_COUNT_KEY,
        }
    }

    /// CSS class of the counter's button.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Like => "likeBtn",
            Self::Dislike => "dislikeBtn",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Like => "Like",
            Self::Dislike => "Dislike",
        }
    }
}

/// A short one-shot animation attached to a counter button.
pub trait Playback {
    /// Halt and rewind to the first frame.
    fn stop(&mut self);
    /// Play from the current frame.
    fn play(&mut self);
}

/// Headless animation model: tracks the frame position and how many times
/// playback was started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FramePlayback {
    frame: u32,
    playing: bool,
    starts: u64,
}

impl FramePlayback {
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Number of times `play` has been called.
    pub fn starts(&self) -> u64 {
        self.starts
    }

    /// Advance one frame while playing.
    pub fn tick(&mut self) {
        if self.playing {
            self.frame = self.frame.saturating_add(1);
        }
    }
}

impl Playback for FramePlayback {
    fn stop(&mut self) {
        self.playing = false;
        self.frame = 0;
    }

    fn play(&mut self) {
        self.playing = true;
        self.starts += 1;
    }
}

/// Persisted counter for one [`Polarity`].
#[derive(Debug, Clone)]
pub struct EngagementCounter<P = FramePlayback> {
    polarity: Polarity,
    count: u64,
    playback: P,
}

impl<P: Playback> EngagementCounter<P> {
    /// Load the counter for `polarity`. Missing or unparsable values load
    /// as 0.
    pub fn load(polarity: Polarity, store: &dyn KeyValueStore, playback: P) -> Self {
        Self {
            polarity,
            count: store::load_json(store, polarity.store_key(), 0u64),
            playback,
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    /// Add one, persist, and restart the animation from its first frame.
    pub fn increment(&mut self, store: &mut dyn KeyValueStore) -> u64 {
        self.count = self.count.saturating_add(1);
        if let Err(e) = store::save_json(store, self.polarity.store_key(), &self.count) {
            tracing::error!(polarity = ?self.polarity, error = %e, "failed to persist counter");
        }
        self.playback.stop();
        self.playback.play();
        tracing::info!(polarity = ?self.polarity, count = self.count, "counter incremented");
        self.count
    }
}
