//! Random comment threads, for end-to-end tests and for feeding a local
//! development server

use chrono::NaiveDateTime;
use llmit_api::{CommentId, CommentNode, PostId};
use llmit_mock_server::MockServer;
use rand::{seq::SliceRandom, Rng};

const COMMENT_WORD_COUNT: usize = 12;

// Share of comments that start a new top-level discussion
const TOP_LEVEL_PROBABILITY: f64 = 0.3;

// 2023-01-01T00:00:00Z, and one year worth of seconds after it
const TIMESTAMP_BASE: i64 = 1_672_531_200;
const TIMESTAMP_SPREAD: i64 = 365 * 24 * 3600;

pub fn gen_users(rng: &mut impl Rng, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let word = lipsum::lipsum_words_with_rng(&mut *rng, 1).to_lowercase();
            let word = word.trim_end_matches(|c: char| !c.is_alphanumeric());
            format!("{word}{i}")
        })
        .collect()
}

pub fn gen_comment_text(rng: &mut impl Rng) -> String {
    lipsum::lipsum_words_with_rng(rng, COMMENT_WORD_COUNT)
}

/// Store `n` random comments of `post` on `server`, authored by `users`
///
/// Returns the ids of the new comments in creation order.
pub fn seed_thread(
    server: &MockServer,
    rng: &mut impl Rng,
    post: PostId,
    users: &[String],
    n: usize,
) -> Vec<CommentId> {
    let mut ids: Vec<CommentId> = Vec::with_capacity(n);
    for _ in 0..n {
        let parent = match ids.is_empty() || rng.gen_bool(TOP_LEVEL_PROBABILITY) {
            true => None,
            false => ids.choose(rng).copied(),
        };
        let author = users.choose(rng).map(String::as_str).unwrap_or("Anonymous");
        let content = gen_comment_text(&mut *rng);
        ids.push(server.add_comment(post, parent, author, &content));
    }
    ids
}

/// Fill in the fields the mock server leaves at their default
pub fn decorate(rng: &mut impl Rng, comments: &mut [CommentNode]) {
    let mut stack = comments.iter_mut().collect::<Vec<_>>();
    while let Some(c) = stack.pop() {
        c.upvotes = rng.gen_range(0..100);
        c.downvotes = rng.gen_range(0..20);
        c.is_ai_generated = rng.gen_bool(0.2);
        c.timestamp = NaiveDateTime::from_timestamp_opt(
            TIMESTAMP_BASE + rng.gen_range(0..TIMESTAMP_SPREAD),
            0,
        );
        stack.extend(c.children.iter_mut());
    }
}
