use futures::executor::block_on;
use llmit_api::{Backend, PostId};
use llmit_mock_server::MockServer;

const NUM_USERS: usize = 5;
const NUM_POSTS: i64 = 3;
const NUM_COMMENTS_PER_POST: usize = 40;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let users = tests::gen_users(&mut rng, NUM_USERS);
    let server = MockServer::new();

    let mut threads = serde_json::Map::new();
    for post in (1..=NUM_POSTS).map(PostId) {
        tests::seed_thread(&server, &mut rng, post, &users, NUM_COMMENTS_PER_POST);
        let mut comments = block_on(server.fetch_comments(post))?;
        tests::decorate(&mut rng, &mut comments);
        threads.insert(
            post.to_string(),
            serde_json::to_value(&comments)?,
        );
    }

    println!("{}", serde_json::to_string_pretty(&threads)?);
    Ok(())
}
