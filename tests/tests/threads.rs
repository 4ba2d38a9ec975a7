use futures::executor::block_on;
use llmit_api::{CommentId, PostId};
use llmit_client::{
    render, CommentTreeExt, CommentsState, DisplayNode, PostThread, ReplyTarget, Session,
};
use llmit_mock_server::{MockServer, Request};
use rand::{rngs::StdRng, SeedableRng};

const POST: PostId = PostId(7);

fn flatten(nodes: &[DisplayNode]) -> Vec<&DisplayNode> {
    let mut res = Vec::new();
    let mut stack = nodes.iter().rev().collect::<Vec<_>>();
    while let Some(n) = stack.pop() {
        res.push(n);
        stack.extend(n.children.iter().rev());
    }
    res
}

fn random_session(seed: u64, num_comments: usize) -> (Session<MockServer>, Vec<CommentId>, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let users = tests::gen_users(&mut rng, 4);
    let server = MockServer::new();
    let ids = tests::seed_thread(&server, &mut rng, POST, &users, num_comments);
    (Session::new(server), ids, rng)
}

fn loaded(thread: &PostThread) -> Vec<llmit_api::CommentNode> {
    match &thread.comments {
        CommentsState::Loaded(c) => c.to_vec(),
        other => panic!("thread is not loaded: {other:?}"),
    }
}

#[test]
fn random_threads_render_every_comment_once() {
    for seed in 0..20 {
        let (mut session, ids, _) = random_session(seed, 30);
        let thread = block_on(session.load_comments(POST));
        let comments = loaded(&thread);
        comments.check_links(POST).unwrap();
        assert_eq!(comments.count_comments(), ids.len());

        let rendered = thread.render();
        let flat = flatten(&rendered);
        assert_eq!(flat.len(), ids.len(), "seed {seed}");
        let walked = comments.walk();
        for (n, (depth, c)) in flat.iter().zip(walked) {
            assert_eq!(n.comment, c.id);
            assert_eq!(n.depth, depth);
            assert_eq!(n.indent_px, depth * render::INDENT_UNIT_PX);
            assert_eq!(n.content, c.content);
            assert!(!n.reply_form.visible);
        }
    }
}

#[test]
fn reply_to_random_comment_lands_under_it() {
    for seed in 0..10 {
        let (mut session, ids, _) = random_session(seed, 15);
        block_on(session.load_comments(POST));
        let parent = ids[(seed as usize * 7) % ids.len()];
        let target = ReplyTarget::Comment {
            post: POST,
            comment: parent,
        };
        session.backend().clear_requests();

        let msg = block_on(session.reply(target, String::from("  well said  "))).unwrap();
        assert_eq!(msg.message, "Comment submitted successfully");
        assert_eq!(session.backend().requests().len(), 2);
        assert!(matches!(
            &session.backend().requests()[..],
            [Request::CreateComment(c), Request::FetchComments(POST)]
                if c.parent_comment_id == Some(parent)
        ));

        let thread = session.thread(POST);
        let comments = loaded(&thread);
        let children = &comments.find(parent).unwrap().children;
        let last = children.last().unwrap();
        assert_eq!(last.author, "tester");
        assert_eq!(last.content, "  well said  ");
        assert_eq!(comments.count_comments(), ids.len() + 1);
        assert!(flatten(&thread.render()).iter().all(|n| !n.reply_form.visible));
    }
}

#[test]
fn html_has_one_reply_form_per_comment() {
    let (mut session, ids, _) = random_session(42, 25);
    let thread = block_on(session.load_comments(POST));
    let html = render::to_html(&thread.render());
    for id in ids {
        assert_eq!(html.matches(&format!(r#"id="reply-form-{id}""#)).count(), 1);
    }
    assert_eq!(
        html.matches(r#"<div class="comment""#).count(),
        html.matches(r#"class="reply-form-container""#).count()
    );
}

#[test]
fn decorated_threads_keep_their_shape() {
    let (session, _, mut rng) = random_session(3, 20);
    let mut comments = block_on(llmit_api::Backend::fetch_comments(session.backend(), POST)).unwrap();
    let before = comments
        .walk()
        .into_iter()
        .map(|(d, c)| (d, c.id))
        .collect::<Vec<_>>();
    tests::decorate(&mut rng, &mut comments);
    let after = comments
        .walk()
        .into_iter()
        .map(|(d, c)| (d, c.id))
        .collect::<Vec<_>>();
    assert_eq!(before, after);
    assert!(comments.walk().iter().all(|(_, c)| c.timestamp.is_some()));
}

#[test]
fn fuzz_mock_threads_load_consistently() {
    bolero::check!()
        .with_type::<Vec<u8>>()
        .for_each(|shape: &Vec<u8>| {
            let server = MockServer::new();
            let mut ids = Vec::new();
            for (i, b) in shape.iter().take(64).enumerate() {
                let parent = match *b as usize % (i + 1) {
                    0 => None,
                    p => Some(ids[p - 1]),
                };
                ids.push(server.add_comment(POST, parent, "fuzzer", "text"));
            }
            let mut session = Session::new(server);
            let thread = block_on(session.load_comments(POST));
            match &thread.comments {
                CommentsState::Empty => assert!(ids.is_empty()),
                CommentsState::Loaded(c) => {
                    c.check_links(POST).unwrap();
                    assert_eq!(c.count_comments(), ids.len());
                    assert_eq!(flatten(&thread.render()).len(), ids.len());
                }
                other => panic!("unexpected state {other:?}"),
            }
        });
}
