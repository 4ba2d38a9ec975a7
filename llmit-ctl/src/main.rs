use std::time::Duration;

use anyhow::Context;
use llmit_client::{
    api::{CommentId, PostId, PostsQuery, Sort},
    render, CommentTreeExt, CommentsState, ReplyTarget, Session, ViewState,
};

mod backend;

use backend::HttpBackend;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Base URL of the forum, defaults to the LLMIT_HOST environment variable
    #[structopt(short, long)]
    host: Option<String>,

    /// Give up on requests the server does not answer within this delay
    #[structopt(long, default_value = "15")]
    timeout_secs: u64,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List the posts of a group
    Posts {
        /// Group to list, the frontpage by default
        #[structopt(short, long)]
        group: Option<String>,

        /// Sort by date instead of by score
        #[structopt(long)]
        new: bool,

        #[structopt(short, long, default_value = "1")]
        page: u32,
    },

    /// Show the comment thread of a post
    Comments {
        post_id: i64,

        /// Print the thread as HTML instead of indented text
        #[structopt(long)]
        html: bool,
    },

    /// Reply to a post, or to one of its comments
    Reply {
        post_id: i64,

        /// Comment to reply to, the post itself if unset
        #[structopt(short, long)]
        parent: Option<i64>,

        content: String,
    },

    /// Search users by name
    SearchUsers { query: String },
}

fn host(opt: &Opt) -> anyhow::Result<String> {
    match &opt.host {
        Some(h) => Ok(h.clone()),
        None => std::env::var("LLMIT_HOST").context("retrieving LLMIT_HOST environment variable"),
    }
}

fn print_thread(session: &Session<HttpBackend>, post: PostId, html: bool) -> anyhow::Result<()> {
    let thread = session.thread(post);
    match &thread.comments {
        CommentsState::Unloaded => anyhow::bail!("comments of post {post} were not loaded"),
        CommentsState::Failed(err) => anyhow::bail!("failed loading comments: {err}"),
        CommentsState::Empty => println!("No comments yet."),
        CommentsState::Loaded(_) if html => println!("{}", render::to_html(&thread.render())),
        CommentsState::Loaded(comments) => {
            for (depth, c) in comments.walk() {
                let indent = "  ".repeat(depth);
                println!(
                    "{indent}[{}] {} (+{}/-{}): {}",
                    c.id, c.author, c.upvotes, c.downvotes, c.content
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let backend = HttpBackend::new(&host(&opt)?, Duration::from_secs(opt.timeout_secs))
        .context("building http client")?;

    match opt.cmd {
        Command::Posts { group, new, page } => {
            let mut view = ViewState::default();
            if let Some(group) = group {
                view = view.select_group(group);
            }
            if new {
                view = view.set_sort(Sort::New);
            }
            let page = page.max(1);
            let query = PostsQuery {
                page,
                ..view.posts_query()
            };
            let posts = backend
                .fetch_posts(&query)
                .await
                .context("fetching posts")?;
            for p in &posts {
                println!(
                    "[{}] {} by {} in {} (+{}/-{})",
                    p.id, p.title, p.author, p.group, p.upvotes, p.downvotes
                );
            }
            if view.has_next_page(posts.len()) {
                println!("More posts on page {}", page + 1);
            }
        }
        Command::Comments { post_id, html } => {
            let post = PostId(post_id);
            let mut session = Session::new(backend);
            session.load_comments(post).await;
            print_thread(&session, post, html)?;
        }
        Command::Reply {
            post_id,
            parent,
            content,
        } => {
            let post = PostId(post_id);
            let target = match parent {
                Some(comment) => ReplyTarget::Comment {
                    post,
                    comment: CommentId(comment),
                },
                None => ReplyTarget::Post(post),
            };
            let mut session = Session::new(backend);
            let msg = session
                .reply(target, content)
                .await
                .context("submitting reply")?;
            println!("{}", msg.message);
            print_thread(&session, post, false)?;
        }
        Command::SearchUsers { query } => {
            let query = match llmit_client::user_search_query(&query) {
                Some(q) => q,
                None => anyhow::bail!("search query is empty"),
            };
            for u in backend
                .search_users(&query)
                .await
                .context("searching users")?
            {
                println!("{}", u.username);
            }
        }
    }

    Ok(())
}
