mod app;
pub use app::{App, AppMsg, AppProps};

mod comment_thread;
pub use comment_thread::{CommentThread, CommentView};

mod notice_banner;
pub use notice_banner::NoticeBanner;

mod post_card;
pub use post_card::PostCard;

mod reply_form;
pub use reply_form::ReplyForm;

mod theme_toggle;
pub use theme_toggle::ThemeToggle;

mod user_search;
pub use user_search::UserSearch;

mod view_controls;
pub use view_controls::ViewControls;
