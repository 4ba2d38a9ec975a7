use crate::api::{Error, PostsQuery, Sort, UserSummary, FRONTPAGE, POSTS_PER_PAGE};

/// Which posts are being looked at
///
/// Transitions consume the state and return the new one, so that a view is
/// always rendered from a single consistent value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ViewState {
    pub group: String,
    pub sort: Sort,
    pub page: u32,
}

impl Default for ViewState {
    fn default() -> ViewState {
        ViewState {
            group: String::from(FRONTPAGE),
            sort: Sort::Top,
            page: 1,
        }
    }
}

impl ViewState {
    pub fn is_frontpage(&self) -> bool {
        self.group == FRONTPAGE
    }

    pub fn select_group(self, group: String) -> ViewState {
        ViewState {
            group,
            page: 1,
            ..self
        }
    }

    pub fn back_to_frontpage(self) -> ViewState {
        self.select_group(String::from(FRONTPAGE))
    }

    pub fn set_sort(self, sort: Sort) -> ViewState {
        ViewState {
            sort,
            page: 1,
            ..self
        }
    }

    pub fn next_page(self) -> ViewState {
        ViewState {
            page: self.page + 1,
            ..self
        }
    }

    pub fn previous_page(self) -> ViewState {
        ViewState {
            page: self.page.saturating_sub(1).max(1),
            ..self
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// A full page means there may be more posts after it
    pub fn has_next_page(&self, received: usize) -> bool {
        received == POSTS_PER_PAGE as usize
    }

    pub fn posts_query(&self) -> PostsQuery {
        PostsQuery {
            group: self.group.clone(),
            sort: self.sort,
            page: self.page,
            limit: POSTS_PER_PAGE,
        }
    }
}

/// Normalize what was typed in the user search box, None meaning that no
/// search should happen and the results be hidden
pub fn user_search_query(input: &str) -> Option<String> {
    let query = input.trim().to_lowercase();
    (!query.is_empty()).then(|| query)
}

/// Results of the user search box
///
/// Answers can arrive in any order, only the one for the latest query is
/// ever displayed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserSearch {
    latest: Option<String>,
    results: Vec<UserSummary>,
}

impl UserSearch {
    pub fn new() -> UserSearch {
        UserSearch::default()
    }

    /// Record new input, returning the query to send, if any
    pub fn input(&mut self, input: &str) -> Option<String> {
        self.latest = user_search_query(input);
        if self.latest.is_none() {
            self.results.clear();
        }
        self.latest.clone()
    }

    /// Record the answer to `query`, returning whether it got displayed
    pub fn finish(&mut self, query: &str, res: Result<Vec<UserSummary>, Error>) -> bool {
        if self.latest.as_deref() != Some(query) {
            tracing::debug!(%query, "dropping results of an outdated user search");
            return false;
        }
        self.results = match res {
            Ok(users) => users,
            Err(err) => {
                tracing::error!(%err, %query, "failed searching users");
                Vec::new()
            }
        };
        true
    }

    pub fn results(&self) -> &[UserSummary] {
        &self.results
    }
}
