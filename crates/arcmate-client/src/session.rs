//! Client session state: login token plus repository selection.

/// At most one live session per client instance.
///
/// Repository selection is a sub-state of being logged in; every
/// transition back to logged-out discards it.
#[derive(Debug, Default)]
pub struct Session {
    login_id: Option<String>,
    repository_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active login token, if any.
    pub fn login_id(&self) -> Option<&str> {
        self.login_id.as_deref()
    }

    /// The selected repository, if one was opened this session.
    pub fn repository_id(&self) -> Option<&str> {
        self.repository_id.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.login_id.is_some()
    }

    /// Enter the logged-in state with a fresh token. Any repository
    /// selection from a previous session is discarded.
    pub fn set_token(&mut self, login_id: String) {
        self.login_id = Some(login_id);
        self.repository_id = None;
    }

    /// Record the repository selection. Ignored unless logged in.
    pub fn select_repository(&mut self, repository_id: String) {
        if self.login_id.is_some() {
            self.repository_id = Some(repository_id);
        }
    }

    /// Drop back to logged-out, discarding the repository selection too.
    pub fn clear(&mut self) {
        self.login_id = None;
        self.repository_id = None;
    }
}
