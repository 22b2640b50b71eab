//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Session` is owned by the identity provider integration (`net::oidc`);
//! pages and the header only read it. Side effects flow the other way as
//! `SessionCommand` values dispatched through an `AuthHandle`, which `App`
//! creates once and passes to every route as a prop.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::types::User;

/// Provider-reported session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl Session {
    /// Initial state before the provider has reported anything. Also the
    /// state every SSR render sees.
    #[must_use]
    pub fn loading() -> Self {
        Self { is_loading: true, is_authenticated: false, user: None }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { is_loading: false, is_authenticated: false, user: None }
    }

    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self { is_loading: false, is_authenticated: true, user: Some(user) }
    }

    /// The user is still known but its access token has lapsed.
    #[must_use]
    pub fn expired(user: User) -> Self {
        Self { is_loading: false, is_authenticated: false, user: Some(user) }
    }

    /// Pick `signed_in` or `expired` from the user's expiry flag.
    #[must_use]
    pub fn from_user(user: User) -> Self {
        if user.expired { Self::expired(user) } else { Self::signed_in(user) }
    }

    /// Greeting name for the current user, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(User::display_name)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

/// Side effects the UI asks the identity provider to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    SigninRedirect,
    SignoutRedirect,
    SigninCallback,
}

/// Capability interface of the identity provider. All operations are
/// fire-and-forget: outcomes arrive later as `Session` updates.
pub trait SessionProvider {
    fn signin_redirect(&self);
    fn signout_redirect(&self);
    fn signin_callback(&self);

    fn execute(&self, command: SessionCommand) {
        match command {
            SessionCommand::SigninRedirect => self.signin_redirect(),
            SessionCommand::SignoutRedirect => self.signout_redirect(),
            SessionCommand::SigninCallback => self.signin_callback(),
        }
    }
}

/// Session signal plus the command channel into the provider.
#[derive(Clone, Copy)]
pub struct AuthHandle {
    pub session: RwSignal<Session>,
    commands: Callback<SessionCommand>,
}

impl AuthHandle {
    pub fn new<P>(session: RwSignal<Session>, provider: P) -> Self
    where
        P: SessionProvider + Send + Sync + 'static,
    {
        let commands = Callback::new(move |command: SessionCommand| provider.execute(command));
        Self { session, commands }
    }

    pub fn dispatch(&self, command: SessionCommand) {
        log::debug!("session command: {command:?}");
        self.commands.run(command);
    }
}
