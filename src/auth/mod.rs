/// Identity: user-pool sign-up/sign-in and the session cookie
///
/// Identity provisioning itself is external; this module only drives the
/// two user-pool flows the pages need and carries the resulting identity
/// per request in a signed cookie.
pub mod provider;
pub mod session;

pub use provider::{AuthTokens, IdentityProvider, SignUpOutcome, UserPoolClient};
pub use session::{clear_session, issue_session, MaybeUser, SessionUser, SESSION_COOKIE};
