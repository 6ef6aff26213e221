use std::fmt;

use uuid::Uuid;

/// Public profile of a registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Snapshot of another user stored in a pact.
///
/// Taken when the contact is added and never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Registration request data.
#[derive(Clone, Default)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRegistration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login request data.
#[derive(Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A freshly issued bearer token together with the profile it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub verified: bool,
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub session: Session,
    pub message: String,
    /// False when the verification email could not be handed to the mail transport.
    pub verification_email_sent: bool,
}

/// Terminal states of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(Session),
    /// The account exists but its email is not verified yet.
    Unverified,
    /// Unknown email or wrong password; the two are indistinguishable.
    Invalid,
}

/// Terminal states of a verification link redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    AlreadyVerified,
    InvalidLink,
}

/// Result of adding a contact to a pact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PactAddition {
    pub user_added_id: Uuid,
    pub pact: Vec<Contact>,
}
