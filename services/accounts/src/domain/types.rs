use chrono::{DateTime, Utc};
use uuid::Uuid;

use orzu_domain::account::{AuthStatus, AuthType};

/// Verification code length in characters.
pub const VERIFY_CODE_LEN: usize = 4;

/// Verification code time-to-live in seconds.
pub const VERIFY_CODE_TTL_SECS: i64 = 300;

/// Minimum accepted secret (password) length.
pub const MIN_SECRET_LEN: usize = 8;

/// The contact channel an account registered and verifies through.
/// Exactly one per account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactIdentity {
    Email(String),
    Phone(String),
}

impl ContactIdentity {
    /// Classify a raw identity string as email or international phone number.
    /// Returns `None` for anything that is neither.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(digits) = raw.strip_prefix('+') {
            if (9..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
                return Some(Self::Phone(raw.to_owned()));
            }
            return None;
        }
        let (local, domain) = raw.split_once('@')?;
        if local.is_empty() || domain.is_empty() {
            return None;
        }
        if !domain.contains('.') || raw.chars().any(char::is_whitespace) || domain.contains('@') {
            return None;
        }
        Some(Self::Email(raw.to_owned()))
    }

    pub fn auth_type(&self) -> AuthType {
        match self {
            Self::Email(_) => AuthType::ViaEmail,
            Self::Phone(_) => AuthType::ViaPhone,
        }
    }

    /// The raw destination string codes are delivered to.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(s) | Self::Phone(s) => s,
        }
    }
}

/// An account as the use cases see it.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub contact: ContactIdentity,
    pub auth_status: AuthStatus,
    /// Argon2id PHC string; absent until the first password reset.
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// A fresh account in `New` status with no profile yet.
    pub fn new(contact: ContactIdentity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            contact,
            auth_status: AuthStatus::New,
            password_hash: None,
            first_name: None,
            last_name: None,
            username: None,
            photo: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn auth_type(&self) -> AuthType {
        self.contact.auth_type()
    }
}

/// One-time verification code bound to an account's contact channel.
#[derive(Debug, Clone)]
pub struct VerifyCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl VerifyCode {
    /// Active = unconfirmed and not yet past its expiration instant.
    /// A code expiring at T is still active at T and inactive at T+1.
    pub fn is_active(&self) -> bool {
        !self.is_confirmed && self.expires_at >= Utc::now()
    }
}
