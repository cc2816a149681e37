//! Account domain types.

use serde::{Deserialize, Serialize};

/// Progress of an account through the verification lifecycle.
///
/// Wire format: `i16` (0 = New, 1 = CodeVerified, 2 = Done).
/// The only transition this service fires is New → CodeVerified, as a side
/// effect of a successful code confirmation. Done is set by profile-completion
/// logic outside this service. Status never moves backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    New = 0,
    CodeVerified = 1,
    Done = 2,
}

impl AuthStatus {
    /// Convert from `i16` wire value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::New),
            1 => Some(Self::CodeVerified),
            2 => Some(Self::Done),
            _ => None,
        }
    }

    /// Convert to `i16` wire value.
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl PartialOrd for AuthStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AuthStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_i16().cmp(&other.as_i16())
    }
}

/// Which contact channel an account registered with.
///
/// Wire format: `i16` (0 = ViaEmail, 1 = ViaPhone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    ViaEmail = 0,
    ViaPhone = 1,
}

impl AuthType {
    /// Convert from `i16` wire value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::ViaEmail),
            1 => Some(Self::ViaPhone),
            _ => None,
        }
    }

    /// Convert to `i16` wire value.
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}
