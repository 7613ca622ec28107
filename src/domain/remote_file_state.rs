use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteFileState {
    Unspecified,
    Processing,
    Active,
    Failed,
}

impl RemoteFileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteFileState::Unspecified => "STATE_UNSPECIFIED",
            RemoteFileState::Processing => "PROCESSING",
            RemoteFileState::Active => "ACTIVE",
            RemoteFileState::Failed => "FAILED",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RemoteFileState::Processing)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RemoteFileState::Failed)
    }
}

impl FromStr for RemoteFileState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STATE_UNSPECIFIED" => Ok(RemoteFileState::Unspecified),
            "PROCESSING" => Ok(RemoteFileState::Processing),
            "ACTIVE" => Ok(RemoteFileState::Active),
            "FAILED" => Ok(RemoteFileState::Failed),
            _ => Err(format!("Invalid remote file state: {}", s)),
        }
    }
}

impl fmt::Display for RemoteFileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
