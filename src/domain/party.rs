use serde::{Deserialize, Serialize};

/// Who the invoice is addressed to. Display text only.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub name: String,
    pub company: String,
    pub location: String,
}

/// Who gets paid. Display text only.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayeeInfo {
    pub name: String,
    pub agency: String,
    pub location: String,
}
