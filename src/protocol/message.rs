//! Demo message exchanged by the client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed record carried in a frame body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "IntProperty")]
    pub int_property: i32,
    #[serde(rename = "StringProperty")]
    pub string_property: String,
}

impl Message {
    pub fn new(int_property: i32, string_property: impl Into<String>) -> Self {
        Self {
            int_property,
            string_property: string_property.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message(IntProperty={}, StringProperty=\"{}\")",
            self.int_property, self.string_property
        )
    }
}
