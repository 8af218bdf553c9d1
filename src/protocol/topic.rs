// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topic layout: `units/<unit id>/<direction>/<name>`.

use std::fmt;

use crate::command::ActionName;
use crate::error::ProtocolError;
use crate::types::UnitId;

/// First segment of every unit topic.
pub const TOPIC_ROOT: &str = "units";

/// Number of segments in a unit topic.
pub const TOPIC_SEGMENTS: usize = 4;

/// Which way a message travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Unit to client: status and sensor events.
    Unit,
    /// Client to unit: commands.
    App,
}

impl Direction {
    /// Returns the topic segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::App => "app",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "unit" => Some(Self::Unit),
            "app" => Some(Self::App),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription filter for every event of `unit`: `units/<id>/unit/+`.
#[must_use]
pub fn event_filter(unit: &UnitId) -> String {
    format!("{TOPIC_ROOT}/{unit}/{}/+", Direction::Unit)
}

/// Publish topic for `action`: `units/<id>/app/<action>`.
#[must_use]
pub fn action_topic(unit: &UnitId, action: ActionName) -> String {
    format!("{TOPIC_ROOT}/{unit}/{}/{action}", Direction::App)
}

/// A topic split into its four segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTopic<'a> {
    /// First segment, normally `units`.
    pub root: &'a str,
    /// Unit identifier segment (not validated).
    pub unit_id: &'a str,
    /// Direction segment, `None` if neither `unit` nor `app`.
    pub direction: Option<Direction>,
    /// Event or action name.
    pub name: &'a str,
}

impl<'a> ParsedTopic<'a> {
    /// Splits `topic` on `/`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::MalformedTopic` unless there are exactly 4
    /// segments.
    pub fn parse(topic: &'a str) -> Result<Self, ProtocolError> {
        let parts: Vec<&str> = topic.split('/').collect();
        match *parts.as_slice() {
            [root, unit_id, direction, name] => Ok(Self {
                root,
                unit_id,
                direction: Direction::from_segment(direction),
                name,
            }),
            _ => Err(ProtocolError::MalformedTopic {
                topic: topic.to_string(),
                segments: parts.len(),
            }),
        }
    }

    /// Returns `true` if this is an event topic of `unit`.
    #[must_use]
    pub fn is_event_of(&self, unit: &UnitId) -> bool {
        self.root == TOPIC_ROOT
            && self.unit_id == unit.as_str()
            && self.direction == Some(Direction::Unit)
    }
}
