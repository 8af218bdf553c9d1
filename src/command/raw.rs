// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unvalidated command.

use crate::command::{ActionName, Command};

/// Publishes an arbitrary value to an action topic.
///
/// The action is still restricted to [`ActionName`]; the value is sent as
/// given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    action: ActionName,
    value: String,
}

impl RawCommand {
    /// Creates a raw command.
    #[must_use]
    pub fn new(action: ActionName, value: impl Into<String>) -> Self {
        Self {
            action,
            value: value.into(),
        }
    }

    /// Returns the value that will be published.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Command for RawCommand {
    fn action(&self) -> ActionName {
        self.action
    }

    fn payload(&self) -> String {
        self.value.clone()
    }
}
