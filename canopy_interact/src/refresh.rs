// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// What an owed authoritative redraw has to cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Refresh {
    /// The minimap content must be fetched again too.
    pub(crate) minimap: bool,
}

impl Refresh {
    pub(crate) const TREE: Self = Self { minimap: false };
    pub(crate) const TREE_AND_MINIMAP: Self = Self { minimap: true };

    /// Union of two owed refreshes.
    pub(crate) fn merge(self, other: Option<Self>) -> Self {
        Self {
            minimap: self.minimap || other.is_some_and(|o| o.minimap),
        }
    }
}
