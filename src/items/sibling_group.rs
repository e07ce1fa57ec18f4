// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use serde::{Deserialize, Serialize};

use crate::items::slot::SlotId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub usize);

/// Every slot of one container, in index order. Slots that share a group evaluate their
/// cross-slot rules against this list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingGroup {
    pub members: Vec<SlotId>,
}

impl SiblingGroup {
    pub fn covering(len: usize) -> Self {
        Self {
            members: (0..len).map(SlotId).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Slots point at groups by index into this arena instead of holding live references.
/// Rebuilding a group swaps one entry, so no slot can observe a half-built member list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupArena {
    groups: Vec<SiblingGroup>,
}

impl GroupArena {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn next_id(&self) -> GroupId {
        GroupId(self.groups.len())
    }

    pub fn insert(&mut self, group: SiblingGroup) -> GroupId {
        let id = self.next_id();
        self.groups.push(group);
        id
    }

    pub fn get(&self, id: GroupId) -> Option<&SiblingGroup> {
        self.groups.get(id.0)
    }

    pub fn contains(&self, id: GroupId) -> bool {
        id.0 < self.groups.len()
    }

    /// Swaps in a rebuilt group, returning the previous one.
    pub fn replace(&mut self, id: GroupId, group: SiblingGroup) -> Option<SiblingGroup> {
        self.groups
            .get_mut(id.0)
            .map(|entry| std::mem::replace(entry, group))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
