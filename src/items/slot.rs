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

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::items::{base_item::ItemStack, sibling_group::GroupId};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SlotLocks: u8 {
        const ADD     = 0b01;
        const REMOVAL = 0b10;
    }
}

/// Position of a slot inside its container. Slots are only ever appended, so the index
/// doubles as the slot's identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub stack: Option<ItemStack>,
    pub locks: SlotLocks,
    pub owner: Option<OwnerId>,
    pub group: Option<GroupId>,
}

impl Slot {
    pub fn empty(id: SlotId, owner: Option<OwnerId>) -> Self {
        Self {
            id,
            stack: None,
            locks: SlotLocks::empty(),
            owner,
            group: None,
        }
    }

    pub fn with_stack(id: SlotId, stack: ItemStack) -> Self {
        Self {
            stack: Some(stack),
            ..Slot::empty(id, None)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_none()
    }

    pub fn is_add_locked(&self) -> bool {
        self.locks.contains(SlotLocks::ADD)
    }

    pub fn is_removal_locked(&self) -> bool {
        self.locks.contains(SlotLocks::REMOVAL)
    }

    pub fn set_add_locked(&mut self, locked: bool) {
        self.locks.set(SlotLocks::ADD, locked);
    }

    pub fn set_removal_locked(&mut self, locked: bool) {
        self.locks.set(SlotLocks::REMOVAL, locked);
    }

    pub fn clear(&mut self) -> Option<ItemStack> {
        self.stack.take()
    }
}
