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

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SlotError;
use crate::items::{
    base_item::ItemStack,
    sibling_group::{GroupArena, GroupId, SiblingGroup},
    slot::{OwnerId, Slot, SlotId},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub u64);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container-{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub name: String,
    pub owner: Option<OwnerId>,
    pub(crate) slots: Vec<Slot>,
    pub(crate) declared_capacity: usize,
    pub(crate) groups: GroupArena,
    pub(crate) group: Option<GroupId>,
}

impl Container {
    pub fn new(id: ContainerId, name: &str, owner: Option<OwnerId>, capacity: usize) -> Self {
        let mut groups = GroupArena::new();
        let group = groups.insert(SiblingGroup::covering(capacity));
        let slots = (0..capacity)
            .map(|i| Slot {
                group: Some(group),
                ..Slot::empty(SlotId(i), owner)
            })
            .collect();

        Self {
            id,
            name: String::from(name),
            owner,
            slots,
            declared_capacity: capacity,
            groups,
            group: Some(group),
        }
    }

    /// Adopts slots exactly as the host handed them over. Nothing is normalised here:
    /// group references may be missing or stale and instances may be aliased until the
    /// container goes through expansion.
    pub fn from_parts(
        id: ContainerId,
        name: &str,
        owner: Option<OwnerId>,
        mut slots: Vec<Slot>,
        declared_capacity: usize,
    ) -> Self {
        for (i, slot) in slots.iter_mut().enumerate() {
            slot.id = SlotId(i);
        }

        Self {
            id,
            name: String::from(name),
            owner,
            slots,
            declared_capacity,
            groups: GroupArena::new(),
            group: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn declared_capacity(&self) -> usize {
        self.declared_capacity
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group
    }

    pub fn groups(&self) -> &GroupArena {
        &self.groups
    }

    pub fn group_members(&self) -> Option<&[SlotId]> {
        self.group
            .and_then(|id| self.groups.get(id))
            .map(|group| group.members.as_slice())
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    pub fn position_of(&self, stack: &ItemStack) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.stack
                .as_ref()
                .is_some_and(|held| held.instance == stack.instance)
        })
    }

    pub fn put(&mut self, index: usize, stack: ItemStack) -> Result<(), SlotError> {
        if let Some(existing) = self.position_of(&stack) {
            return Err(SlotError::DuplicateInstance {
                instance: stack.instance,
                index: existing,
            });
        }

        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SlotError::OutOfRange { index, len })?;

        if slot.is_add_locked() {
            return Err(SlotError::Locked { index });
        }
        if !slot.is_empty() {
            return Err(SlotError::Occupied { index });
        }

        slot.stack = Some(stack);
        Ok(())
    }

    pub fn take(&mut self, index: usize) -> Result<ItemStack, SlotError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SlotError::OutOfRange { index, len })?;

        if slot.is_removal_locked() {
            return Err(SlotError::Locked { index });
        }

        slot.clear().ok_or(SlotError::Empty { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::base_item::InstanceId;

    fn chest(capacity: usize) -> Container {
        Container::new(ContainerId(1), "Chest", Some(OwnerId(9)), capacity)
    }

    #[test]
    fn new_container_has_one_group_over_every_slot() {
        let container = chest(6);

        assert_eq!(container.len(), 6);
        assert_eq!(container.declared_capacity(), 6);
        assert_eq!(container.group_members().map(|m| m.len()), Some(6));
        assert!(container.slots().iter().all(|s| s.group == container.group_id()));
        assert!(container.slots().iter().all(|s| s.owner == Some(OwnerId(9))));
    }

    #[test]
    fn put_respects_locks_and_occupancy() {
        let mut container = chest(3);
        container.put(0, ItemStack::new(InstanceId(1), "soil", 10)).unwrap();

        assert_eq!(
            container.put(0, ItemStack::new(InstanceId(2), "seed", 1)),
            Err(SlotError::Occupied { index: 0 })
        );

        container.slot_mut(1).unwrap().set_add_locked(true);
        assert_eq!(
            container.put(1, ItemStack::new(InstanceId(2), "seed", 1)),
            Err(SlotError::Locked { index: 1 })
        );

        assert_eq!(
            container.put(7, ItemStack::new(InstanceId(2), "seed", 1)),
            Err(SlotError::OutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn put_refuses_an_instance_already_stored() {
        let mut container = chest(3);
        container.put(0, ItemStack::new(InstanceId(5), "soil", 10)).unwrap();

        let err = container
            .put(2, ItemStack::new(InstanceId(5), "soil", 10))
            .unwrap_err();

        assert_eq!(err, SlotError::DuplicateInstance { instance: InstanceId(5), index: 0 });
        assert_eq!(container.occupied_count(), 1);
    }

    #[test]
    fn take_respects_removal_lock() {
        let mut container = chest(2);
        container.put(1, ItemStack::new(InstanceId(3), "ore", 4)).unwrap();
        container.slot_mut(1).unwrap().set_removal_locked(true);

        assert_eq!(container.take(1), Err(SlotError::Locked { index: 1 }));

        container.slot_mut(1).unwrap().set_removal_locked(false);
        assert_eq!(container.take(1).map(|s| s.quantity), Ok(4));
        assert_eq!(container.take(1), Err(SlotError::Empty { index: 1 }));
    }

    #[test]
    fn from_parts_renumbers_slots_by_position() {
        let slots = vec![Slot::empty(SlotId(40), None), Slot::empty(SlotId(2), None)];
        let container = Container::from_parts(ContainerId(2), "Crate", None, slots, 2);

        assert_eq!(container.slot(0).map(|s| s.id), Some(SlotId(0)));
        assert_eq!(container.slot(1).map(|s| s.id), Some(SlotId(1)));
        assert!(container.group_members().is_none());
    }
}
