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

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::error::ExpandError;
use crate::items::{
    base_item::InstanceId,
    container::{Container, ContainerId},
    sibling_group::SiblingGroup,
    slot::{Slot, SlotId},
};

/// Remembers which containers have already been grown during this process.
#[derive(Clone, Debug, Default)]
pub struct ExpansionLedger {
    expanded: HashSet<ContainerId>,
}

impl ExpansionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: ContainerId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn mark(&mut self, id: ContainerId) {
        self.expanded.insert(id);
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    pub appended: usize,
    pub repaired: usize,
    pub degraded: bool,
    pub skipped: bool,
}

impl ExpansionReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

/// Grows `container` to `target_capacity` slots.
///
/// Existing slots keep their contents and locks; new slots are appended empty. The sibling
/// group is rebuilt over the full population and every slot is pointed at it, then any
/// aliased item instance is cleared from all but its first slot. Nothing is written to the
/// container until the new slot list and group are fully built.
///
/// Calling it again for a container the ledger already knows, with a target it already
/// meets, does nothing.
pub fn expand(
    container: &mut Container,
    target_capacity: usize,
    max_capacity: usize,
    ledger: &mut ExpansionLedger,
) -> Result<ExpansionReport, ExpandError> {
    if target_capacity == 0 || target_capacity > max_capacity {
        return Err(ExpandError::CapacityOutOfRange {
            requested: target_capacity,
            max: max_capacity,
        });
    }

    let id = container.id;
    if ledger.is_expanded(id) && container.len() >= target_capacity {
        trace!(container = %id, len = container.len(), "already expanded");
        return Ok(ExpansionReport::skipped());
    }

    let mut report = ExpansionReport::default();

    let owner = match container.slots.first() {
        Some(template) => template.owner,
        None => {
            warn!(container = %id, "no template slot to copy ownership from, appending ownerless slots");
            report.degraded = true;
            None
        }
    };

    let new_len = container
        .len()
        .max(target_capacity)
        .max(container.declared_capacity);

    let group_id = container
        .group
        .filter(|gid| container.groups.contains(*gid))
        .unwrap_or_else(|| container.groups.next_id());

    let mut slots = Vec::with_capacity(new_len);
    slots.extend(container.slots.iter().cloned());
    for i in container.len()..new_len {
        slots.push(Slot::empty(SlotId(i), owner));
    }
    report.appended = new_len - container.len();

    for slot in &mut slots {
        slot.group = Some(group_id);
    }
    let group = SiblingGroup::covering(slots.len());

    report.repaired = repair_duplicate_instances(id, &mut slots);

    if container.groups.replace(group_id, group.clone()).is_none() {
        debug!(container = %id, "created sibling group");
        container.groups.insert(group);
    }
    container.group = Some(group_id);
    container.slots = slots;
    container.declared_capacity = container.declared_capacity.max(target_capacity);
    ledger.mark(id);

    debug!(
        container = %id,
        len = container.len(),
        appended = report.appended,
        repaired = report.repaired,
        "expanded container"
    );

    Ok(report)
}

/// Clears every slot whose item instance was already seen in an earlier slot.
/// Returns how many slots were cleared.
pub fn repair_duplicate_instances(container: ContainerId, slots: &mut [Slot]) -> usize {
    let mut seen: HashSet<InstanceId> = HashSet::new();
    let mut repaired = 0;

    for (index, slot) in slots.iter_mut().enumerate() {
        let Some(stack) = &slot.stack else {
            continue;
        };
        if !seen.insert(stack.instance) {
            warn!(
                %container,
                slot = index,
                instance = %stack.instance,
                "cleared duplicate item instance"
            );
            slot.stack = None;
            repaired += 1;
        }
    }

    repaired
}
