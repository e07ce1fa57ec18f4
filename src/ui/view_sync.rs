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

use tracing::{debug, trace};

use crate::error::SyncError;
use crate::items::container::{Container, ContainerId};
use crate::ui::widget::SlotView;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub cloned: usize,
    pub bound: usize,
    pub hidden: usize,
    pub reallocated: bool,
}

/// Makes `views` cover every slot of `container` and binds `views[i]` to slot `i`.
///
/// `views[0]` is the template: missing entries are cloned from it, never written into it.
/// The grown array is built on the side and swapped in at the end. Once `synced` names this
/// container and the array is long enough, only the displayed content is refreshed in place.
pub fn sync(
    container: &Container,
    views: &mut Vec<SlotView>,
    synced: &mut Option<ContainerId>,
) -> Result<SyncReport, SyncError> {
    let Some(template) = views.first() else {
        return Err(SyncError::MissingTemplate);
    };

    let slot_count = container.len();
    if *synced == Some(container.id) && views.len() >= slot_count {
        let bound = refresh_views(container, views);
        trace!(container = %container.id, bound, "views already synchronized, refreshed in place");
        return Ok(SyncReport {
            bound,
            ..SyncReport::default()
        });
    }

    let new_len = views.len().max(slot_count);
    let mut next: Vec<SlotView> = Vec::with_capacity(new_len);
    next.extend(views.iter().cloned());

    let mut report = SyncReport {
        reallocated: true,
        ..SyncReport::default()
    };
    for index in views.len()..new_len {
        next.push(SlotView::clone_from_template(template, index));
        report.cloned += 1;
    }

    for (index, view) in next.iter_mut().enumerate() {
        match container.slot(index) {
            Some(slot) => {
                view.bind(index);
                view.set_displayed(true);
                view.refresh(slot);
                report.bound += 1;
            }
            None => {
                view.unbind();
                view.set_displayed(false);
                report.hidden += 1;
            }
        }
    }

    *views = next;
    *synced = Some(container.id);

    debug!(
        container = %container.id,
        views = views.len(),
        cloned = report.cloned,
        hidden = report.hidden,
        "synchronized slot views"
    );

    Ok(report)
}

/// Re-mirrors every bound view from its slot without touching bindings or the array.
pub fn refresh_views(container: &Container, views: &mut [SlotView]) -> usize {
    let mut refreshed = 0;
    for view in views.iter_mut() {
        if let Some(slot) = view.bound_slot.and_then(|index| container.slot(index)) {
            view.refresh(slot);
            refreshed += 1;
        }
    }
    refreshed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{
        base_item::{InstanceId, ItemStack},
        container::ContainerId,
    };
    use crate::ui::{quad_f::QuadF, widget::ViewContent};

    fn views(count: usize) -> Vec<SlotView> {
        (0..count)
            .map(|i| SlotView::new(&format!("slot{i}"), QuadF::new(0.0, 0.0, 32.0, 32.0)))
            .collect()
    }

    fn chest(capacity: usize) -> Container {
        Container::new(ContainerId(1), "Expanded Chest", None, capacity)
    }

    #[test]
    fn empty_view_array_is_rejected_untouched() {
        let mut array = Vec::new();
        let mut synced = None;

        let result = sync(&chest(4), &mut array, &mut synced);

        assert_eq!(result, Err(SyncError::MissingTemplate));
        assert!(array.is_empty());
        assert_eq!(synced, None);
    }

    #[test]
    fn grows_by_cloning_the_template() {
        let container = chest(10);
        let mut array = views(3);
        let template_before = array[0].clone();
        let mut synced = None;

        let report = sync(&container, &mut array, &mut synced).unwrap();

        assert_eq!(report.cloned, 7);
        assert_eq!(array.len(), 10);
        assert_eq!(array[0].name, template_before.name);
        assert_eq!(array[0].frame, template_before.frame);
        assert_eq!(array[5].name, "slot0#5");
        for (i, view) in array.iter().enumerate() {
            assert_eq!(view.bound_slot, Some(i));
            assert!(view.displayed);
        }
        assert_eq!(synced, Some(container.id));
    }

    #[test]
    fn surplus_views_are_hidden() {
        let container = chest(2);
        let mut array = views(5);
        let mut synced = None;

        let report = sync(&container, &mut array, &mut synced).unwrap();

        assert_eq!(report.hidden, 3);
        assert!(array[2..].iter().all(|v| !v.displayed && v.bound_slot.is_none()));
    }

    #[test]
    fn resync_refreshes_content_without_rebinding() {
        let mut container = chest(4);
        let mut array = views(1);
        let mut synced = None;
        sync(&container, &mut array, &mut synced).unwrap();
        let names: Vec<String> = array.iter().map(|v| v.name.clone()).collect();

        container.put(2, ItemStack::new(InstanceId(8), "soil", 10)).unwrap();
        let report = sync(&container, &mut array, &mut synced).unwrap();

        assert!(!report.reallocated);
        assert_eq!(array.iter().map(|v| v.name.clone()).collect::<Vec<_>>(), names);
        assert_eq!(array[2].bound_slot, Some(2));
        assert_eq!(
            array[2].content,
            ViewContent::Occupied { kind: String::from("soil"), quantity: 10 }
        );
    }

    #[test]
    fn another_container_is_never_fast_pathed() {
        let mut big = Container::new(ContainerId(1), "Expanded Chest", None, 10);
        big.put(8, ItemStack::new(InstanceId(4), "gold", 99)).unwrap();
        let small = Container::new(ContainerId(2), "Expanded Chest", None, 3);
        let mut array = views(1);
        let mut synced = None;
        sync(&big, &mut array, &mut synced).unwrap();

        let report = sync(&small, &mut array, &mut synced).unwrap();

        assert!(report.reallocated);
        assert_eq!(report.hidden, 7);
        assert_eq!(synced, Some(small.id));
        assert!(!array[8].displayed);
        assert_eq!(array[8].bound_slot, None);
        assert_eq!(array[8].content, ViewContent::Empty);
    }
}
