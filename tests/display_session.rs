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

use chest_expander::{
    Container, ContainerId, ContainerPanel, DisplayOutcome, EngineError, ExpanderConfig, GridArrangement,
    InstanceId, ItemStack, LayoutError, LifecycleController, LifecycleState, OwnerId, PanelGeometry, PointF,
    SizeF, SlotView, ViewContent,
};
use pretty_assertions::assert_eq;

const CHEST_SLOTS: usize = 36;

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn pristine_geometry() -> PanelGeometry {
    PanelGeometry {
        grid: GridArrangement::new(12, SizeF::new(64.0, 64.0), 0.0),
        container_position: PointF::new(384.0, 280.0),
        title_position: PointF::new(384.0, 232.0),
        subtitle_position: PointF::new(384.0, 256.0),
        close_button_position: PointF::new(1152.0, 232.0),
    }
}

fn pristine_views() -> Vec<SlotView> {
    let geometry = pristine_geometry();
    (0..CHEST_SLOTS)
        .map(|i| SlotView::new(&format!("slot{i}"), geometry.grid.cell_frame(geometry.container_position, i)))
        .collect()
}

fn panel() -> ContainerPanel {
    ContainerPanel::new(pristine_geometry(), pristine_views())
}

fn target_chest() -> Container {
    let mut chest = Container::new(ContainerId(1), "Expanded Chest", Some(OwnerId(7)), 6);
    chest.put(0, ItemStack::new(InstanceId(1), "soil", 10)).unwrap();
    chest
}

fn other_chest() -> Container {
    Container::new(ContainerId(2), "Chest", Some(OwnerId(7)), CHEST_SLOTS)
}

#[test]
fn creation_expands_the_target_backend_only() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    let mut other = other_chest();

    let report = controller.on_container_created(&mut target).unwrap();

    assert_eq!(report.appended, 494);
    assert_eq!(target.len(), 500);
    assert_eq!(target.group_members().map(|m| m.len()), Some(500));
    assert_eq!(
        target.slot(0).and_then(|s| s.stack.clone()),
        Some(ItemStack::new(InstanceId(1), "soil", 10))
    );
    assert!(target.slots()[6..].iter().all(|s| s.is_empty()));

    assert!(controller.on_container_created(&mut other).is_none());
    assert_eq!(other.len(), CHEST_SLOTS);
    assert_eq!(controller.state(), LifecycleState::Unopened);
}

#[test]
fn displaying_the_target_binds_every_slot() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    let mut panel = panel();

    let outcome = controller.on_display(&mut target, &mut panel);

    let DisplayOutcome::Expanded { expansion, sync } = outcome else {
        panic!("expected expanded display, got {outcome:?}");
    };
    assert_eq!(expansion.appended, 494);
    assert_eq!(sync.cloned, 500 - CHEST_SLOTS);
    assert_eq!(panel.views.len(), 500);
    for (i, view) in panel.views.iter().enumerate() {
        assert_eq!(view.bound_slot, Some(i));
        assert!(view.displayed);
    }
    assert_eq!(
        panel.views[0].content,
        ViewContent::Occupied { kind: String::from("soil"), quantity: 10 }
    );
    assert_eq!(panel.grid.map(|g| g.columns), Some(20));
    assert!(panel.scroll.is_some());
    assert_eq!(controller.state(), LifecycleState::Displayed { expanded: true });
}

#[test]
fn closing_restores_the_pristine_layout() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    let mut panel = panel();
    let g0 = panel.geometry().unwrap();

    controller.on_display(&mut target, &mut panel);
    let g1 = panel.geometry().unwrap();
    assert_ne!(g0, g1);

    controller.on_close(&mut panel);

    assert_eq!(panel.geometry().unwrap(), g0);
    assert!(panel.scroll.is_none());
    assert_eq!(panel.views, pristine_views());
    assert_eq!(controller.state(), LifecycleState::Restored);
    assert_eq!(controller.displayed(), None);
    assert_eq!(target.len(), 500);
}

#[test]
fn non_target_display_restores_and_passes_through() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    let mut other = other_chest();
    let mut panel = panel();

    controller.on_display(&mut target, &mut panel);
    let outcome = controller.on_display(&mut other, &mut panel);

    assert_eq!(outcome, DisplayOutcome::PassThrough);
    assert_eq!(panel.geometry().unwrap(), pristine_geometry());
    assert!(panel.scroll.is_none());
    assert_eq!(panel.views.len(), CHEST_SLOTS);
    assert_eq!(other.len(), CHEST_SLOTS);
    assert_eq!(controller.state(), LifecycleState::Displayed { expanded: false });
}

#[test]
fn snapshot_taken_from_a_non_target_is_reused() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    let mut other = other_chest();
    let mut panel = panel();

    controller.on_display(&mut other, &mut panel);
    let captured = controller.context().snapshot.clone().unwrap();
    controller.on_close(&mut panel);

    controller.on_display(&mut target, &mut panel);
    controller.on_close(&mut panel);

    assert_eq!(controller.context().snapshot.as_ref(), Some(&captured));
    assert_eq!(panel.geometry().unwrap(), captured.geometry);
}

#[test]
fn reopening_the_target_does_not_shift_twice() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    let mut panel = panel();

    controller.on_display(&mut target, &mut panel);
    let first = panel.geometry().unwrap();
    let first_names: Vec<String> = panel.views.iter().map(|v| v.name.clone()).collect();

    target.put(450, ItemStack::new(InstanceId(2), "seed", 3)).unwrap();
    let outcome = controller.on_display(&mut target, &mut panel);

    let DisplayOutcome::Expanded { expansion, sync } = outcome else {
        panic!("expected expanded display, got {outcome:?}");
    };
    assert!(expansion.skipped);
    assert!(!sync.reallocated);
    assert_eq!(panel.geometry().unwrap(), first);
    assert_eq!(panel.views.iter().map(|v| v.name.clone()).collect::<Vec<_>>(), first_names);
    assert_eq!(panel.views[450].bound_slot, Some(450));
    assert_eq!(
        panel.views[450].content,
        ViewContent::Occupied { kind: String::from("seed"), quantity: 3 }
    );
}

#[test]
fn expanded_layout_is_identical_across_sessions() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    let mut panel = panel();

    controller.on_display(&mut target, &mut panel);
    let first = panel.clone();
    controller.on_close(&mut panel);

    controller.on_display(&mut target, &mut panel);

    assert_eq!(panel, first);
    assert_eq!(target.len(), 500);
}

#[test]
fn uninitialized_panel_skips_without_mutation() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    let mut panel = ContainerPanel {
        views: pristine_views(),
        ..ContainerPanel::default()
    };
    let before = panel.clone();

    let outcome = controller.on_display(&mut target, &mut panel);

    assert_eq!(
        outcome,
        DisplayOutcome::Skipped(EngineError::Layout(LayoutError::MissingGeometry("grid")))
    );
    assert_eq!(panel, before);
    assert_eq!(target.len(), 6);
    assert!(controller.context().snapshot.is_none());

    let mut ready = self::panel();
    assert!(matches!(
        controller.on_display(&mut target, &mut ready),
        DisplayOutcome::Expanded { .. }
    ));
}

#[test]
fn empty_view_array_skips_binding() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    let mut panel = ContainerPanel::new(pristine_geometry(), Vec::new());

    let outcome = controller.on_display(&mut target, &mut panel);

    assert!(matches!(outcome, DisplayOutcome::Skipped(EngineError::Sync(_))));
    assert_eq!(target.len(), 6);
    assert_eq!(target.declared_capacity(), 6);
    assert!(!controller.context().ledger.is_expanded(target.id));
    assert!(panel.views.is_empty());
    assert_eq!(panel.geometry().unwrap(), pristine_geometry());
    assert!(panel.scroll.is_none());
}

#[test]
fn target_name_matches_regardless_of_case() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut shouting = Container::new(ContainerId(3), "EXPANDED CHEST", None, 6);

    assert!(controller.on_container_created(&mut shouting).is_some());
    assert_eq!(shouting.len(), 500);
}

#[test]
fn close_before_any_display_is_harmless() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut panel = panel();

    controller.on_close(&mut panel);

    assert_eq!(controller.state(), LifecycleState::Unopened);
    assert_eq!(panel.geometry().unwrap(), pristine_geometry());
}

#[test]
fn expanded_container_survives_json_round_trip() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut target = target_chest();
    target.slot_mut(3).unwrap().set_removal_locked(true);
    controller.on_container_created(&mut target);

    let json = serde_json::to_string(&target).unwrap();
    let restored: Container = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, target);
    assert_eq!(restored.group_members().map(|m| m.len()), Some(500));
    assert!(restored.slot(3).unwrap().is_removal_locked());
}

#[test]
fn second_target_named_container_gets_its_own_binding() {
    init_tracing();
    let mut controller = LifecycleController::new(ExpanderConfig::default());
    let mut big = Container::new(ContainerId(1), "Expanded Chest", None, 700);
    big.put(650, ItemStack::new(InstanceId(9), "gold", 99)).unwrap();
    let mut small = Container::new(ContainerId(2), "Expanded Chest", None, 6);
    let mut panel = panel();

    controller.on_display(&mut big, &mut panel);
    assert_eq!(panel.scroll.map(|s| s.total_rows), Some(35));

    let outcome = controller.on_display(&mut small, &mut panel);

    let DisplayOutcome::Expanded { sync, .. } = outcome else {
        panic!("expected expanded display, got {outcome:?}");
    };
    assert!(sync.reallocated);
    assert_eq!(small.len(), 500);
    assert_eq!(panel.views.len(), 700);
    for (i, view) in panel.views.iter().enumerate().take(500) {
        assert_eq!(view.bound_slot, Some(i));
    }
    let stale = &panel.views[650];
    assert!(!stale.displayed);
    assert_eq!(stale.bound_slot, None);
    assert_eq!(stale.content, ViewContent::Empty);
    assert_eq!(panel.scroll.map(|s| s.total_rows), Some(25));
    assert_eq!(controller.context().synced, Some(small.id));
}
