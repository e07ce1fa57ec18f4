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
    Container, ContainerId, ContainerPanel, DisplayOutcome, ExpanderConfig, GridArrangement, InstanceId,
    ItemStack, LifecycleController, OwnerId, PanelGeometry, PointF, SizeF, SlotView,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CHEST_SLOTS: usize = 36;

fn load_config() -> ExpanderConfig {
    let Some(path) = std::env::args().nth(1) else {
        return ExpanderConfig::default();
    };

    match ExpanderConfig::from_path(&path) {
        Ok(config) => config,
        Err(e) => {
            error!(%path, error = %e, "failed to load config, using defaults");
            ExpanderConfig::default()
        }
    }
}

fn chest_panel() -> ContainerPanel {
    let geometry = PanelGeometry {
        grid: GridArrangement::new(12, SizeF::new(64.0, 64.0), 0.0),
        container_position: PointF::new(384.0, 280.0),
        title_position: PointF::new(384.0, 232.0),
        subtitle_position: PointF::new(384.0, 256.0),
        close_button_position: PointF::new(1152.0, 232.0),
    };
    let views = (0..DEFAULT_CHEST_SLOTS)
        .map(|i| SlotView::new(&format!("slot{i}"), geometry.grid.cell_frame(geometry.container_position, i)))
        .collect();
    ContainerPanel::new(geometry, views)
}

fn report(outcome: &DisplayOutcome, container: &Container, panel: &ContainerPanel) {
    match outcome {
        DisplayOutcome::Expanded { expansion, sync } => info!(
            container = %container.id,
            slots = container.len(),
            appended = expansion.appended,
            views = panel.views.len(),
            cloned = sync.cloned,
            scroll = panel.scroll.is_some(),
            "showing expanded container"
        ),
        DisplayOutcome::PassThrough => info!(
            container = %container.id,
            slots = container.len(),
            views = panel.views.len(),
            "showing container unchanged"
        ),
        DisplayOutcome::Skipped(e) => warn!(container = %container.id, error = %e, "expansion skipped"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config();
    let target_name = config.target_name.clone();
    let mut controller = LifecycleController::new(config);
    let mut panel = chest_panel();

    let mut target = Container::new(ContainerId(1), &target_name, Some(OwnerId(1)), DEFAULT_CHEST_SLOTS);
    let mut other = Container::new(ContainerId(2), "Chest", Some(OwnerId(1)), DEFAULT_CHEST_SLOTS);
    controller.on_container_created(&mut target);
    controller.on_container_created(&mut other);

    let outcome = controller.on_display(&mut target, &mut panel);
    report(&outcome, &target, &panel);

    if let Err(e) = target.put(480, ItemStack::new(InstanceId(1), "soil", 10)) {
        warn!(error = %e, "could not store item");
    }
    let outcome = controller.on_display(&mut target, &mut panel);
    report(&outcome, &target, &panel);

    let outcome = controller.on_display(&mut other, &mut panel);
    report(&outcome, &other, &panel);

    controller.on_close(&mut panel);
    info!(state = ?controller.state(), views = panel.views.len(), "session closed");
}
