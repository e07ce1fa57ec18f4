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

use tracing::{debug, error, info, warn};

use crate::config::ExpanderConfig;
use crate::error::{EngineError, LayoutError, SyncError};
use crate::items::{
    container::{Container, ContainerId},
    expansion::{self, ExpansionLedger, ExpansionReport},
};
use crate::ui::{
    layout::{self, ContainerPanel, LayoutSnapshot},
    view_sync::{self, SyncReport},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Unopened,
    PristineCaptured,
    Bound,
    Displayed { expanded: bool },
    Restored,
}

impl LifecycleState {
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;

        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Unopened, PristineCaptured)
                | (Unopened, Displayed { expanded: false })
                | (Restored, PristineCaptured)
                | (Restored, Displayed { expanded: false })
                | (PristineCaptured, Bound)
                | (PristineCaptured, Displayed { expanded: false })
                | (Bound, Displayed { .. })
                | (Bound, Restored)
                | (Displayed { expanded: true }, Bound)
                | (Displayed { expanded: false }, PristineCaptured)
                | (Displayed { .. }, Restored)
        )
    }
}

/// State that lives for as long as the host process and is handed to every engine call.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    pub ledger: ExpansionLedger,
    pub snapshot: Option<LayoutSnapshot>,
    /// Container whose views are fully bound in the current display session.
    pub synced: Option<ContainerId>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DisplayOutcome {
    PassThrough,
    Expanded {
        expansion: ExpansionReport,
        sync: SyncReport,
    },
    Skipped(EngineError),
}

#[derive(Debug)]
pub struct LifecycleController {
    config: ExpanderConfig,
    context: SessionContext,
    state: LifecycleState,
    displayed: Option<ContainerId>,
}

impl LifecycleController {
    pub fn new(config: ExpanderConfig) -> Self {
        Self {
            config,
            context: SessionContext::default(),
            state: LifecycleState::Unopened,
            displayed: None,
        }
    }

    pub fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn displayed(&self) -> Option<ContainerId> {
        self.displayed
    }

    pub fn is_target(&self, container: &Container) -> bool {
        self.config.matches_target(&container.name)
    }

    /// Backend-only expansion when the host constructs a container. No view exists yet.
    pub fn on_container_created(&mut self, container: &mut Container) -> Option<ExpansionReport> {
        if !self.is_target(container) {
            return None;
        }

        match expansion::expand(
            container,
            self.config.target_capacity,
            self.config.max_capacity,
            &mut self.context.ledger,
        ) {
            Ok(report) => {
                info!(container = %container.id, len = container.len(), "expanded on creation");
                Some(report)
            }
            Err(e) => {
                error!(container = %container.id, error = %e, "expansion on creation failed");
                None
            }
        }
    }

    pub fn on_display(&mut self, container: &mut Container, panel: &mut ContainerPanel) -> DisplayOutcome {
        self.displayed = Some(container.id);

        if !self.is_target(container) {
            if self.state != LifecycleState::Unopened {
                self.restore(panel);
            }
            if let Err(e) = self.ensure_snapshot(panel) {
                warn!(container = %container.id, error = %e, "panel not ready, pristine layout not captured");
            }
            self.transition(LifecycleState::Displayed { expanded: false });
            return DisplayOutcome::PassThrough;
        }

        if let Err(e) = self.ensure_snapshot(panel) {
            error!(container = %container.id, error = %e, "cannot expand panel without a pristine layout");
            self.transition(LifecycleState::Displayed { expanded: false });
            return DisplayOutcome::Skipped(e);
        }

        self.transition(LifecycleState::Bound);
        match self.expand_and_bind(container, panel) {
            Ok((expansion, sync)) => {
                self.transition(LifecycleState::Displayed { expanded: true });
                DisplayOutcome::Expanded { expansion, sync }
            }
            Err(e) => {
                error!(container = %container.id, error = %e, "expanded display skipped");
                self.transition(LifecycleState::Displayed { expanded: false });
                DisplayOutcome::Skipped(e)
            }
        }
    }

    pub fn on_close(&mut self, panel: &mut ContainerPanel) {
        if let Some(id) = self.displayed.take() {
            debug!(container = %id, "display closed");
        }
        self.restore(panel);
    }

    /// Puts the panel back the way it was captured. Safe without a snapshot and safe when
    /// nothing was ever expanded.
    pub fn restore(&mut self, panel: &mut ContainerPanel) -> bool {
        self.context.synced = None;

        let restored = match &self.context.snapshot {
            Some(snapshot) => {
                snapshot.restore(panel);
                true
            }
            None => {
                debug!("no pristine layout captured, nothing to restore");
                false
            }
        };

        if self.state != LifecycleState::Unopened {
            self.transition(LifecycleState::Restored);
        }
        restored
    }

    fn ensure_snapshot(&mut self, panel: &ContainerPanel) -> Result<(), EngineError> {
        if self.context.snapshot.is_none() {
            self.context.snapshot = Some(LayoutSnapshot::capture(panel)?);
            info!("captured pristine container layout");
        }

        if matches!(
            self.state,
            LifecycleState::Unopened
                | LifecycleState::Restored
                | LifecycleState::Displayed { expanded: false }
        ) {
            self.transition(LifecycleState::PristineCaptured);
        }
        Ok(())
    }

    fn expand_and_bind(
        &mut self,
        container: &mut Container,
        panel: &mut ContainerPanel,
    ) -> Result<(ExpansionReport, SyncReport), EngineError> {
        let pristine = self
            .context
            .snapshot
            .as_ref()
            .map(|snapshot| snapshot.geometry)
            .ok_or(LayoutError::MissingGeometry("snapshot"))?;
        panel.geometry()?;
        if panel.views.first().is_none() {
            return Err(SyncError::MissingTemplate.into());
        }

        let expansion = expansion::expand(
            container,
            self.config.target_capacity,
            self.config.max_capacity,
            &mut self.context.ledger,
        )?;
        let sync = view_sync::sync(container, &mut panel.views, &mut self.context.synced)?;
        layout::apply_expanded_layout(panel, &pristine, &self.config, container.len())?;

        Ok((expansion, sync))
    }

    fn transition(&mut self, next: LifecycleState) -> bool {
        if !self.state.can_transition_to(next) {
            error!(from = ?self.state, to = ?next, "rejected lifecycle transition");
            return false;
        }
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "lifecycle transition");
            self.state = next;
        }
        true
    }
}
