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

//! Grows one designated storage container far past its built-in slot count, keeps its
//! slot views bound index-for-index, and puts the display back the way it found it when
//! any other container is shown.

pub mod config;
pub mod error;
pub mod items;
pub mod session;
pub mod ui;

pub use config::ExpanderConfig;
pub use error::{ConfigError, EngineError, ExpandError, LayoutError, SlotError, SyncError};
pub use items::{
    base_item::{InstanceId, ItemStack},
    container::{Container, ContainerId},
    expansion::{ExpansionLedger, ExpansionReport, expand, repair_duplicate_instances},
    sibling_group::{GroupArena, GroupId, SiblingGroup},
    slot::{OwnerId, Slot, SlotId, SlotLocks},
};
pub use session::{DisplayOutcome, LifecycleController, LifecycleState, SessionContext};
pub use ui::{
    layout::{ContainerPanel, GridArrangement, LayoutSnapshot, PanelGeometry, ScrollPanel, apply_expanded_layout},
    point_f::PointF,
    quad_f::QuadF,
    size_f::SizeF,
    view_sync::{SyncReport, refresh_views, sync},
    widget::{SlotView, ViewContent},
};
