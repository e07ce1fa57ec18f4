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

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ExpanderConfig;
use crate::error::LayoutError;
use crate::ui::{point_f::PointF, quad_f::QuadF, size_f::SizeF, widget::SlotView};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridArrangement {
    pub columns: u32,
    pub cell_size: SizeF,
    pub spacing: f32,
}

impl GridArrangement {
    pub fn new(columns: u32, cell_size: SizeF, spacing: f32) -> Self {
        Self {
            columns,
            cell_size,
            spacing,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.columns > 0 && !self.cell_size.is_empty() && self.spacing >= 0.0
    }

    pub fn rows_for(&self, count: usize) -> u32 {
        let columns = self.columns.max(1) as usize;
        count.div_ceil(columns) as u32
    }

    pub fn row_height(&self) -> f32 {
        self.cell_size.h + self.spacing
    }

    pub fn width(&self) -> f32 {
        self.columns as f32 * (self.cell_size.w + self.spacing)
    }

    pub fn cell_frame(&self, origin: PointF, index: usize) -> QuadF {
        let columns = self.columns.max(1) as usize;
        let column = (index % columns) as f32;
        let row = (index / columns) as f32;
        QuadF::new(
            origin.x + column * (self.cell_size.w + self.spacing),
            origin.y + row * self.row_height(),
            self.cell_size.w,
            self.cell_size.h,
        )
    }
}

/// Paging structure that only exists while the expanded layout is shown.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollPanel {
    pub viewport: QuadF,
    pub row_height: f32,
    pub total_rows: u32,
    pub visible_rows: u32,
    pub first_row: u32,
}

impl ScrollPanel {
    pub fn new(origin: PointF, grid: &GridArrangement, slot_count: usize, visible_rows: u32) -> Self {
        let total_rows = grid.rows_for(slot_count);
        let visible_rows = visible_rows.min(total_rows).max(1);
        Self {
            viewport: QuadF::from_parts(
                origin,
                SizeF::new(grid.width(), visible_rows as f32 * grid.row_height()),
            ),
            row_height: grid.row_height(),
            total_rows,
            visible_rows,
            first_row: 0,
        }
    }

    pub fn content_height(&self) -> f32 {
        self.total_rows as f32 * self.row_height
    }

    pub fn max_first_row(&self) -> u32 {
        self.total_rows.saturating_sub(self.visible_rows)
    }

    pub fn scroll_to_row(&mut self, row: u32) -> u32 {
        self.first_row = row.min(self.max_first_row());
        self.first_row
    }

    pub fn scroll_by(&mut self, rows: i32) -> u32 {
        let target = (self.first_row as i64 + rows as i64).clamp(0, self.max_first_row() as i64);
        self.scroll_to_row(target as u32)
    }

    pub fn visible_row_range(&self) -> Range<u32> {
        self.first_row..(self.first_row + self.visible_rows).min(self.total_rows)
    }
}

/// The geometry fields of a container panel, all present.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelGeometry {
    pub grid: GridArrangement,
    pub container_position: PointF,
    pub title_position: PointF,
    pub subtitle_position: PointF,
    pub close_button_position: PointF,
}

/// Host-side display of one container. Geometry fields stay `None` until the host has
/// finished building the panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainerPanel {
    pub grid: Option<GridArrangement>,
    pub container_position: Option<PointF>,
    pub title_position: Option<PointF>,
    pub subtitle_position: Option<PointF>,
    pub close_button_position: Option<PointF>,
    pub views: Vec<SlotView>,
    pub scroll: Option<ScrollPanel>,
}

impl ContainerPanel {
    pub fn new(geometry: PanelGeometry, views: Vec<SlotView>) -> Self {
        let mut panel = ContainerPanel {
            views,
            ..ContainerPanel::default()
        };
        panel.set_geometry(&geometry);
        panel
    }

    pub fn geometry(&self) -> Result<PanelGeometry, LayoutError> {
        Ok(PanelGeometry {
            grid: self.grid.ok_or(LayoutError::MissingGeometry("grid"))?,
            container_position: self
                .container_position
                .ok_or(LayoutError::MissingGeometry("container_position"))?,
            title_position: self
                .title_position
                .ok_or(LayoutError::MissingGeometry("title_position"))?,
            subtitle_position: self
                .subtitle_position
                .ok_or(LayoutError::MissingGeometry("subtitle_position"))?,
            close_button_position: self
                .close_button_position
                .ok_or(LayoutError::MissingGeometry("close_button_position"))?,
        })
    }

    pub fn set_geometry(&mut self, geometry: &PanelGeometry) {
        self.grid = Some(geometry.grid);
        self.container_position = Some(geometry.container_position);
        self.title_position = Some(geometry.title_position);
        self.subtitle_position = Some(geometry.subtitle_position);
        self.close_button_position = Some(geometry.close_button_position);
    }
}

/// Pristine panel state captured before anything was expanded.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSnapshot {
    pub geometry: PanelGeometry,
    pub views: Vec<SlotView>,
}

impl LayoutSnapshot {
    pub fn capture(panel: &ContainerPanel) -> Result<Self, LayoutError> {
        let geometry = panel.geometry()?;
        if !geometry.grid.is_valid() {
            return Err(LayoutError::MissingGeometry("grid"));
        }
        trace!(views = panel.views.len(), "captured pristine layout");
        Ok(Self {
            geometry,
            views: panel.views.clone(),
        })
    }

    pub fn restore(&self, panel: &mut ContainerPanel) {
        panel.set_geometry(&self.geometry);
        if panel.scroll.take().is_some() {
            trace!("detached scroll panel");
        }
        panel.views = self.views.clone();
    }
}

/// Moves the panel into its expanded arrangement.
///
/// Each field is only changed while it still equals its pristine value, so showing the
/// expanded container twice in a row does not shift anything a second time.
pub fn apply_expanded_layout(
    panel: &mut ContainerPanel,
    pristine: &PanelGeometry,
    config: &ExpanderConfig,
    slot_count: usize,
) -> Result<PanelGeometry, LayoutError> {
    let current = panel.geometry()?;
    let mut next = current;

    if current.grid.columns == pristine.grid.columns {
        next.grid.columns = config.expanded_columns;
    }
    if current.container_position == pristine.container_position {
        next.container_position = current.container_position.offset(config.container_offset);
    }
    if current.title_position == pristine.title_position {
        next.title_position = current.title_position.offset(config.title_offset);
    }
    if current.subtitle_position == pristine.subtitle_position {
        next.subtitle_position = current.subtitle_position.offset(config.subtitle_offset);
    }
    if current.close_button_position == pristine.close_button_position {
        next.close_button_position = current.close_button_position.offset(config.close_button_offset);
    }

    panel.set_geometry(&next);
    let total_rows = next.grid.rows_for(slot_count);
    if panel.scroll.is_none_or(|scroll| scroll.total_rows != total_rows) {
        panel.scroll = Some(ScrollPanel::new(
            next.container_position,
            &next.grid,
            slot_count,
            config.scroll_viewport_rows,
        ));
    }

    for (index, view) in panel.views.iter_mut().enumerate() {
        if view.displayed {
            view.frame = next.grid.cell_frame(next.container_position, index);
        }
    }

    debug!(columns = next.grid.columns, slots = slot_count, "applied expanded layout");
    Ok(next)
}
