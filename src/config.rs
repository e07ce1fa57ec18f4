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

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ui::point_f::PointF;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpanderConfig {
    /// Name of the one container that gets expanded. Compared case-insensitively.
    pub target_name: String,
    pub target_capacity: usize,
    pub max_capacity: usize,
    pub expanded_columns: u32,
    pub container_offset: PointF,
    pub title_offset: PointF,
    pub subtitle_offset: PointF,
    pub close_button_offset: PointF,
    pub scroll_viewport_rows: u32,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            target_name: String::from("Expanded Chest"),
            target_capacity: 500,
            max_capacity: 4096,
            expanded_columns: 20,
            container_offset: PointF::new(-256.0, -64.0),
            title_offset: PointF::new(-256.0, -64.0),
            subtitle_offset: PointF::new(-256.0, -64.0),
            close_button_offset: PointF::new(256.0, -64.0),
            scroll_viewport_rows: 6,
        }
    }
}

impl ExpanderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ExpanderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_name.trim().is_empty() {
            return Err(ConfigError::Invalid(String::from("target_name is empty")));
        }
        if self.target_capacity == 0 || self.target_capacity > self.max_capacity {
            return Err(ConfigError::Invalid(format!(
                "target_capacity {} must be within 1..={}",
                self.target_capacity, self.max_capacity
            )));
        }
        if self.expanded_columns == 0 {
            return Err(ConfigError::Invalid(String::from("expanded_columns must be positive")));
        }
        let offsets = [
            self.container_offset,
            self.title_offset,
            self.subtitle_offset,
            self.close_button_offset,
        ];
        if offsets.iter().any(|offset| !offset.is_valid()) {
            return Err(ConfigError::Invalid(String::from("offsets must be finite")));
        }
        if self.scroll_viewport_rows == 0 {
            return Err(ConfigError::Invalid(String::from("scroll_viewport_rows must be positive")));
        }
        Ok(())
    }

    pub fn matches_target(&self, name: &str) -> bool {
        name.trim().to_lowercase() == self.target_name.trim().to_lowercase()
    }
}
