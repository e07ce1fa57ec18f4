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

use crate::items::slot::Slot;
use crate::ui::quad_f::QuadF;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewContent {
    Empty,
    Occupied { kind: String, quantity: u32 },
}

/// Presentation element mirroring one slot.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotView {
    pub name: String,
    pub bound_slot: Option<usize>,
    pub displayed: bool,
    pub content: ViewContent,
    pub frame: QuadF,
}

impl SlotView {
    pub fn new(name: &str, frame: QuadF) -> Self {
        SlotView {
            name: String::from(name),
            bound_slot: None,
            displayed: true,
            content: ViewContent::Empty,
            frame,
        }
    }

    /// Builds a fresh view from `template` for array position `index`. The template is
    /// only read; the clone starts unbound and hidden with its own name.
    pub fn clone_from_template(template: &SlotView, index: usize) -> Self {
        SlotView {
            name: format!("{}#{}", template.name, index),
            bound_slot: None,
            displayed: false,
            content: ViewContent::Empty,
            frame: template.frame,
        }
    }

    pub fn bind(&mut self, index: usize) {
        self.bound_slot = Some(index);
    }

    pub fn unbind(&mut self) {
        self.bound_slot = None;
        self.content = ViewContent::Empty;
    }

    pub fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }

    pub fn refresh(&mut self, slot: &Slot) {
        self.content = match &slot.stack {
            Some(stack) => ViewContent::Occupied {
                kind: stack.kind.clone(),
                quantity: stack.quantity,
            },
            None => ViewContent::Empty,
        };
    }
}
