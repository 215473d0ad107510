/*
ENSnano, a 3d graphical application for DNA nanostructures.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
//! The tools with which the user edits the strands of a part.
//!
//! Pointer events are forwarded to the active tool together with the strand set and the base
//! index under the pointer. A tool answers with the `DesignOperation` that the event triggers, if
//! any.

use super::DesignOperation;
use nanostrand_design::{Part, StrandAddress, StrandSet, StrandSetId};
use strum::{Display, EnumString};

/// The tools available to edit strands
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ToolKind {
    /// Pick strands
    Select,
    /// Draw new strands
    Pencil,
    /// Split strands
    Break,
}

impl Default for ToolKind {
    fn default() -> Self {
        Self::Select
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEvent {
    MousePress,
    MouseMove,
    MouseRelease,
    HoverMove,
}

/// The state of the pencil tool while a strand is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StrandDrawing {
    set: StrandSetId,
    start: usize,
    current: usize,
}

#[derive(Debug, Default, Clone)]
pub struct PencilTool {
    drawing: Option<StrandDrawing>,
    /// The last base hovered while not drawing
    hovered: Option<(StrandSetId, usize)>,
}

impl PencilTool {
    pub fn is_drawing_strand(&self) -> bool {
        self.drawing.is_some()
    }

    /// The interval covered by the strand being drawn
    pub fn drawn_interval(&self) -> Option<(StrandSetId, usize, usize)> {
        self.drawing
            .map(|d| (d.set, d.start.min(d.current), d.start.max(d.current)))
    }

    pub fn hovered(&self) -> Option<(StrandSetId, usize)> {
        self.hovered
    }

    fn mouse_press(&mut self, set: StrandSetId, idx: usize) {
        if self.drawing.is_none() {
            self.drawing = Some(StrandDrawing {
                set,
                start: idx,
                current: idx,
            })
        }
    }

    /// The drawn strand stays on the strand set on which it was started.
    fn mouse_move(&mut self, idx: usize) {
        if let Some(drawing) = self.drawing.as_mut() {
            drawing.current = idx;
        }
    }

    fn mouse_release(&mut self, idx: usize, part: &Part) -> Option<DesignOperation> {
        self.mouse_move(idx);
        let (set, low_idx, high_idx) = self.drawn_interval()?;
        self.drawing = None;
        let can_insert = part
            .strand_set(set)
            .map(|s| s.can_insert(low_idx, high_idx))
            .unwrap_or(false);
        if can_insert {
            Some(DesignOperation::CreateStrand {
                set,
                low_idx,
                high_idx,
            })
        } else {
            log::info!("Cannot draw strand {}[{}, {}]", set, low_idx, high_idx);
            None
        }
    }

    fn hover_move(&mut self, set: StrandSetId, idx: usize) {
        if self.drawing.is_none() {
            self.hovered = Some((set, idx));
        }
    }

    fn handle(
        &mut self,
        event: ToolEvent,
        set: StrandSetId,
        idx: usize,
        part: &Part,
    ) -> Option<DesignOperation> {
        match event {
            ToolEvent::MousePress => self.mouse_press(set, idx),
            ToolEvent::MouseMove => self.mouse_move(idx),
            ToolEvent::MouseRelease => return self.mouse_release(idx, part),
            ToolEvent::HoverMove => self.hover_move(set, idx),
        }
        None
    }
}

/// Forwards pointer events to the active tool.
#[derive(Debug, Default, Clone)]
pub struct ToolDispatcher {
    active_tool: ToolKind,
    pencil: PencilTool,
    selected_strand: Option<StrandAddress>,
}

impl ToolDispatcher {
    pub fn new(tool: ToolKind) -> Self {
        Self {
            active_tool: tool,
            ..Default::default()
        }
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    /// Change the active tool. A strand being drawn is abandoned.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.active_tool {
            log::debug!("Tool {} -> {}", self.active_tool, tool);
            self.pencil = Default::default();
            self.active_tool = tool;
        }
    }

    pub fn pencil(&self) -> &PencilTool {
        &self.pencil
    }

    pub fn selected_strand(&self) -> Option<StrandAddress> {
        self.selected_strand
    }

    /// Forget the selected strand if it is not in the part anymore.
    pub fn update_selection(&mut self, part: &Part) {
        if let Some(strand) = self.selected_strand {
            if part.strand(strand).is_none() {
                self.selected_strand = None;
            }
        }
    }

    pub fn handle(
        &mut self,
        event: ToolEvent,
        set: StrandSetId,
        idx: usize,
        part: &Part,
    ) -> Option<DesignOperation> {
        match self.active_tool {
            ToolKind::Select => {
                self.select(event, set, idx, part);
                None
            }
            ToolKind::Pencil => self.pencil.handle(event, set, idx, part),
            ToolKind::Break => break_strand(event, set, idx, part),
        }
    }

    fn select(&mut self, event: ToolEvent, set: StrandSetId, idx: usize, part: &Part) {
        if event == ToolEvent::MousePress {
            self.selected_strand = part
                .strand_set(set)
                .and_then(|s| s.strand_at(idx))
                .map(|s| s.address());
        }
    }
}

/// Split the strand under the pointer when the mouse is pressed.
fn break_strand(
    event: ToolEvent,
    set: StrandSetId,
    idx: usize,
    part: &Part,
) -> Option<DesignOperation> {
    if event != ToolEvent::MousePress {
        return None;
    }
    let strand = part.strand_set(set)?.strand_at(idx)?;
    if StrandSet::strand_can_be_split(strand, idx) {
        Some(DesignOperation::SplitStrand {
            strand: strand.address(),
            idx,
            update_sequence: true,
        })
    } else {
        log::info!("Cannot break {} at {}", strand, idx);
        None
    }
}
