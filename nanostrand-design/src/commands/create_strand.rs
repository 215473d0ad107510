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
use super::UndoCommand;
use crate::{OligoId, Part, PartNotification, Strand, StrandAddress, StrandId, StrandSetId};

/// Add a new strand to a strand set. The new strand starts its own oligo.
#[derive(Debug)]
pub struct CreateStrandCommand {
    set: StrandSetId,
    low_idx: usize,
    high_idx: usize,
    strand_id: StrandId,
    oligo: OligoId,
    color: u32,
    text: String,
}

impl CreateStrandCommand {
    /// Prepare the creation of a strand. This does not check that the interval is free.
    pub fn new(part: &mut Part, set: StrandSetId, low_idx: usize, high_idx: usize) -> Self {
        let strand_id = part.new_strand_id();
        let oligo = part.new_oligo_id();
        let color = part.parameters().color_for(set, strand_id.0);
        Self {
            set,
            low_idx,
            high_idx,
            strand_id,
            oligo,
            color,
            text: format!("Create strand {}[{}, {}]", set, low_idx, high_idx),
        }
    }

    pub fn with_color(self, color: u32) -> Self {
        Self { color, ..self }
    }

    /// The address that the strand will have once created
    pub fn address(&self) -> StrandAddress {
        StrandAddress {
            set: self.set,
            strand: self.strand_id,
        }
    }
}

impl UndoCommand for CreateStrandCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        let strand = Strand::new(
            self.strand_id,
            self.set,
            self.low_idx,
            self.high_idx,
            self.oligo,
            self.color,
        );
        let snapshot = strand.snapshot();
        part.expect_strand_set_mut(self.set)
            .add_to_strand_list(strand);
        part.notify(PartNotification::StrandAdded {
            set: self.set,
            strand: snapshot,
        });
    }

    fn undo(&mut self, part: &mut Part) {
        let address = self.address();
        let snapshot = part.expect_strand(address).snapshot();
        part.notify(PartNotification::StrandAboutToBeRemoved {
            set: self.set,
            strand: snapshot,
        });
        part.expect_strand_set_mut(self.set)
            .remove_from_strand_list(self.strand_id);
    }
}
