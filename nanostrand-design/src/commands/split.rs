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
use crate::oligo::OligoChanges;
use crate::{OligoId, Part, PartNotification, Strand, StrandAddress, StrandId};

/// Replace a strand by two strands `[low, idx - 1]` and `[idx, high]`.
///
/// The fragment holding the 5' end of the original strand keeps its oligo, the other fragment and
/// the strands downstream of it form a new oligo.
#[derive(Debug)]
pub struct SplitCommand {
    original: StrandAddress,
    idx: usize,
    update_sequence: bool,
    low_id: StrandId,
    high_id: StrandId,
    new_oligo: OligoId,
    /// The split strand, set when the command is done
    removed: Option<Strand>,
    oligo_changes: OligoChanges,
    text: String,
}

impl SplitCommand {
    /// Prepare a split at `idx`. If `update_sequence` is true, the sequence of the strand is
    /// shared between the two fragments, otherwise it is dropped.
    pub fn new(part: &mut Part, original: StrandAddress, idx: usize, update_sequence: bool) -> Self {
        Self {
            original,
            idx,
            update_sequence,
            low_id: part.new_strand_id(),
            high_id: part.new_strand_id(),
            new_oligo: part.new_oligo_id(),
            removed: None,
            oligo_changes: Vec::new(),
            text: format!("Split strand at {}", idx),
        }
    }

    /// The addresses of the fragments of coordinates `[low, idx - 1]` and `[idx, high]`.
    pub fn fragments(&self) -> (StrandAddress, StrandAddress) {
        (
            StrandAddress {
                set: self.original.set,
                strand: self.low_id,
            },
            StrandAddress {
                set: self.original.set,
                strand: self.high_id,
            },
        )
    }

    fn make_fragments(&self, original: &Strand) -> (Strand, Strand) {
        let set = self.original.set;
        let (low, high) = original.idxs();
        let is_fwd = original.is_forward();
        let (low_oligo, high_oligo) = if is_fwd {
            (original.oligo(), self.new_oligo)
        } else {
            (self.new_oligo, original.oligo())
        };
        let mut low_strand = Strand::new(
            self.low_id,
            set,
            low,
            self.idx - 1,
            low_oligo,
            original.color(),
        );
        let mut high_strand = Strand::new(
            self.high_id,
            set,
            self.idx,
            high,
            high_oligo,
            original.color(),
        );
        low_strand.set_connection_low(original.connection_low());
        high_strand.set_connection_high(original.connection_high());

        if self.update_sequence {
            if let Some(sequence) = original.sequence() {
                let (prime5, prime3) = if is_fwd {
                    (&mut low_strand, &mut high_strand)
                } else {
                    (&mut high_strand, &mut low_strand)
                };
                let len5 = prime5.length();
                prime5.set_sequence(Some(sequence.chars().take(len5).collect()));
                prime3.set_sequence(Some(sequence.chars().skip(len5).collect()));
            }
        }
        (low_strand, high_strand)
    }
}

impl UndoCommand for SplitCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        let original = part.expect_strand(self.original).clone();
        let (low_strand, high_strand) = self.make_fragments(&original);
        let (low_addr, high_addr) = self.fragments();
        let prime3_fragment = if original.is_forward() {
            high_addr
        } else {
            low_addr
        };
        let (low_snapshot, high_snapshot) = (low_strand.snapshot(), high_strand.snapshot());

        part.notify(PartNotification::StrandAboutToBeRemoved {
            set: self.original.set,
            strand: original.snapshot(),
        });
        let set = part.expect_strand_set_mut(self.original.set);
        set.remove_from_strand_list(self.original.strand);
        set.add_to_strand_list(low_strand);
        set.add_to_strand_list(high_strand);
        part.reconnect_ends(&original, Some(low_addr), Some(high_addr));
        let chain = part.downstream_chain(prime3_fragment);
        self.oligo_changes = part.assign_oligo(&chain, self.new_oligo);

        part.notify(PartNotification::StrandAdded {
            set: self.original.set,
            strand: low_snapshot,
        });
        part.notify(PartNotification::StrandAdded {
            set: self.original.set,
            strand: high_snapshot,
        });
        self.removed = Some(original);
    }

    fn undo(&mut self, part: &mut Part) {
        let original = self
            .removed
            .take()
            .unwrap_or_else(|| panic!("{} undone before being done", self.text));
        part.restore_oligos(&self.oligo_changes);
        self.oligo_changes.clear();
        let (low_addr, high_addr) = self.fragments();
        for fragment in [low_addr, high_addr].iter() {
            let snapshot = part.expect_strand(*fragment).snapshot();
            part.notify(PartNotification::StrandAboutToBeRemoved {
                set: self.original.set,
                strand: snapshot,
            });
        }
        let snapshot = original.snapshot();
        part.reconnect_ends(&original, Some(self.original), Some(self.original));
        let set = part.expect_strand_set_mut(self.original.set);
        set.remove_from_strand_list(self.low_id);
        set.remove_from_strand_list(self.high_id);
        set.add_to_strand_list(original);
        part.notify(PartNotification::StrandAdded {
            set: self.original.set,
            strand: snapshot,
        });
    }
}
