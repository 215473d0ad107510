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
use crate::{Part, PartNotification, Strand, StrandAddress, StrandId};

/// Replace two adjacent strands of a strand set by a single strand.
///
/// The bounds of the merged strand go from the low index of the lower strand to the high index of
/// the higher one. Its oligo and color are those of the priority strand.
#[derive(Debug)]
pub struct MergeCommand {
    lower: StrandAddress,
    higher: StrandAddress,
    priority: StrandId,
    merged_id: StrandId,
    /// The lower and higher strands, set when the command is done
    removed: Option<(Strand, Strand)>,
    oligo_changes: OligoChanges,
    text: String,
}

impl MergeCommand {
    /// `lower` and `higher` must be adjacent strands of the same set, `priority` must be the
    /// identifier of one of them.
    pub fn new(
        part: &mut Part,
        lower: StrandAddress,
        higher: StrandAddress,
        priority: StrandId,
    ) -> Self {
        Self {
            lower,
            higher,
            priority,
            merged_id: part.new_strand_id(),
            removed: None,
            oligo_changes: Vec::new(),
            text: String::from("Merge strands"),
        }
    }

    pub fn merged_address(&self) -> StrandAddress {
        StrandAddress {
            set: self.lower.set,
            strand: self.merged_id,
        }
    }

    fn make_merged(&self, lower: &Strand, higher: &Strand) -> Strand {
        let priority = if self.priority == lower.id() {
            lower
        } else {
            higher
        };
        let mut merged = Strand::new(
            self.merged_id,
            self.lower.set,
            lower.low_idx(),
            higher.high_idx(),
            priority.oligo(),
            priority.color(),
        );
        merged.set_connection_low(lower.connection_low());
        merged.set_connection_high(higher.connection_high());
        if let (Some(low_seq), Some(high_seq)) = (lower.sequence(), higher.sequence()) {
            let sequence = if lower.is_forward() {
                format!("{}{}", low_seq, high_seq)
            } else {
                format!("{}{}", high_seq, low_seq)
            };
            merged.set_sequence(Some(sequence));
        }
        merged
    }
}

impl UndoCommand for MergeCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        let lower = part.expect_strand(self.lower).clone();
        let higher = part.expect_strand(self.higher).clone();
        let merged = self.make_merged(&lower, &higher);
        let merged_addr = merged.address();
        let oligo = merged.oligo();
        let snapshot = merged.snapshot();

        for strand in [&lower, &higher].iter() {
            part.notify(PartNotification::StrandAboutToBeRemoved {
                set: self.lower.set,
                strand: strand.snapshot(),
            });
        }
        let set = part.expect_strand_set_mut(self.lower.set);
        set.remove_from_strand_list(self.lower.strand);
        set.remove_from_strand_list(self.higher.strand);
        set.add_to_strand_list(merged);
        part.reconnect_ends(&lower, Some(merged_addr), Some(merged_addr));
        part.reconnect_ends(&higher, Some(merged_addr), Some(merged_addr));

        let chain = part.oligo_chain(merged_addr);
        self.oligo_changes = part.assign_oligo(&chain, oligo);
        part.notify(PartNotification::StrandAdded {
            set: self.lower.set,
            strand: snapshot,
        });
        self.removed = Some((lower, higher));
    }

    fn undo(&mut self, part: &mut Part) {
        let (lower, higher) = self
            .removed
            .take()
            .unwrap_or_else(|| panic!("{} undone before being done", self.text));
        part.restore_oligos(&self.oligo_changes);
        self.oligo_changes.clear();
        let merged_addr = self.merged_address();
        part.notify(PartNotification::StrandAboutToBeRemoved {
            set: self.lower.set,
            strand: part.expect_strand(merged_addr).snapshot(),
        });
        part.reconnect_ends(&lower, Some(self.lower), Some(self.lower));
        part.reconnect_ends(&higher, Some(self.higher), Some(self.higher));
        let snapshots = [lower.snapshot(), higher.snapshot()];
        let set = part.expect_strand_set_mut(self.lower.set);
        set.remove_from_strand_list(self.merged_id);
        set.add_to_strand_list(lower);
        set.add_to_strand_list(higher);
        for snapshot in snapshots.iter() {
            part.notify(PartNotification::StrandAdded {
                set: self.lower.set,
                strand: *snapshot,
            });
        }
    }
}
