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
use crate::{OligoId, Part, PartNotification, Strand, StrandAddress};

/// Remove a strand from its strand set.
///
/// The cross-overs of the strand are cleared on the connected strands, and the strands that were
/// downstream of the removed strand form a new oligo.
#[derive(Debug)]
pub struct RemoveStrandCommand {
    address: StrandAddress,
    new_oligo: OligoId,
    /// The removed strand, with its connections, set when the command is done
    removed: Option<Strand>,
    oligo_changes: OligoChanges,
    text: String,
}

impl RemoveStrandCommand {
    pub fn new(part: &mut Part, address: StrandAddress) -> Self {
        let text = if let Some(strand) = part.strand(address) {
            format!("Remove strand {}", strand)
        } else {
            String::from("Remove strand")
        };
        Self {
            address,
            new_oligo: part.new_oligo_id(),
            removed: None,
            oligo_changes: Vec::new(),
            text,
        }
    }
}

impl UndoCommand for RemoveStrandCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        let strand = part.expect_strand(self.address).clone();
        part.notify(PartNotification::StrandAboutToBeRemoved {
            set: self.address.set,
            strand: strand.snapshot(),
        });
        if let Some(prime5) = strand.connection_5p() {
            part.expect_strand_mut(prime5).set_connection_3p(None);
            part.notify(PartNotification::StrandConnectionsChanged(prime5));
        }
        if let Some(prime3) = strand.connection_3p() {
            part.expect_strand_mut(prime3).set_connection_5p(None);
            part.notify(PartNotification::StrandConnectionsChanged(prime3));
        }
        part.expect_strand_set_mut(self.address.set)
            .remove_from_strand_list(self.address.strand);
        if let Some(prime3) = strand.connection_3p() {
            let chain = part.downstream_chain(prime3);
            self.oligo_changes = part.assign_oligo(&chain, self.new_oligo);
        }
        self.removed = Some(strand);
    }

    fn undo(&mut self, part: &mut Part) {
        let strand = self
            .removed
            .take()
            .unwrap_or_else(|| panic!("{} undone before being done", self.text));
        part.restore_oligos(&self.oligo_changes);
        self.oligo_changes.clear();
        let snapshot = strand.snapshot();
        let prime5 = strand.connection_5p();
        let prime3 = strand.connection_3p();
        part.expect_strand_set_mut(self.address.set)
            .add_to_strand_list(strand);
        if let Some(prime5) = prime5 {
            part.expect_strand_mut(prime5)
                .set_connection_3p(Some(self.address));
            part.notify(PartNotification::StrandConnectionsChanged(prime5));
        }
        if let Some(prime3) = prime3 {
            part.expect_strand_mut(prime3)
                .set_connection_5p(Some(self.address));
            part.notify(PartNotification::StrandConnectionsChanged(prime3));
        }
        part.notify(PartNotification::StrandAdded {
            set: self.address.set,
            strand: snapshot,
        });
    }
}
