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
use crate::{OligoId, Part, PartNotification, StrandAddress};

/// Connect the 3' end of a strand to the 5' end of an other strand.
///
/// The oligo of the 5' strand is propagated to the strands downstream of the cross-over.
#[derive(Debug)]
pub struct CreateXoverCommand {
    prime5: StrandAddress,
    prime3: StrandAddress,
    oligo_changes: OligoChanges,
    text: String,
}

impl CreateXoverCommand {
    pub fn new(prime5: StrandAddress, prime3: StrandAddress) -> Self {
        Self {
            prime5,
            prime3,
            oligo_changes: Vec::new(),
            text: format!("Create xover {} -> {}", prime5.set, prime3.set),
        }
    }
}

impl UndoCommand for CreateXoverCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        part.expect_strand_mut(self.prime5)
            .set_connection_3p(Some(self.prime3));
        part.expect_strand_mut(self.prime3)
            .set_connection_5p(Some(self.prime5));
        part.notify(PartNotification::StrandConnectionsChanged(self.prime5));
        part.notify(PartNotification::StrandConnectionsChanged(self.prime3));
        let oligo = part.expect_strand(self.prime5).oligo();
        let chain = part.downstream_chain(self.prime3);
        self.oligo_changes = part.assign_oligo(&chain, oligo);
    }

    fn undo(&mut self, part: &mut Part) {
        part.restore_oligos(&self.oligo_changes);
        self.oligo_changes.clear();
        part.expect_strand_mut(self.prime5).set_connection_3p(None);
        part.expect_strand_mut(self.prime3).set_connection_5p(None);
        part.notify(PartNotification::StrandConnectionsChanged(self.prime5));
        part.notify(PartNotification::StrandConnectionsChanged(self.prime3));
    }
}

/// Remove the cross-over leaving the 3' end of a strand.
///
/// The strands downstream of the cross-over form a new oligo.
#[derive(Debug)]
pub struct RemoveXoverCommand {
    prime5: StrandAddress,
    prime3: Option<StrandAddress>,
    new_oligo: OligoId,
    oligo_changes: OligoChanges,
    text: String,
}

impl RemoveXoverCommand {
    pub fn new(part: &mut Part, prime5: StrandAddress) -> Self {
        Self {
            prime5,
            prime3: None,
            new_oligo: part.new_oligo_id(),
            oligo_changes: Vec::new(),
            text: format!("Remove xover from {}", prime5.set),
        }
    }
}

impl UndoCommand for RemoveXoverCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        let prime3 = part
            .expect_strand(self.prime5)
            .connection_3p()
            .unwrap_or_else(|| panic!("{}: no xover to remove", self.text));
        part.expect_strand_mut(self.prime5).set_connection_3p(None);
        part.expect_strand_mut(prime3).set_connection_5p(None);
        part.notify(PartNotification::StrandConnectionsChanged(self.prime5));
        part.notify(PartNotification::StrandConnectionsChanged(prime3));
        let chain = part.downstream_chain(prime3);
        self.oligo_changes = part.assign_oligo(&chain, self.new_oligo);
        self.prime3 = Some(prime3);
    }

    fn undo(&mut self, part: &mut Part) {
        let prime3 = self
            .prime3
            .take()
            .unwrap_or_else(|| panic!("{} undone before being done", self.text));
        part.restore_oligos(&self.oligo_changes);
        self.oligo_changes.clear();
        part.expect_strand_mut(self.prime5)
            .set_connection_3p(Some(prime3));
        part.expect_strand_mut(prime3).set_connection_5p(Some(self.prime5));
        part.notify(PartNotification::StrandConnectionsChanged(self.prime5));
        part.notify(PartNotification::StrandConnectionsChanged(prime3));
    }
}
