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
use crate::{Part, PartNotification, VirtualHelix};

/// Give `virtual_helix` the number `id_num` and register it in `part`.
fn register(part: &mut Part, id_num: usize, mut virtual_helix: VirtualHelix) {
    let origin = virtual_helix.origin();
    virtual_helix.set_part(Some(part.id()));
    virtual_helix.set_id_num(Some(id_num));
    part.reserve_helix_id_number(Some(id_num));
    part.add_virtual_helix(id_num, virtual_helix);
    part.notify(PartNotification::VirtualHelixAdded {
        part: part.id(),
        id_num,
        origin,
    });
    part.notify(PartNotification::LayoutChanged { part: part.id() });
}

/// Remove the virtual helix `id_num` from `part` and make its number available again.
///
/// The removal is announced before the helix is deregistered.
fn deregister(part: &mut Part, id_num: usize) -> VirtualHelix {
    let origin = part
        .virtual_helix(id_num)
        .map(|vh| vh.origin())
        .unwrap_or_else(|| panic!("Virtual helix {} is not registered", id_num));
    part.notify(PartNotification::VirtualHelixRemoved {
        part: part.id(),
        id_num,
        origin,
    });
    let mut virtual_helix = part
        .take_virtual_helix(id_num)
        .unwrap_or_else(|| panic!("Virtual helix {} is not registered", id_num));
    part.recycle_helix_id_number(id_num);
    virtual_helix.set_id_num(None);
    virtual_helix.set_part(None);
    part.notify(PartNotification::LayoutChanged { part: part.id() });
    virtual_helix
}

/// Create a virtual helix and register it in a part.
#[derive(Debug)]
pub struct CreateVirtualHelixCommand {
    id_num: usize,
    /// The helix, when it is not registered in the part
    virtual_helix: Option<VirtualHelix>,
    text: String,
}

impl CreateVirtualHelixCommand {
    /// Reserve a number for the new helix, `requested_id_num` if given or the first free number
    /// otherwise, and build the helix.
    pub fn new(
        part: &mut Part,
        origin: (f64, f64),
        length: usize,
        requested_id_num: Option<usize>,
    ) -> Self {
        let id_num = part.reserve_helix_id_number(requested_id_num);
        Self {
            id_num,
            virtual_helix: Some(VirtualHelix::new(id_num, origin, length)),
            text: format!("Create virtual helix {}", id_num),
        }
    }

    /// The number of the created helix
    pub fn id_num(&self) -> usize {
        self.id_num
    }
}

impl UndoCommand for CreateVirtualHelixCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        let virtual_helix = self
            .virtual_helix
            .take()
            .unwrap_or_else(|| panic!("{} done twice", self.text));
        register(part, self.id_num, virtual_helix)
    }

    fn undo(&mut self, part: &mut Part) {
        self.virtual_helix = Some(deregister(part, self.id_num))
    }
}

/// Deregister a virtual helix from its part. The helix is expected to carry no strand.
#[derive(Debug)]
pub struct RemoveVirtualHelixCommand {
    id_num: usize,
    virtual_helix: Option<VirtualHelix>,
    text: String,
}

impl RemoveVirtualHelixCommand {
    pub fn new(id_num: usize) -> Self {
        Self {
            id_num,
            virtual_helix: None,
            text: format!("Remove virtual helix {}", id_num),
        }
    }
}

impl UndoCommand for RemoveVirtualHelixCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        let virtual_helix = deregister(part, self.id_num);
        if virtual_helix.has_strands() {
            log::warn!("Virtual helix {} removed with strands on it", self.id_num);
        }
        self.virtual_helix = Some(virtual_helix)
    }

    fn undo(&mut self, part: &mut Part) {
        let virtual_helix = self
            .virtual_helix
            .take()
            .unwrap_or_else(|| panic!("{} undone before being done", self.text));
        register(part, self.id_num, virtual_helix)
    }
}
