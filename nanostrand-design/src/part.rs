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
use super::commands::{
    CreateVirtualHelixCommand, RemoveVirtualHelixCommand, UndoCommand, UndoStack,
};
use super::*;
use derivative::Derivative;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

static NEXT_PART_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartId(pub usize);

/// The collection of virtual helices of a design.
///
/// The part owns the virtual helices and, through them, every strand set and every strand. It also
/// allocates the identifiers of helices, strands and oligos and holds the observers that are
/// notified of the modifications.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Part {
    id: PartId,
    name: String,
    virtual_helices: BTreeMap<usize, VirtualHelix>,
    /// Helix numbers that are in use or reserved by a pending creation.
    reserved_id_nums: BTreeSet<usize>,
    next_strand_id: usize,
    next_oligo_id: usize,
    parameters: Parameters,
    #[derivative(Debug = "ignore")]
    notifier: Notifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartError {
    NoSuchVirtualHelix(usize),
    /// A specific helix number was requested but it is already used.
    IdNumberInUse(usize),
    StrandSet(StrandSetError),
}

impl From<StrandSetError> for PartError {
    fn from(e: StrandSetError) -> Self {
        Self::StrandSet(e)
    }
}

impl fmt::Display for PartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchVirtualHelix(id) => write!(f, "No virtual helix {}", id),
            Self::IdNumberInUse(id) => write!(f, "Virtual helix number {} is already used", id),
            Self::StrandSet(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PartError {}

impl Part {
    pub fn new<S: Into<String>>(name: S, parameters: Parameters) -> Self {
        Self {
            id: PartId(NEXT_PART_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            virtual_helices: BTreeMap::new(),
            reserved_id_nums: BTreeSet::new(),
            next_strand_id: 0,
            next_oligo_id: 0,
            parameters,
            notifier: Notifier::default(),
        }
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: Parameters) {
        self.parameters = parameters
    }

    pub fn subscribe(&mut self, observer: Arc<Mutex<dyn PartObserver + Send>>) {
        self.notifier.subscribe(observer)
    }

    pub(crate) fn notify(&self, notification: PartNotification) {
        self.notifier.emit(notification)
    }

    // Collection methods
    //============================================================================================
    pub fn virtual_helix(&self, id_num: usize) -> Option<&VirtualHelix> {
        self.virtual_helices.get(&id_num)
    }

    pub fn virtual_helices(&self) -> impl Iterator<Item = (&usize, &VirtualHelix)> {
        self.virtual_helices.iter()
    }

    pub fn nb_virtual_helices(&self) -> usize {
        self.virtual_helices.len()
    }

    pub fn id_nums(&self) -> impl Iterator<Item = &usize> {
        self.virtual_helices.keys()
    }

    pub fn strand_set(&self, set: StrandSetId) -> Option<&StrandSet> {
        self.virtual_helices
            .get(&set.id_num)
            .map(|vh| vh.strand_set(set.is_fwd))
    }

    /// The forward and reverse strand sets of a helix.
    pub fn strand_sets(&self, id_num: usize) -> Option<(&StrandSet, &StrandSet)> {
        self.virtual_helices.get(&id_num).map(|vh| vh.strand_sets())
    }

    /// The strand set on the same helix as `set`, with the opposite direction
    pub fn complement_strand_set(&self, set: StrandSetId) -> Option<&StrandSet> {
        self.strand_set(set.complement())
    }

    pub fn strand(&self, address: StrandAddress) -> Option<&Strand> {
        self.strand_set(address.set)
            .and_then(|set| set.get(address.strand))
    }

    /// Highest base index of a helix
    pub fn max_base_idx(&self, id_num: usize) -> Option<usize> {
        self.virtual_helices.get(&id_num).map(|vh| vh.max_base_idx())
    }

    pub(crate) fn strand_set_mut(&mut self, set: StrandSetId) -> Option<&mut StrandSet> {
        self.virtual_helices
            .get_mut(&set.id_num)
            .map(|vh| vh.strand_set_mut(set.is_fwd))
    }

    pub(crate) fn strand_mut(&mut self, address: StrandAddress) -> Option<&mut Strand> {
        self.strand_set_mut(address.set)
            .and_then(|set| set.get_mut(address.strand))
    }

    /// Access a strand set that a command expects to exist.
    pub(crate) fn expect_strand_set_mut(&mut self, set: StrandSetId) -> &mut StrandSet {
        self.strand_set_mut(set)
            .unwrap_or_else(|| panic!("Command applied on missing strand set {}", set))
    }

    /// Access a strand that a command expects to exist.
    pub(crate) fn expect_strand(&self, address: StrandAddress) -> &Strand {
        self.strand(address)
            .unwrap_or_else(|| panic!("Command applied on missing strand {:?}", address))
    }

    pub(crate) fn expect_strand_mut(&mut self, address: StrandAddress) -> &mut Strand {
        self.strand_mut(address)
            .unwrap_or_else(|| panic!("Command applied on missing strand {:?}", address))
    }

    /// Make the strands connected to the ends of `strand` point to `low_target` (for the strand
    /// connected to its low end) and `high_target` (for the one connected to its high end).
    pub(crate) fn reconnect_ends(
        &mut self,
        strand: &Strand,
        low_target: Option<StrandAddress>,
        high_target: Option<StrandAddress>,
    ) {
        let is_fwd = strand.is_forward();
        let ends = [
            (strand.connection_low(), low_target, is_fwd),
            (strand.connection_high(), high_target, !is_fwd),
        ];
        for (peer, target, end_is_5p) in ends.iter() {
            if let Some(peer) = peer {
                let peer_strand = self.expect_strand_mut(*peer);
                if *end_is_5p {
                    peer_strand.set_connection_3p(*target);
                } else {
                    peer_strand.set_connection_5p(*target);
                }
                self.notify(PartNotification::StrandConnectionsChanged(*peer));
            }
        }
    }

    pub(crate) fn add_virtual_helix(&mut self, id_num: usize, virtual_helix: VirtualHelix) {
        if self.virtual_helices.insert(id_num, virtual_helix).is_some() {
            panic!("Virtual helix {} registered twice", id_num);
        }
    }

    pub(crate) fn take_virtual_helix(&mut self, id_num: usize) -> Option<VirtualHelix> {
        self.virtual_helices.remove(&id_num)
    }
    //============================================================================================

    // Identifiers
    //============================================================================================

    /// Reserve a helix number. If `requested_id_num` is `None`, the smallest free number is
    /// reserved.
    pub fn reserve_helix_id_number(&mut self, requested_id_num: Option<usize>) -> usize {
        let id_num = requested_id_num.unwrap_or_else(|| {
            (0..)
                .find(|n| !self.reserved_id_nums.contains(n))
                .unwrap_or_default()
        });
        self.reserved_id_nums.insert(id_num);
        id_num
    }

    /// Make a helix number available again.
    pub fn recycle_helix_id_number(&mut self, id_num: usize) {
        self.reserved_id_nums.remove(&id_num);
    }

    pub fn is_id_num_reserved(&self, id_num: usize) -> bool {
        self.reserved_id_nums.contains(&id_num)
    }

    pub(crate) fn new_strand_id(&mut self) -> StrandId {
        let ret = StrandId(self.next_strand_id);
        self.next_strand_id += 1;
        ret
    }

    pub(crate) fn new_oligo_id(&mut self) -> OligoId {
        let ret = OligoId(self.next_oligo_id);
        self.next_oligo_id += 1;
        ret
    }
    //============================================================================================

    // Virtual helices edition
    //============================================================================================

    /// Create a new virtual helix and return its number.
    ///
    /// `length` defaults to the `default_helix_length` of the part's parameters.
    pub fn create_virtual_helix(
        &mut self,
        undo_stack: &mut UndoStack,
        origin: (f64, f64),
        length: Option<usize>,
        requested_id_num: Option<usize>,
        use_undostack: bool,
    ) -> Result<usize, PartError> {
        if let Some(id_num) = requested_id_num {
            if self.is_id_num_reserved(id_num) {
                return Err(PartError::IdNumberInUse(id_num));
            }
        }
        let length = length.unwrap_or(self.parameters.default_helix_length);
        let command = CreateVirtualHelixCommand::new(self, origin, length, requested_id_num);
        let id_num = command.id_num();
        let desc = format!("{}:({:.2},{:.2})", self.name, origin.0, origin.1);
        let commands: Vec<Box<dyn UndoCommand>> = vec![Box::new(command)];
        undo_stack.exec_command_list(self, commands, &desc, use_undostack);
        Ok(id_num)
    }

    /// Remove a virtual helix and all the strands that it carries.
    pub fn remove_virtual_helix(
        &mut self,
        undo_stack: &mut UndoStack,
        id_num: usize,
        use_undostack: bool,
    ) -> Result<(), PartError> {
        if !self.virtual_helices.contains_key(&id_num) {
            return Err(PartError::NoSuchVirtualHelix(id_num));
        }
        if use_undostack {
            undo_stack.begin_macro("Delete VirtualHelix");
        }
        for set in [StrandSetId::fwd(id_num), StrandSetId::rev(id_num)].iter() {
            self.remove_all_strands(undo_stack, *set, use_undostack)?;
        }
        let commands: Vec<Box<dyn UndoCommand>> =
            vec![Box::new(RemoveVirtualHelixCommand::new(id_num))];
        undo_stack.exec_command_list(self, commands, "Remove VirtualHelix", use_undostack);
        if use_undostack {
            undo_stack.end_macro();
        }
        Ok(())
    }

    /// Propagate a change of length of a helix to its strand sets.
    ///
    /// The caller is responsible for making sure that no strand lies on a truncated region.
    pub fn resize_virtual_helix(
        &mut self,
        id_num: usize,
        delta_low: isize,
        delta_high: isize,
    ) -> Result<(), PartError> {
        let vh = self
            .virtual_helices
            .get_mut(&id_num)
            .ok_or(PartError::NoSuchVirtualHelix(id_num))?;
        vh.resize(delta_low, delta_high);
        let length = vh.length();
        self.notify(PartNotification::VirtualHelixResized {
            part: self.id,
            id_num,
            length,
        });
        Ok(())
    }
    //============================================================================================

    /// Panics if a strand set is inconsistent or if a cross-over is not reciprocal.
    pub fn check_invariants(&self) {
        for vh in self.virtual_helices.values() {
            let (fwd, rev) = vh.strand_sets();
            for set in [fwd, rev].iter() {
                set.check_invariants();
                for strand in set.strands() {
                    if let Some(next) = strand.connection_3p() {
                        let prime3 = self
                            .strand(next)
                            .unwrap_or_else(|| panic!("{} connected to missing strand", strand));
                        assert_eq!(prime3.connection_5p(), Some(strand.address()));
                    }
                    if let Some(prev) = strand.connection_5p() {
                        let prime5 = self
                            .strand(prev)
                            .unwrap_or_else(|| panic!("{} connected to missing strand", strand));
                        assert_eq!(prime5.connection_3p(), Some(strand.address()));
                    }
                }
            }
        }
    }
}
