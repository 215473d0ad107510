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
use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FWD: StrandSetId = StrandSetId {
    id_num: 0,
    is_fwd: true,
};
const REV: StrandSetId = StrandSetId {
    id_num: 0,
    is_fwd: false,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn one_helix_part(length: usize) -> (Part, UndoStack) {
    init_logger();
    let mut part = Part::new("test", Parameters::DEFAULT);
    let mut undo_stack = UndoStack::new();
    part.create_virtual_helix(&mut undo_stack, (0., 0.), Some(length), None, false)
        .unwrap();
    (part, undo_stack)
}

fn bounds(part: &Part, set: StrandSetId) -> Vec<(usize, usize)> {
    part.strand_set(set)
        .unwrap()
        .strands()
        .map(|s| s.idxs())
        .collect()
}

fn copy_of(part: &Part, set: StrandSetId) -> StrandSet {
    part.strand_set(set).unwrap().clone()
}

#[test]
fn create_rejects_overlap() {
    let (mut part, mut stack) = one_helix_part(20);
    assert!(part.create_strand(&mut stack, FWD, 5, 9, true).is_ok());
    assert_eq!(
        part.create_strand(&mut stack, FWD, 7, 12, true),
        Err(StrandSetError::Overlap { low: 7, high: 12 })
    );
    assert!(part.create_strand(&mut stack, FWD, 10, 15, true).is_ok());
    assert!(part.create_strand(&mut stack, FWD, 18, 20, true).is_err());
    assert!(part.create_strand(&mut stack, FWD, 9, 9, true).is_err());
    assert_eq!(bounds(&part, FWD), vec![(5, 9), (10, 15)]);
    assert_eq!(stack.count(), 2);
    part.check_invariants();
}

#[test]
fn create_on_missing_set() {
    let (mut part, mut stack) = one_helix_part(20);
    let set = StrandSetId::fwd(3);
    assert_eq!(
        part.create_strand(&mut stack, set, 0, 3, true),
        Err(StrandSetError::NoSuchStrandSet(set))
    );
    assert!(!stack.can_undo());
}

#[test]
fn empty_region_bounds() {
    let (mut part, mut stack) = one_helix_part(20);
    let set = part.strand_set(FWD).unwrap();
    assert_eq!(set.bounds_of_empty_region_containing(0), Some((0, 19)));
    assert_eq!(set.bounds_of_empty_region_containing(20), None);
    part.create_strand(&mut stack, FWD, 5, 9, true).unwrap();
    let set = part.strand_set(FWD).unwrap();
    assert_eq!(set.bounds_of_empty_region_containing(3), Some((0, 4)));
    assert_eq!(set.bounds_of_empty_region_containing(12), Some((10, 19)));
    assert_eq!(set.bounds_of_empty_region_containing(7), None);
}

#[test]
fn range_queries() {
    let (mut part, mut stack) = one_helix_part(30);
    for (low, high) in [(2, 4), (8, 12), (20, 25)].iter() {
        part.create_strand(&mut stack, FWD, *low, *high, true)
            .unwrap();
    }
    let set = part.strand_set(FWD).unwrap();
    assert!(set.has_strand_in_range(5, 8));
    assert!(!set.has_strand_in_range(13, 19));
    assert!(set.has_strand_in_range(0, 29));
    let overlapping: Vec<_> = set
        .overlapping_strands(3, 21)
        .iter()
        .map(|s| s.idxs())
        .collect();
    assert_eq!(overlapping, vec![(2, 4), (8, 12), (20, 25)]);
    assert!(set.overlapping_strands(13, 19).is_empty());
    assert_eq!(set.index_of_rightmost_nonempty_base(), 25);
    assert!(set.strand_at(100).is_none());
    assert_eq!(set.strand_at(10).map(|s| s.idxs()), Some((8, 12)));

    let middle = set.strand_at(10).unwrap().id();
    let (low, high) = set.neighbors(middle).unwrap();
    assert_eq!(low.map(|s| s.idxs()), Some((2, 4)));
    assert_eq!(high.map(|s| s.idxs()), Some((20, 25)));
    let first = set.strand_at(2).unwrap().id();
    assert!(set.neighbors(first).unwrap().0.is_none());
    assert_eq!(
        set.neighbors(StrandId(1000)).err(),
        Some(StrandSetError::NotInSet)
    );
    assert!(set.is_strand_in_set(middle));
    assert!(!set.is_strand_in_set(StrandId(1000)));
    assert_eq!(set.strand_count(), 3);
}

#[test]
fn split_boundaries_forward() {
    let (mut part, mut stack) = one_helix_part(20);
    let strand = part.create_strand(&mut stack, FWD, 5, 12, true).unwrap();
    for idx in [12, 11, 5, 3, 15].iter() {
        assert_eq!(
            part.split_strand(&mut stack, strand, *idx, false, true),
            Err(StrandSetError::SplitRejected { idx: *idx })
        );
    }
    let (low, high) = part.split_strand(&mut stack, strand, 8, false, true).unwrap();
    assert_eq!(part.strand(low).unwrap().idxs(), (5, 7));
    assert_eq!(part.strand(high).unwrap().idxs(), (8, 12));
    assert!(part.strand(strand).is_none());
    part.check_invariants();
}

#[test]
fn split_boundaries_reverse() {
    let (mut part, mut stack) = one_helix_part(20);
    let strand = part.create_strand(&mut stack, REV, 5, 12, true).unwrap();
    // the 3' end of a reverse strand is its low index
    assert!(part.split_strand(&mut stack, strand, 6, false, true).is_err());
    assert!(part.split_strand(&mut stack, strand, 11, false, true).is_ok());
    assert_eq!(bounds(&part, REV), vec![(5, 10), (11, 12)]);
}

#[test]
fn split_then_merge_restores_bounds() {
    let (mut part, mut stack) = one_helix_part(20);
    let strand = part.create_strand(&mut stack, FWD, 5, 12, true).unwrap();
    let (low, high) = part.split_strand(&mut stack, strand, 8, false, true).unwrap();
    let low_oligo = part.strand(low).unwrap().oligo();
    assert_ne!(low_oligo, part.strand(high).unwrap().oligo());
    let merged = part.merge_strands(&mut stack, low, high, true).unwrap();
    assert_eq!(part.strand(merged).unwrap().idxs(), (5, 12));
    assert_eq!(part.strand(merged).unwrap().oligo(), low_oligo);
    assert_eq!(bounds(&part, FWD), vec![(5, 12)]);
    part.check_invariants();
}

#[test]
fn merge_keeps_priority_payload() {
    let (mut part, mut stack) = one_helix_part(20);
    let a = part.create_strand(&mut stack, FWD, 5, 9, true).unwrap();
    let b = part.create_strand(&mut stack, FWD, 10, 12, true).unwrap();
    part.set_strand_color(&mut stack, a, 0xFF_111111, true)
        .unwrap();
    part.set_strand_color(&mut stack, b, 0xFF_222222, true)
        .unwrap();
    let a_oligo = part.strand(a).unwrap().oligo();
    let b_oligo = part.strand(b).unwrap().oligo();

    let merged = part.merge_strands(&mut stack, a, b, true).unwrap();
    let strand = part.strand(merged).unwrap();
    assert_eq!(strand.idxs(), (5, 12));
    assert_eq!(strand.oligo(), a_oligo);
    assert_eq!(strand.color(), 0xFF_111111);

    assert!(stack.undo(&mut part));
    let merged = part.merge_strands(&mut stack, b, a, true).unwrap();
    let strand = part.strand(merged).unwrap();
    assert_eq!(strand.idxs(), (5, 12));
    assert_eq!(strand.oligo(), b_oligo);
    assert_eq!(strand.color(), 0xFF_222222);
    part.check_invariants();
}

#[test]
fn merge_concatenates_sequences() {
    let (mut part, mut stack) = one_helix_part(20);
    let a = part.create_strand(&mut stack, REV, 5, 6, true).unwrap();
    let b = part.create_strand(&mut stack, REV, 7, 9, true).unwrap();
    part.apply_sequence(&mut stack, a, Some("AC".to_string()), true)
        .unwrap();
    part.apply_sequence(&mut stack, b, Some("GTT".to_string()), true)
        .unwrap();
    let merged = part.merge_strands(&mut stack, a, b, true).unwrap();
    // b holds the 5' end of the merged reverse strand
    assert_eq!(part.strand(merged).unwrap().sequence(), Some("GTTAC"));
}

#[test]
fn merge_rejections() {
    let (mut part, mut stack) = one_helix_part(20);
    let a = part.create_strand(&mut stack, FWD, 2, 4, true).unwrap();
    let b = part.create_strand(&mut stack, FWD, 6, 8, true).unwrap();
    let c = part.create_strand(&mut stack, FWD, 9, 11, true).unwrap();
    let d = part.create_strand(&mut stack, REV, 2, 4, true).unwrap();
    assert_eq!(
        part.merge_strands(&mut stack, a, b, true),
        Err(StrandSetError::NotMergeable)
    );
    assert_eq!(
        part.merge_strands(&mut stack, a, d, true),
        Err(StrandSetError::NotMergeable)
    );
    part.create_xover(&mut stack, b, c, true).unwrap();
    assert!(!part.strands_can_be_merged(b, c));
    assert_eq!(
        part.merge_strands(&mut stack, b, c, true),
        Err(StrandSetError::NotMergeable)
    );
    let removed = a;
    part.remove_strand(&mut stack, removed, true).unwrap();
    assert_eq!(
        part.merge_strands(&mut stack, removed, b, true),
        Err(StrandSetError::NotInSet)
    );
}

#[test]
fn undo_redo_restore_exact_structure() {
    let (mut part, mut stack) = one_helix_part(30);
    let initial = copy_of(&part, FWD);

    let strand = part.create_strand(&mut stack, FWD, 4, 20, true).unwrap();
    let created = copy_of(&part, FWD);
    let (low, high) = part.split_strand(&mut stack, strand, 10, false, true).unwrap();
    let split = copy_of(&part, FWD);
    part.merge_strands(&mut stack, high, low, true).unwrap();
    let merged = copy_of(&part, FWD);
    let other = part.create_strand(&mut stack, FWD, 24, 27, true).unwrap();
    let created_other = copy_of(&part, FWD);
    part.remove_strand(&mut stack, other, true).unwrap();
    let removed = copy_of(&part, FWD);

    let states = [initial, created, split, merged, created_other, removed];
    for expected in states.iter().rev().skip(1) {
        assert!(stack.undo(&mut part));
        part.check_invariants();
        assert_eq!(&copy_of(&part, FWD), expected);
    }
    assert!(!stack.undo(&mut part));
    for expected in states.iter().skip(1) {
        assert!(stack.redo(&mut part));
        part.check_invariants();
        assert_eq!(&copy_of(&part, FWD), expected);
    }
    assert!(!stack.redo(&mut part));
}

#[test]
fn new_command_clears_redo() {
    let (mut part, mut stack) = one_helix_part(20);
    part.create_strand(&mut stack, FWD, 0, 3, true).unwrap();
    assert!(stack.undo(&mut part));
    assert!(stack.can_redo());
    part.create_strand(&mut stack, FWD, 5, 8, true).unwrap();
    assert!(!stack.can_redo());
    assert_eq!(stack.undo_text(), Some("Create strand"));
}

#[test]
fn commands_without_undostack_are_not_recorded() {
    let (mut part, mut stack) = one_helix_part(20);
    let strand = part.create_strand(&mut stack, FWD, 0, 10, false).unwrap();
    part.split_strand(&mut stack, strand, 5, false, false)
        .unwrap();
    assert_eq!(stack.count(), 0);
    assert_eq!(bounds(&part, FWD), vec![(0, 4), (5, 10)]);
}

#[test]
fn empty_macros_are_discarded() {
    let (mut part, mut stack) = one_helix_part(20);
    stack.begin_macro("nothing");
    assert!(stack.is_in_macro());
    assert!(!stack.undo(&mut part));
    stack.end_macro();
    assert_eq!(stack.count(), 0);
}

#[test]
fn remove_all_strands_one_entry_each() {
    let (mut part, mut stack) = one_helix_part(30);
    let a = part.create_strand(&mut stack, FWD, 0, 5, true).unwrap();
    part.create_strand(&mut stack, FWD, 8, 12, true).unwrap();
    part.create_strand(&mut stack, FWD, 15, 20, true).unwrap();
    let d = part.create_strand(&mut stack, REV, 0, 5, true).unwrap();
    part.create_xover(&mut stack, a, d, true).unwrap();
    let before = copy_of(&part, FWD);
    let before_rev = copy_of(&part, REV);
    let count = stack.count();

    part.remove_all_strands(&mut stack, FWD, true).unwrap();
    assert!(part.strand_set(FWD).unwrap().is_empty());
    assert_eq!(stack.count(), count + 3);
    assert_eq!(part.strand(d).unwrap().connection_5p(), None);
    part.check_invariants();

    for _ in 0..3 {
        assert!(stack.undo(&mut part));
        part.check_invariants();
    }
    assert_eq!(copy_of(&part, FWD), before);
    assert_eq!(copy_of(&part, REV), before_rev);
    assert_eq!(part.strand(d).unwrap().connection_5p(), Some(a));
}

#[test]
fn remove_strand_set_is_one_entry() {
    let (mut part, mut stack) = one_helix_part(30);
    part.create_strand(&mut stack, FWD, 0, 5, true).unwrap();
    part.create_strand(&mut stack, FWD, 8, 12, true).unwrap();
    let before = copy_of(&part, FWD);
    let count = stack.count();
    part.remove_strand_set(&mut stack, FWD, true).unwrap();
    assert_eq!(stack.count(), count + 1);
    assert_eq!(stack.undo_text(), Some("Delete StrandSet"));
    assert!(stack.undo(&mut part));
    assert_eq!(copy_of(&part, FWD), before);
}

#[test]
fn remove_clears_sequence_first() {
    let (mut part, mut stack) = one_helix_part(20);
    let strand = part.create_strand(&mut stack, FWD, 0, 3, true).unwrap();
    part.apply_sequence(&mut stack, strand, Some("ACGT".to_string()), true)
        .unwrap();
    let log = NotificationLog::new_shared();
    part.subscribe(log.clone());
    part.remove_strand(&mut stack, strand, true).unwrap();
    {
        let log = log.lock().unwrap();
        assert_eq!(
            log.notifications[0],
            PartNotification::StrandSequenceChanged(strand)
        );
    }
    assert!(stack.undo(&mut part));
    assert_eq!(part.strand(strand).unwrap().sequence(), Some("ACGT"));
}

#[test]
fn remove_strand_not_in_set() {
    let (mut part, mut stack) = one_helix_part(20);
    let strand = part.create_strand(&mut stack, FWD, 0, 3, true).unwrap();
    let wrong = StrandAddress {
        set: FWD,
        strand: StrandId(strand.strand.0 + 10),
    };
    assert_eq!(
        part.remove_strand(&mut stack, wrong, true),
        Err(StrandSetError::NotInSet)
    );
    let wrong_set = StrandAddress { set: REV, ..strand };
    assert_eq!(
        part.remove_strand(&mut stack, wrong_set, true),
        Err(StrandSetError::NotInSet)
    );
}

#[test]
fn xover_propagates_oligo() {
    let (mut part, mut stack) = one_helix_part(20);
    let a = part.create_strand(&mut stack, FWD, 0, 5, true).unwrap();
    let b = part.create_strand(&mut stack, REV, 0, 5, true).unwrap();
    let c = part.create_strand(&mut stack, FWD, 10, 15, true).unwrap();
    part.create_xover(&mut stack, b, c, true).unwrap();
    let a_oligo = part.strand(a).unwrap().oligo();
    let c_oligo = part.strand(c).unwrap().oligo();

    part.create_xover(&mut stack, a, b, true).unwrap();
    assert_eq!(part.oligo_chain(c), vec![a, b, c]);
    for strand in [a, b, c].iter() {
        assert_eq!(part.strand(*strand).unwrap().oligo(), a_oligo);
    }
    assert_eq!(
        part.create_xover(&mut stack, a, c, true),
        Err(StrandSetError::XoverRejected)
    );
    assert_eq!(
        part.create_xover(&mut stack, c, c, true),
        Err(StrandSetError::XoverRejected)
    );

    part.remove_xover(&mut stack, b, true).unwrap();
    assert_eq!(part.strand(a).unwrap().oligo(), a_oligo);
    assert_eq!(part.strand(b).unwrap().oligo(), a_oligo);
    let new_oligo = part.strand(c).unwrap().oligo();
    assert_ne!(new_oligo, a_oligo);
    assert_ne!(new_oligo, c_oligo);
    assert_eq!(
        part.remove_xover(&mut stack, c, true),
        Err(StrandSetError::XoverRejected)
    );

    assert!(stack.undo(&mut part));
    assert_eq!(part.strand(c).unwrap().oligo(), a_oligo);
    assert!(stack.undo(&mut part));
    assert_eq!(part.strand(c).unwrap().oligo(), c_oligo);
    assert_eq!(part.strand(a).unwrap().connection_3p(), None);
    part.check_invariants();
}

#[test]
fn split_repoints_xovers() {
    let (mut part, mut stack) = one_helix_part(30);
    let a = part.create_strand(&mut stack, FWD, 0, 20, true).unwrap();
    let b = part.create_strand(&mut stack, REV, 0, 20, true).unwrap();
    let c = part.create_strand(&mut stack, REV, 25, 29, true).unwrap();
    part.create_xover(&mut stack, a, b, true).unwrap();
    part.create_xover(&mut stack, c, a, true).unwrap();
    let oligo = part.strand(a).unwrap().oligo();

    let (low, high) = part.split_strand(&mut stack, a, 10, false, true).unwrap();
    part.check_invariants();
    assert_eq!(part.strand(c).unwrap().connection_3p(), Some(low));
    assert_eq!(part.strand(b).unwrap().connection_5p(), Some(high));
    assert_eq!(part.strand(low).unwrap().oligo(), oligo);
    let new_oligo = part.strand(high).unwrap().oligo();
    assert_ne!(new_oligo, oligo);
    assert_eq!(part.strand(b).unwrap().oligo(), new_oligo);

    assert!(stack.undo(&mut part));
    part.check_invariants();
    assert_eq!(part.strand(c).unwrap().connection_3p(), Some(a));
    assert_eq!(part.strand(b).unwrap().connection_5p(), Some(a));
    assert_eq!(part.strand(b).unwrap().oligo(), oligo);
}

#[test]
fn split_shares_sequence() {
    let (mut part, mut stack) = one_helix_part(20);
    let fwd = part.create_strand(&mut stack, FWD, 0, 7, true).unwrap();
    let rev = part.create_strand(&mut stack, REV, 0, 7, true).unwrap();
    part.apply_sequence(&mut stack, fwd, Some("AACCGGTT".to_string()), true)
        .unwrap();
    part.apply_sequence(&mut stack, rev, Some("AACCGGTT".to_string()), true)
        .unwrap();
    let (low, high) = part.split_strand(&mut stack, fwd, 3, true, true).unwrap();
    assert_eq!(part.strand(low).unwrap().sequence(), Some("AAC"));
    assert_eq!(part.strand(high).unwrap().sequence(), Some("CGGTT"));
    let (low, high) = part.split_strand(&mut stack, rev, 3, true, true).unwrap();
    assert_eq!(part.strand(high).unwrap().sequence(), Some("AACCG"));
    assert_eq!(part.strand(low).unwrap().sequence(), Some("GTT"));
    let (_, high) = part.split_strand(&mut stack, high, 6, false, true).unwrap();
    assert_eq!(part.strand(high).unwrap().sequence(), None);
}

#[test]
fn apply_sequence_to_oligo() {
    let (mut part, mut stack) = one_helix_part(20);
    let a = part.create_strand(&mut stack, FWD, 0, 2, true).unwrap();
    let b = part.create_strand(&mut stack, REV, 0, 3, true).unwrap();
    part.create_xover(&mut stack, a, b, true).unwrap();
    part.apply_sequence(&mut stack, b, Some("ACGTT".to_string()), true)
        .unwrap();
    assert_eq!(part.strand(a).unwrap().sequence(), Some("ACG"));
    assert_eq!(part.strand(b).unwrap().sequence(), Some("TT??"));
    part.apply_sequence(&mut stack, a, None, true).unwrap();
    assert_eq!(part.strand(b).unwrap().sequence(), None);
    assert!(stack.undo(&mut part));
    assert_eq!(part.strand(b).unwrap().sequence(), Some("TT??"));
}

#[test]
fn set_color_undo() {
    let (mut part, mut stack) = one_helix_part(20);
    let strand = part.create_strand(&mut stack, REV, 0, 2, true).unwrap();
    let color = part.strand(strand).unwrap().color();
    assert_eq!(color, Parameters::DEFAULT.staple_colors[strand.strand.0 % 12]);
    part.set_strand_color(&mut stack, strand, 0xFF_ABCDEF, true)
        .unwrap();
    assert_eq!(part.strand(strand).unwrap().color(), 0xFF_ABCDEF);
    assert!(stack.undo(&mut part));
    assert_eq!(part.strand(strand).unwrap().color(), color);
}

#[test]
fn scaffold_color() {
    let (mut part, mut stack) = one_helix_part(20);
    let strand = part.create_strand(&mut stack, FWD, 0, 2, true).unwrap();
    assert_eq!(
        part.strand(strand).unwrap().color(),
        Parameters::DEFAULT.scaffold_color
    );
}

#[test]
fn virtual_helix_command_notifications() {
    init_logger();
    let mut part = Part::new("vh", Parameters::DEFAULT);
    let mut stack = UndoStack::new();
    let log = NotificationLog::new_shared();
    part.subscribe(log.clone());
    let id_num = part
        .create_virtual_helix(&mut stack, (1., 2.), None, None, true)
        .unwrap();
    assert_eq!(id_num, 0);
    assert_eq!(part.virtual_helix(0).unwrap().id_num(), Some(0));
    assert_eq!(part.virtual_helix(0).unwrap().part(), Some(part.id()));
    assert_eq!(part.virtual_helix(0).unwrap().length(), 42);
    assert_eq!(
        log.lock().unwrap().notifications,
        vec![
            PartNotification::VirtualHelixAdded {
                part: part.id(),
                id_num: 0,
                origin: (1., 2.)
            },
            PartNotification::LayoutChanged { part: part.id() },
        ]
    );
    log.lock().unwrap().clear();

    assert!(stack.undo(&mut part));
    assert!(part.virtual_helix(0).is_none());
    assert!(!part.is_id_num_reserved(0));
    assert_eq!(
        log.lock().unwrap().notifications,
        vec![
            PartNotification::VirtualHelixRemoved {
                part: part.id(),
                id_num: 0,
                origin: (1., 2.)
            },
            PartNotification::LayoutChanged { part: part.id() },
        ]
    );

    assert!(stack.redo(&mut part));
    assert!(part.is_id_num_reserved(0));
    assert_eq!(part.virtual_helix(0).unwrap().id_num(), Some(0));
}

#[test]
fn virtual_helix_ids() {
    let (mut part, mut stack) = one_helix_part(20);
    for expected in 1..3 {
        let id = part
            .create_virtual_helix(&mut stack, (0., 0.), None, None, true)
            .unwrap();
        assert_eq!(id, expected);
    }
    assert_eq!(
        part.create_virtual_helix(&mut stack, (0., 0.), None, Some(1), true),
        Err(PartError::IdNumberInUse(1))
    );
    part.remove_virtual_helix(&mut stack, 1, true).unwrap();
    assert!(!part.is_id_num_reserved(1));
    let id = part
        .create_virtual_helix(&mut stack, (0., 0.), None, None, true)
        .unwrap();
    assert_eq!(id, 1);
    assert_eq!(
        part.create_virtual_helix(&mut stack, (0., 0.), None, Some(10), true),
        Ok(10)
    );
}

#[test]
fn remove_virtual_helix_with_strands() {
    let (mut part, mut stack) = one_helix_part(20);
    part.create_virtual_helix(&mut stack, (0., 0.), None, None, false)
        .unwrap();
    let a = part.create_strand(&mut stack, FWD, 0, 4, true).unwrap();
    let b = part
        .create_strand(&mut stack, StrandSetId::rev(1), 0, 4, true)
        .unwrap();
    part.create_xover(&mut stack, a, b, true).unwrap();
    let count = stack.count();

    part.remove_virtual_helix(&mut stack, 0, true).unwrap();
    assert_eq!(stack.count(), count + 1);
    assert!(part.virtual_helix(0).is_none());
    assert_eq!(part.strand(b).unwrap().connection_5p(), None);
    part.check_invariants();

    assert!(stack.undo(&mut part));
    assert_eq!(part.strand(a).unwrap().idxs(), (0, 4));
    assert_eq!(part.strand(b).unwrap().connection_5p(), Some(a));
    part.check_invariants();
    assert_eq!(
        part.remove_virtual_helix(&mut stack, 5, true),
        Err(PartError::NoSuchVirtualHelix(5))
    );
}

#[test]
fn resize_shifts_strands() {
    let (mut part, mut stack) = one_helix_part(20);
    let strand = part.create_strand(&mut stack, FWD, 2, 4, true).unwrap();
    part.resize_virtual_helix(0, 3, 2).unwrap();
    assert_eq!(part.virtual_helix(0).unwrap().length(), 25);
    assert_eq!(part.strand(strand).unwrap().idxs(), (5, 7));
    assert_eq!(
        part.strand_set(FWD).unwrap().strand_at(6).map(|s| s.address()),
        Some(strand)
    );
    part.resize_virtual_helix(0, 0, -10).unwrap();
    assert_eq!(part.max_base_idx(0), Some(14));
    part.check_invariants();
    assert_eq!(
        part.resize_virtual_helix(4, 1, 1),
        Err(PartError::NoSuchVirtualHelix(4))
    );
}

#[test]
fn legacy_array_links() {
    let (mut part, mut stack) = one_helix_part(8);
    part.create_strand(&mut stack, FWD, 2, 4, true).unwrap();
    part.create_strand(&mut stack, REV, 2, 4, true).unwrap();
    let fwd = part.strand_set(FWD).unwrap().legacy_array(&part);
    assert_eq!(fwd.len(), 8);
    assert_eq!(fwd[0], [-1, -1, -1, -1]);
    assert_eq!(fwd[2], [-1, -1, 0, 3]);
    assert_eq!(fwd[3], [0, 2, 0, 4]);
    assert_eq!(fwd[4], [0, 3, -1, -1]);
    let rev = part.strand_set(REV).unwrap().legacy_array(&part);
    assert_eq!(rev[4], [-1, -1, 0, 3]);
    assert_eq!(rev[3], [0, 4, 0, 2]);
    assert_eq!(rev[2], [0, 3, -1, -1]);
}

#[test]
fn legacy_array_xover() {
    let (mut part, mut stack) = one_helix_part(8);
    let a = part.create_strand(&mut stack, FWD, 2, 4, true).unwrap();
    let b = part.create_strand(&mut stack, REV, 2, 4, true).unwrap();
    part.create_xover(&mut stack, a, b, true).unwrap();
    let fwd = part.strand_set(FWD).unwrap().legacy_array(&part);
    assert_eq!(fwd[4], [0, 3, 0, 4]);
    let rev = part.strand_set(REV).unwrap().legacy_array(&part);
    assert_eq!(rev[4], [0, 4, 0, 3]);
}

#[test]
fn dump_records_xovers() {
    let (mut part, mut stack) = one_helix_part(20);
    part.create_virtual_helix(&mut stack, (0., 2.25), Some(20), None, true)
        .unwrap();
    let a = part.create_strand(&mut stack, FWD, 0, 9, true).unwrap();
    let b = part
        .create_strand(&mut stack, StrandSetId::rev(1), 3, 9, true)
        .unwrap();
    part.create_xover(&mut stack, a, b, true).unwrap();
    let mut xovers = Vec::new();
    let (idxs, colors) = part.strand_set(FWD).unwrap().dump(&part, &mut xovers);
    assert_eq!(idxs, vec![(0, 9)]);
    assert_eq!(colors, vec![Parameters::DEFAULT.scaffold_color]);
    assert_eq!(xovers, vec![XoverRecord(0, true, 9, 1, false, 9)]);
    assert_eq!(
        serde_json::to_string(&xovers[0]).unwrap(),
        "[0,true,9,1,false,9]"
    );
}

#[test]
fn dump_round_trip() {
    let (mut part, mut stack) = one_helix_part(30);
    part.create_virtual_helix(&mut stack, (2.25, 0.), Some(30), Some(3), true)
        .unwrap();
    let a = part.create_strand(&mut stack, FWD, 0, 9, true).unwrap();
    let b = part.create_strand(&mut stack, REV, 12, 20, true).unwrap();
    let c = part
        .create_strand(&mut stack, StrandSetId::rev(3), 0, 9, true)
        .unwrap();
    let d = part
        .create_strand(&mut stack, StrandSetId::fwd(3), 12, 20, true)
        .unwrap();
    part.set_strand_color(&mut stack, b, 0xFF_123456, true)
        .unwrap();
    part.create_xover(&mut stack, a, c, true).unwrap();
    part.create_xover(&mut stack, d, b, true).unwrap();

    let dump = part.dump();
    assert_eq!(dump.xovers.len(), 2);
    let json = serde_json::to_string(&dump).unwrap();
    let read: PartDump = serde_json::from_str(&json).unwrap();
    assert_eq!(read, dump);
    let copy = Part::from_dump(&read, Parameters::DEFAULT).unwrap();
    copy.check_invariants();
    assert_eq!(copy.dump(), dump);
    let chain = copy.oligo_chain(copy.dump_address(0, true, 0));
    assert_eq!(chain.len(), 2);
}

impl Part {
    fn dump_address(&self, id_num: usize, is_fwd: bool, idx: usize) -> StrandAddress {
        self.strand_set(StrandSetId { id_num, is_fwd })
            .and_then(|s| s.strand_at(idx))
            .map(|s| s.address())
            .unwrap()
    }
}

#[test]
fn from_dump_rejects_dangling_xover() {
    init_logger();
    let dump = PartDump {
        name: "broken".to_string(),
        virtual_helices: vec![VirtualHelixDump {
            id_num: 0,
            origin: (0., 0.),
            length: 10,
            fwd_idxs: vec![(0, 4)],
            fwd_colors: vec![0],
            rev_idxs: vec![],
            rev_colors: vec![],
        }],
        xovers: vec![XoverRecord(0, true, 4, 0, false, 4)],
    };
    assert_eq!(
        Part::from_dump(&dump, Parameters::DEFAULT).err(),
        Some(PartError::StrandSet(StrandSetError::NoSuchStrand))
    );
}

#[test]
fn parameters_from_json() {
    let json = r#"{
        "default_helix_length": 21,
        "scaffold_color": 4278190335,
        "staple_colors": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]
    }"#;
    let parameters = Parameters::from_json_str(json).unwrap();
    assert_eq!(parameters.default_helix_length, 21);
    assert!(parameters.use_undostack);
    assert_eq!(parameters.color_for(REV, 13), 2);
    assert!(Parameters::is_scaffold(StrandSetId::rev(1)));
    assert!(!Parameters::is_scaffold(REV));
}

#[test]
fn strand_type_conversion() {
    assert_eq!(StrandType::from_is_fwd(false), StrandType::Rev);
    assert!(StrandType::Fwd.is_fwd());
    assert_eq!(FWD.strand_type(), StrandType::Fwd);
    assert_eq!(FWD.complement(), REV);
    assert_eq!(REV.to_string(), "<rev_StrandSet(0)>");
}

#[test]
fn from_dump_rejects_overlapping_strands() {
    let (mut part, mut stack) = one_helix_part(20);
    part.create_strand(&mut stack, FWD, 2, 8, false).unwrap();
    let mut dump = part.dump();
    dump.virtual_helices[0].fwd_idxs.push((5, 10));
    dump.virtual_helices[0].fwd_colors.push(0);
    assert_eq!(
        Part::from_dump(&dump, Parameters::DEFAULT).err(),
        Some(PartError::StrandSet(StrandSetError::Overlap { low: 5, high: 10 }))
    );
}

/// A random strand of `set`, if the set is not empty
fn pick_strand(rng: &mut StdRng, part: &Part, set: StrandSetId) -> Option<StrandAddress> {
    let strands: Vec<StrandAddress> = part
        .strand_set(set)
        .unwrap()
        .strands()
        .map(|s| s.address())
        .collect();
    if strands.is_empty() {
        None
    } else {
        Some(strands[rng.gen_range(0..strands.len())])
    }
}

/// Apply one random valid modification. Return false if nothing was applied.
fn random_modification(
    rng: &mut StdRng,
    part: &mut Part,
    stack: &mut UndoStack,
    length: usize,
) -> bool {
    let set = if rng.gen_bool(0.5) { FWD } else { REV };
    match rng.gen_range(0..5) {
        0 => {
            let low = rng.gen_range(0..length);
            let empty = part
                .strand_set(set)
                .unwrap()
                .bounds_of_empty_region_containing(low);
            if let Some((_, high_bound)) = empty {
                let high = rng.gen_range(low..=high_bound);
                part.create_strand(stack, set, low, high, true).unwrap();
                true
            } else {
                false
            }
        }
        1 => match pick_strand(rng, part, set) {
            Some(strand) => {
                part.remove_strand(stack, strand, true).unwrap();
                true
            }
            None => false,
        },
        2 => {
            let strand = match pick_strand(rng, part, set) {
                Some(strand) => strand,
                None => return false,
            };
            let (low, high) = part.strand(strand).unwrap().idxs();
            let idx = rng.gen_range(low..=high);
            if StrandSet::strand_can_be_split(part.strand(strand).unwrap(), idx) {
                part.split_strand(stack, strand, idx, true, true).unwrap();
                true
            } else {
                false
            }
        }
        3 => {
            let strand = match pick_strand(rng, part, set) {
                Some(strand) => strand,
                None => return false,
            };
            let higher = part
                .strand_set(set)
                .unwrap()
                .neighbors(strand.strand)
                .unwrap()
                .1
                .map(|s| s.address());
            match higher {
                Some(higher) if part.strands_can_be_merged(strand, higher) => {
                    part.merge_strands(stack, higher, strand, true).unwrap();
                    true
                }
                _ => false,
            }
        }
        _ => {
            let prime5 = pick_strand(rng, part, FWD);
            let prime3 = pick_strand(rng, part, REV);
            if let (Some(prime5), Some(prime3)) = (prime5, prime3) {
                part.create_xover(stack, prime5, prime3, true).is_ok()
            } else {
                false
            }
        }
    }
}

#[test]
fn random_modifications_keep_invariants() {
    let length = 40;
    let (mut part, mut stack) = one_helix_part(length);
    part.create_strand(&mut stack, FWD, 3, 15, false).unwrap();
    part.create_strand(&mut stack, REV, 10, 30, false).unwrap();
    let initial = (copy_of(&part, FWD), copy_of(&part, REV));
    let mut rng = StdRng::seed_from_u64(2021);

    for _ in 0..2000 {
        if rng.gen_bool(0.2) {
            if rng.gen_bool(0.5) {
                stack.undo(&mut part);
            } else {
                stack.redo(&mut part);
            }
        } else {
            random_modification(&mut rng, &mut part, &mut stack, length);
        }
        part.check_invariants();
    }

    while stack.undo(&mut part) {
        part.check_invariants();
    }
    assert_eq!(copy_of(&part, FWD), initial.0);
    assert_eq!(copy_of(&part, REV), initial.1);
}
