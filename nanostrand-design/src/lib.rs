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
//! This crate defines the strand model of nanostrand.
//!
//! Strands are directed intervals of a virtual helix. Each virtual helix carries two `StrandSet`,
//! one for each direction, and every `StrandSet` maintains its strands sorted and non overlapping.
//!
//! All modifications of a `Part` go through reversible `UndoCommand`s that are executed by an
//! `UndoStack` handed over by the caller. Observers registered on the part are notified
//! synchronously of every change.

#[macro_use]
extern crate serde_derive;
extern crate serde;

mod strand;
pub use strand::*;
mod strandset;
pub use strandset::*;
mod virtual_helix;
pub use virtual_helix::*;
mod part;
pub use part::*;
mod oligo;
pub use oligo::OligoId;
mod notification;
pub use notification::*;
mod parameters;
pub use parameters::*;

pub mod commands;
pub use commands::{UndoCommand, UndoStack};

#[cfg(test)]
mod tests;
