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
//! nanostrand is the strand edition engine of a DNA nanostructure design tool.
//!
//! The model of the strands, their commands and the undo stack live in `nanostrand_design`, the
//! operations and tools of the user interface in `nanostrand_interactor`. This crate ties them
//! together in a `Document`.

pub use nanostrand_design as design;
pub use nanostrand_interactor as interactor;

mod controller;
pub use controller::{ErrOperation, OkOperation, TransitionLabel};
mod document;
pub use document::*;
