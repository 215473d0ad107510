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
//! Translation of the `DesignOperation`s requested by the user interface into modifications of a
//! part.

use nanostrand_design::{Part, PartError, StrandSetError, UndoStack};
use nanostrand_interactor::DesignOperation;
use std::borrow::Cow;
use std::fmt;

/// A label describing an operation.
/// To create a `TransitionLabel`, use its `From<String>` or `From<'static str>` implementation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionLabel(Cow<'static, str>);

impl<T: Into<Cow<'static, str>>> From<T> for TransitionLabel {
    fn from(x: T) -> Self {
        Self(x.into())
    }
}

impl AsRef<str> for TransitionLabel {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for TransitionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OkOperation {
    /// The operation was applied but cannot be undone
    NotUndoable,
    /// The operation was recorded on the undo stack
    Undoable { label: TransitionLabel },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrOperation {
    /// The part refused the modification
    Refused(PartError),
    /// The undo stack is in a state incompatible with applying the operation
    IncompatibleState,
}

impl From<PartError> for ErrOperation {
    fn from(e: PartError) -> Self {
        Self::Refused(e)
    }
}

impl From<StrandSetError> for ErrOperation {
    fn from(e: StrandSetError) -> Self {
        Self::Refused(e.into())
    }
}

impl fmt::Display for ErrOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refused(e) => write!(f, "{}", e),
            Self::IncompatibleState => write!(f, "Operation impossible in the current state"),
        }
    }
}

impl std::error::Error for ErrOperation {}

#[derive(Clone, Debug, Default)]
pub(crate) struct Controller {
    /// Number of operations successfully applied
    nb_applied: usize,
}

impl Controller {
    /// Apply an operation to the part. This either modifies the part, or results in an error that
    /// could be shown to the user to explain why the requested operation could not be applied.
    pub fn apply_operation(
        &mut self,
        part: &mut Part,
        undo_stack: &mut UndoStack,
        operation: DesignOperation,
    ) -> Result<OkOperation, ErrOperation> {
        if undo_stack.is_in_macro() {
            return Err(ErrOperation::IncompatibleState);
        }
        let label = operation.description();
        let use_undostack = part.parameters().use_undostack && operation.is_undoable();
        match Self::apply(part, undo_stack, operation, use_undostack) {
            Ok(()) => {
                self.nb_applied += 1;
                log::debug!("Applied {}", label);
                if use_undostack {
                    Ok(OkOperation::Undoable {
                        label: label.into(),
                    })
                } else {
                    Ok(OkOperation::NotUndoable)
                }
            }
            Err(e) => {
                log::warn!("Could not apply {}: {}", label, e);
                Err(e)
            }
        }
    }

    pub fn nb_applied(&self) -> usize {
        self.nb_applied
    }

    fn apply(
        part: &mut Part,
        undo_stack: &mut UndoStack,
        operation: DesignOperation,
        use_undostack: bool,
    ) -> Result<(), ErrOperation> {
        match operation {
            DesignOperation::AddVirtualHelix {
                origin,
                length,
                id_num,
            } => {
                part.create_virtual_helix(undo_stack, origin, length, id_num, use_undostack)?;
            }
            DesignOperation::RmVirtualHelix { id_num } => {
                part.remove_virtual_helix(undo_stack, id_num, use_undostack)?
            }
            DesignOperation::ResizeVirtualHelix {
                id_num,
                delta_low,
                delta_high,
            } => part.resize_virtual_helix(id_num, delta_low, delta_high)?,
            DesignOperation::CreateStrand {
                set,
                low_idx,
                high_idx,
            } => {
                part.create_strand(undo_stack, set, low_idx, high_idx, use_undostack)?;
            }
            DesignOperation::RmStrand { strand } => {
                part.remove_strand(undo_stack, strand, use_undostack)?
            }
            DesignOperation::RmAllStrands { set } => {
                part.remove_strand_set(undo_stack, set, use_undostack)?
            }
            DesignOperation::SplitStrand {
                strand,
                idx,
                update_sequence,
            } => {
                part.split_strand(undo_stack, strand, idx, update_sequence, use_undostack)?;
            }
            DesignOperation::MergeStrands { priority, other } => {
                part.merge_strands(undo_stack, priority, other, use_undostack)?;
            }
            DesignOperation::Xover { prime5, prime3 } => {
                part.create_xover(undo_stack, prime5, prime3, use_undostack)?
            }
            DesignOperation::RmXover { prime5 } => {
                part.remove_xover(undo_stack, prime5, use_undostack)?
            }
            DesignOperation::ApplySequence { strand, sequence } => {
                part.apply_sequence(undo_stack, strand, sequence, use_undostack)?
            }
            DesignOperation::ChangeColor { strand, color } => {
                part.set_strand_color(undo_stack, strand, color, use_undostack)?
            }
        }
        Ok(())
    }
}
