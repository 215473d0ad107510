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
use super::{OligoId, PartId, StrandAddress, StrandSetId, StrandSnapshot};
use std::sync::{Arc, Mutex};

/// A change of the part that observers are notified of.
///
/// Notifications carry identifiers and copies of the relevant values, never references into the
/// part, since they are emitted while the part is being mutated.
#[derive(Clone, Debug, PartialEq)]
pub enum PartNotification {
    StrandAdded {
        set: StrandSetId,
        strand: StrandSnapshot,
    },
    /// Emitted while the strand is still a member of its strand set.
    StrandAboutToBeRemoved {
        set: StrandSetId,
        strand: StrandSnapshot,
    },
    StrandSequenceChanged(StrandAddress),
    StrandConnectionsChanged(StrandAddress),
    StrandColorChanged {
        strand: StrandAddress,
        color: u32,
    },
    OligoChanged {
        strand: StrandAddress,
        oligo: OligoId,
    },
    VirtualHelixAdded {
        part: PartId,
        id_num: usize,
        origin: (f64, f64),
    },
    /// Emitted while the virtual helix is still registered in the part.
    VirtualHelixRemoved {
        part: PartId,
        id_num: usize,
        origin: (f64, f64),
    },
    VirtualHelixResized {
        part: PartId,
        id_num: usize,
        length: usize,
    },
    LayoutChanged {
        part: PartId,
    },
}

/// A component that reacts to the modifications of a part.
///
/// Observers must not try to modify the part from `on_notify`.
pub trait PartObserver {
    fn on_notify(&mut self, notification: &PartNotification);
}

/// The list of observers of a part. Notifications are delivered synchronously, in the order in
/// which the observers subscribed.
#[derive(Default, Clone)]
pub struct Notifier {
    observers: Vec<Arc<Mutex<dyn PartObserver + Send>>>,
}

impl Notifier {
    pub fn subscribe(&mut self, observer: Arc<Mutex<dyn PartObserver + Send>>) {
        self.observers.push(observer)
    }

    pub fn nb_observers(&self) -> usize {
        self.observers.len()
    }

    pub fn emit(&self, notification: PartNotification) {
        log::trace!("notify {:?}", notification);
        for observer in self.observers.iter() {
            match observer.lock() {
                Ok(mut observer) => observer.on_notify(&notification),
                Err(_) => log::error!("Observer poisoned, could not notify {:?}", notification),
            }
        }
    }
}

/// An observer that stores every notification it receives.
#[derive(Default, Debug)]
pub struct NotificationLog {
    pub notifications: Vec<PartNotification>,
}

impl PartObserver for NotificationLog {
    fn on_notify(&mut self, notification: &PartNotification) {
        self.notifications.push(notification.clone())
    }
}

impl NotificationLog {
    pub fn new_shared() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::default()))
    }

    pub fn clear(&mut self) {
        self.notifications.clear()
    }
}
