//! Location-changed notifications over `std::sync::mpsc` channels.

use std::sync::mpsc::{channel, Receiver, Sender};

use celestial_core::Location;

#[derive(Debug, Default)]
pub struct LocationEvents {
    subscribers: Vec<Sender<Location>>,
}

impl LocationEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<Location> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Sends `location` to every live subscriber; dropped receivers are forgotten.
    pub fn publish(&mut self, location: &Location) {
        self.subscribers
            .retain(|tx| tx.send(location.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
