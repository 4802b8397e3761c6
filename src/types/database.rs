use crate::types::message::Message;

/// In-memory representation of a CAN database.
///
/// Holds the version string (carried to/from the DBC `VERSION` line) and the
/// ordered list of messages. Message order is insertion order and is
/// preserved by both codecs, so a database exports the same way it was
/// built.
///
/// A `Database` is constructed fresh on each conversion and never mutated
/// after being handed to the opposite-direction codec.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct Database {
    /// Database version string. Empty when unknown.
    pub version: String,
    /// Messages, in insertion order.
    pub messages: Vec<Message>,
}

impl Database {
    /// Appends a message, preserving insertion order.
    pub fn add_message(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    /// Returns a reference to a message by numeric CAN ID.
    pub fn get_message_by_id(&self, id: u32) -> Option<&Message> {
        self.messages.iter().find(|msg| msg.id == id)
    }

    /// Returns a mutable reference to a message by numeric CAN ID.
    pub fn get_message_by_id_mut(&mut self, id: u32) -> Option<&mut Message> {
        self.messages.iter_mut().find(|msg| msg.id == id)
    }

    /// Returns a reference to a message by name (case-insensitive).
    pub fn get_message_by_name(&self, name: &str) -> Option<&Message> {
        self.messages
            .iter()
            .find(|msg| msg.name.eq_ignore_ascii_case(name))
    }

    /// Total number of signals across all messages.
    pub fn signal_count(&self) -> usize {
        self.messages.iter().map(|msg| msg.signals.len()).sum()
    }
}
