//! Append-only conversation transcript.

use crate::{Message, Role};

/// Ordered chat history of one session.
///
/// Starts with a seeded assistant greeting and only ever grows; entries
/// are never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// A transcript holding only the assistant greeting.
    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
        }
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of entries authored by `role`.
    pub fn count_by_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role() == role).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_holds_single_greeting() {
        let t = Transcript::seeded("Hi!");
        assert_eq!(t.len(), 1);
        assert_eq!(t.messages()[0], Message::assistant("Hi!"));
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut t = Transcript::seeded("Hi!");
        t.push(Message::user("a"));
        t.push(Message::assistant("b"));
        let contents: Vec<_> = t.iter().map(Message::content).collect();
        assert_eq!(contents, ["Hi!", "a", "b"]);
        assert_eq!(t.count_by_role(Role::Assistant), 2);
        assert_eq!(t.last(), Some(&Message::assistant("b")));
    }
}
