use super::fetch_result::FetchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Position within the sibling UIDs returned by a by-year lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiblingCursor {
    uids: Vec<String>,
    index: usize,
}

impl SiblingCursor {
    pub fn new(uids: Vec<String>) -> Self {
        Self { uids, index: 0 }
    }

    /// Cursor over a result's siblings, positioned on the selected recording
    /// when it is among them.
    pub fn from_result(result: &FetchResult) -> Self {
        let uids = result.item_uids().to_vec();
        let selected = result.recording().and_then(|r| r.uid.as_deref());
        let index = selected
            .and_then(|uid| uids.iter().position(|candidate| candidate == uid))
            .unwrap_or(0);
        Self { uids, index }
    }

    pub fn len(&self) -> usize {
        self.uids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uids.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.uids.get(self.index).map(String::as_str)
    }

    /// UID one step in `direction`, without moving.
    pub fn peek(&self, direction: Direction) -> Option<&str> {
        let target = match direction {
            Direction::Next => self.index.checked_add(1)?,
            Direction::Previous => self.index.checked_sub(1)?,
        };
        self.uids.get(target).map(String::as_str)
    }

    /// Move one step; stays put at either end.
    pub fn advance(&mut self, direction: Direction) -> Option<&str> {
        self.peek(direction)?;
        match direction {
            Direction::Next => self.index += 1,
            Direction::Previous => self.index -= 1,
        }
        self.current()
    }

    pub fn has_next(&self) -> bool {
        self.peek(Direction::Next).is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.peek(Direction::Previous).is_some()
    }
}
