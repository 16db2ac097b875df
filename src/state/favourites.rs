/// The user's favourite launches
///
/// Owned by the application root. Views only read it and ask for changes
/// through `Message::ToggleFavourite`.
use super::data::LaunchRecord;

/// Ordered collection of favourite launches, unique by flight number
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favourites {
    items: Vec<LaunchRecord>,
}

/// What a toggle did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

impl Favourites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an already ordered list, dropping duplicate flight numbers
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut favourites = Self::new();
        for record in records {
            if !favourites.contains(record.flight_number) {
                favourites.items.push(record);
            }
        }
        favourites
    }

    /// Membership is decided by flight number only
    pub fn contains(&self, flight_number: u32) -> bool {
        self.items
            .iter()
            .any(|item| item.flight_number == flight_number)
    }

    /// Append the launch if it is not a favourite yet, otherwise remove it
    pub fn toggle(&mut self, record: &LaunchRecord) -> Toggled {
        match self
            .items
            .iter()
            .position(|item| item.flight_number == record.flight_number)
        {
            Some(index) => {
                self.items.remove(index);
                Toggled::Removed
            }
            None => {
                self.items.push(record.clone());
                Toggled::Added
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LaunchRecord> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
