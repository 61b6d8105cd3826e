use std::borrow::Borrow;
use std::collections::HashMap;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bidirectional value <-> dense ID table with per-ID occurrence counters.
///
/// IDs are assigned in first-seen order starting at 0 and never change.
#[derive(Debug, Clone)]
pub struct InternTable<T> {
    items: Vec<T>,
    index: HashMap<T, u32>,
    counts: Vec<u32>,
}

impl<T> Default for InternTable<T> {
    fn default() -> Self {
        InternTable { items: Vec::new(), index: HashMap::new(), counts: Vec::new() }
    }
}

impl<T: Eq + Hash + Clone> InternTable<T> {
    /// Empty table; the first interned value gets ID 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ID of `value`, assigning the next free one if unseen.
    ///
    /// With `counting` set, the occurrence counter of the ID goes up by one
    /// (a new ID starts at 1); otherwise a new ID starts at 0 and an existing
    /// counter is left alone.
    pub fn intern_and_count<Q>(&mut self, value: &Q, counting: bool) -> u32
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = T> + ?Sized,
    {
        if let Some(&id) = self.index.get(value) {
            if counting {
                self.counts[id as usize] += 1;
            }
            return id;
        }

        let id = self.items.len() as u32;
        let owned: T = value.to_owned();
        self.items.push(owned.clone());
        self.index.insert(owned, id);
        self.counts.push(u32::from(counting));
        id
    }

    /// ID of `value` without interning it.
    pub fn get_id<Q>(&self, value: &Q) -> Option<u32>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(value).copied()
    }

    /// Value behind `id`, `None` for IDs never handed out.
    pub fn resolve(&self, id: u32) -> Option<&T> {
        self.items.get(id as usize)
    }

    /// Resolve a list of IDs, dropping unknown ones.
    pub fn resolve_all(&self, ids: &[u32]) -> Vec<T> {
        ids.iter().filter_map(|&id| self.resolve(id).cloned()).collect()
    }

    pub fn count(&self, id: u32) -> Option<u32> {
        self.counts.get(id as usize).copied()
    }

    /// Values in ID order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Counters in ID order, parallel to [`InternTable::items`].
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn stored(&self) -> StoredTableRef<'_, T> {
        StoredTableRef { items: &self.items, counts: &self.counts }
    }

    fn from_stored(stored: StoredTable<T>) -> Result<Self> {
        if stored.items.len() != stored.counts.len() {
            return Err(Error::Persistence(format!(
                "{} items but {} counters",
                stored.items.len(),
                stored.counts.len()
            )));
        }

        let mut index = HashMap::with_capacity(stored.items.len());
        for (id, item) in stored.items.iter().enumerate() {
            if index.insert(item.clone(), id as u32).is_some() {
                return Err(Error::Persistence(format!("duplicate entry at id {}", id)));
            }
        }

        Ok(InternTable { items: stored.items, index, counts: stored.counts })
    }
}

impl<T: Eq + Hash + Clone + Serialize + DeserializeOwned> InternTable<T> {
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, &self.stored())?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let stored: StoredTable<T> = bincode::deserialize_from(reader)?;
        Self::from_stored(stored)
    }
}

/// On-disk form of a table. The index is rebuilt on load.
#[derive(Serialize)]
struct StoredTableRef<'a, T> {
    items: &'a [T],
    counts: &'a [u32],
}

#[derive(Deserialize)]
struct StoredTable<T> {
    items: Vec<T>,
    counts: Vec<u32>,
}

/// The four ID spaces of a tagging log.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub users: InternTable<String>,
    pub resources: InternTable<String>,
    pub tags: InternTable<String>,
    pub categories: InternTable<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let stored =
            (self.users.stored(), self.resources.stored(), self.tags.stored(), self.categories.stored());
        bincode::serialize_into(&mut writer, &stored)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let (users, resources, tags, categories): (
            StoredTable<String>,
            StoredTable<String>,
            StoredTable<String>,
            StoredTable<String>,
        ) = bincode::deserialize_from(reader)?;

        Ok(Vocabulary {
            users: InternTable::from_stored(users)?,
            resources: InternTable::from_stored(resources)?,
            tags: InternTable::from_stored(tags)?,
            categories: InternTable::from_stored(categories)?,
        })
    }
}
