//! The insertion-ordered strings table: lookup, file I/O, and merging.

use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{encoding::Encoding, error::Error, parser, types::LocalizedString};

/// An insertion-ordered mapping from source text to [`LocalizedString`].
///
/// Iteration order is insertion order and is part of the contract: the first
/// successful insert of a key fixes its position, re-assigning an existing
/// key keeps that position, and removing a key then inserting it again
/// appends it at the end. The backing store is an entry vector plus a
/// key-to-position index, so order never depends on hash iteration.
///
/// The table is a pure in-memory structure owned by one caller; it persists
/// only through explicit [`read_from`](StringsTable::read_from) /
/// [`write_to`](StringsTable::write_to) calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringsTable {
    entries: Vec<LocalizedString>,
    index: HashMap<String, usize>,
}

/// Options controlling [`StringsTable::merge`].
///
/// "Keep" refers to the receiving table's own values: with the defaults the
/// receiver's comment and translation win for overlapping keys, and keys
/// missing from the incoming table are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Keep the receiver's comment for keys present in both tables.
    pub keep_comment: bool,
    /// Keep the receiver's translation for keys present in both tables.
    pub keep_localized: bool,
    /// Before merging, drop the receiver's keys that are absent from the
    /// incoming table.
    pub exclude_extra: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            keep_comment: true,
            keep_localized: true,
            exclude_extra: false,
        }
    }
}

impl MergeOptions {
    /// Creates the default options (receiver wins, nothing pruned).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keep_comment(mut self, keep_comment: bool) -> Self {
        self.keep_comment = keep_comment;
        self
    }

    pub fn with_keep_localized(mut self, keep_localized: bool) -> Self {
        self.keep_localized = keep_localized;
        self
    }

    pub fn with_exclude_extra(mut self, exclude_extra: bool) -> Self {
        self.exclude_extra = exclude_extra;
        self
    }
}

impl StringsTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, source: &str) -> bool {
        self.index.contains_key(source)
    }

    // I/O --------------------------------------------------------------

    /// Reads a `.strings` file into a new table.
    pub fn from_path<P: AsRef<Path>>(path: P, encoding: Encoding) -> Result<Self, Error> {
        let mut table = Self::new();
        table.read_from(path, encoding)?;
        Ok(table)
    }

    /// Reads a whole byte stream into a new table.
    pub fn from_reader<R: Read>(reader: R, encoding: Encoding) -> Result<Self, Error> {
        let mut table = Self::new();
        table.read(reader, encoding)?;
        Ok(table)
    }

    /// Parses already-decoded text into a new table.
    pub fn from_content(content: &str) -> Result<Self, Error> {
        let mut table = Self::new();
        table.extend_from_content(content)?;
        Ok(table)
    }

    /// Decodes and parses the file at `path` into this table.
    ///
    /// The file handle is scoped to this call. A malformed line aborts the
    /// load with the entries parsed before it already inserted; the error is
    /// returned, never a partial success claim.
    pub fn read_from<P: AsRef<Path>>(&mut self, path: P, encoding: Encoding) -> Result<(), Error> {
        let bytes = fs::read(path)?;
        self.extend_from_content(&encoding.decode(&bytes)?)
    }

    /// Decodes and parses all bytes from `reader` into this table.
    pub fn read<R: Read>(&mut self, mut reader: R, encoding: Encoding) -> Result<(), Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.extend_from_content(&encoding.decode(&bytes)?)
    }

    /// Parses decoded text and assigns every entry into this table in file
    /// order. Duplicate sources keep the first occurrence's position with
    /// the last occurrence's content.
    pub fn extend_from_content(&mut self, content: &str) -> Result<(), Error> {
        for entry in parser::entries(content) {
            self.insert_entry(entry?);
        }
        Ok(())
    }

    /// Serializes the table to text: each entry's on-disk form, one blank
    /// line between entries, nothing after the final newline. An empty table
    /// produces empty output.
    pub fn to_content(&self) -> String {
        let mut content = String::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                content.push('\n');
            }
            content.push_str(&entry.to_string());
            content.push('\n');
        }
        content
    }

    /// Encodes and writes the table to the file at `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P, encoding: Encoding) -> Result<(), Error> {
        fs::write(path, encoding.encode(&self.to_content()))?;
        Ok(())
    }

    /// Encodes and writes the table to `writer`.
    pub fn write<W: Write>(&self, mut writer: W, encoding: Encoding) -> Result<(), Error> {
        writer.write_all(&encoding.encode(&self.to_content()))?;
        Ok(())
    }

    // Lookup and mutation ----------------------------------------------

    /// Returns the entry for `source`, or [`Error::KeyNotFound`].
    pub fn get(&self, source: &str) -> Result<&LocalizedString, Error> {
        self.index
            .get(source)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| Error::KeyNotFound(source.to_string()))
    }

    /// Mutable variant of [`get`](StringsTable::get).
    pub fn get_mut(&mut self, source: &str) -> Result<&mut LocalizedString, Error> {
        match self.index.get(source) {
            Some(&idx) => Ok(&mut self.entries[idx]),
            None => Err(Error::KeyNotFound(source.to_string())),
        }
    }

    /// Inserts `entry` under `key`, which must equal the entry's source.
    ///
    /// An existing key keeps its position; a new key is appended at the end.
    pub fn assign(&mut self, key: &str, entry: LocalizedString) -> Result<(), Error> {
        if key != entry.source() {
            return Err(Error::KeyMismatch {
                key: key.to_string(),
                source: entry.source().to_string(),
            });
        }
        self.insert_entry(entry);
        Ok(())
    }

    /// Builds an entry and assigns it under its own source. Returns a
    /// mutable reference to the stored entry.
    pub fn insert(
        &mut self,
        source: impl Into<String>,
        translation: Option<String>,
        comment: Option<String>,
    ) -> Result<&mut LocalizedString, Error> {
        let entry = LocalizedString::new(source, translation, comment)?;
        let idx = self.insert_entry(entry);
        Ok(&mut self.entries[idx])
    }

    /// Removes and returns the entry for `source`, or [`Error::KeyNotFound`].
    ///
    /// Later entries shift up; inserting the same key afterwards treats it
    /// as new and appends it at the end.
    pub fn remove(&mut self, source: &str) -> Result<LocalizedString, Error> {
        let idx = self
            .index
            .remove(source)
            .ok_or_else(|| Error::KeyNotFound(source.to_string()))?;
        let entry = self.entries.remove(idx);
        for position in self.index.values_mut() {
            if *position > idx {
                *position -= 1;
            }
        }
        Ok(entry)
    }

    fn insert_entry(&mut self, entry: LocalizedString) -> usize {
        match self.index.get(entry.source()).copied() {
            Some(idx) => {
                self.entries[idx] = entry;
                idx
            }
            None => {
                let idx = self.entries.len();
                self.index.insert(entry.source().to_string(), idx);
                self.entries.push(entry);
                idx
            }
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.source().to_string(), idx))
            .collect();
    }

    // Iteration --------------------------------------------------------

    /// Source keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.source())
    }

    /// Entries in insertion order.
    pub fn strings(&self) -> impl Iterator<Item = &LocalizedString> {
        self.entries.iter()
    }

    /// `(key, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocalizedString)> {
        self.entries.iter().map(|entry| (entry.source(), entry))
    }

    // Merge ------------------------------------------------------------

    /// Reconciles `other` into this table.
    ///
    /// With `exclude_extra`, keys present here but absent from `other` are
    /// removed first. Then, for every key of `other` in its order: an
    /// overlapping key keeps its position here, and its comment/translation
    /// are overwritten from `other` only when the corresponding `keep_*`
    /// option is off; a key new to this table is appended at the end as a
    /// clone of `other`'s entry, so later mutation of either table never
    /// affects the other.
    pub fn merge(&mut self, other: &StringsTable, options: &MergeOptions) {
        if options.exclude_extra {
            self.entries
                .retain(|entry| other.contains_key(entry.source()));
            self.reindex();
        }

        for (source, other_entry) in other.iter() {
            match self.index.get(source).copied() {
                Some(idx) => {
                    let target = &mut self.entries[idx];
                    if !options.keep_comment {
                        target.set_comment(other_entry.comment().map(String::from));
                    }
                    if !options.keep_localized {
                        target.set_translation(other_entry.translation());
                    }
                }
                None => {
                    self.insert_entry(other_entry.clone());
                }
            }
        }
    }

    // Diagnostics ------------------------------------------------------

    /// Sources that appear on more than one assignment line of `content`,
    /// mapped to every parsed occurrence in file order.
    ///
    /// The table itself keeps only one entry per source (first position,
    /// last content), so duplicate detection has to scan the raw entry
    /// stream instead.
    pub fn duplicated_entries_in_content(
        content: &str,
    ) -> Result<HashMap<String, Vec<LocalizedString>>, Error> {
        let mut groups: HashMap<String, Vec<LocalizedString>> = HashMap::new();
        for entry in parser::entries(content) {
            let entry = entry?;
            groups.entry(entry.source().to_string()).or_default().push(entry);
        }
        groups.retain(|_, occurrences| occurrences.len() > 1);
        Ok(groups)
    }

    /// Like [`duplicated_entries_in_content`](Self::duplicated_entries_in_content),
    /// reading and decoding the file at `path` first.
    pub fn duplicated_entries_in_path<P: AsRef<Path>>(
        path: P,
        encoding: Encoding,
    ) -> Result<HashMap<String, Vec<LocalizedString>>, Error> {
        let bytes = fs::read(path)?;
        Self::duplicated_entries_in_content(&encoding.decode(&bytes)?)
    }
}

impl<'a> IntoIterator for &'a StringsTable {
    type Item = (&'a str, &'a LocalizedString);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a LocalizedString)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Serializes as the ordered entry sequence; the key-to-position index is
/// derived state and is rebuilt on deserialization.
impl Serialize for StringsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StringsTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<LocalizedString>::deserialize(deserializer)?;
        let mut table = StringsTable::new();
        for entry in entries {
            table.insert_entry(entry);
        }
        Ok(table)
    }
}
