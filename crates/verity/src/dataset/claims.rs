//! Sparse claim relation with per-item and per-source grouping.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VerityError};

use super::Value;

/// A source asserting that a data item holds a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub source: usize,
    pub item: usize,
    pub value: Value,
}

/// A claim expressed in dense slot indices of its [`ClaimSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotClaim {
    /// Index into [`ClaimSet::sources`].
    pub source: usize,
    /// Index into [`ClaimSet::values`].
    pub value: usize,
}

/// Claims made about one data item.
#[derive(Debug, Clone)]
pub struct ItemClaims {
    item: usize,
    claims: Vec<SlotClaim>,
    values: Vec<usize>,
}

impl ItemClaims {
    /// Data item id.
    pub fn item(&self) -> usize {
        self.item
    }

    /// Every claim on this item, in relation order.
    pub fn claims(&self) -> &[SlotClaim] {
        &self.claims
    }

    /// Distinct value slots claimed for this item, first appearance first.
    pub fn values(&self) -> &[usize] {
        &self.values
    }
}

/// Claims made by one source.
#[derive(Debug, Clone)]
pub struct SourceClaims {
    source: usize,
    values: Vec<usize>,
    n_items: usize,
}

impl SourceClaims {
    /// Source id.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Distinct value slots claimed by this source across all items.
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Number of distinct items this source claims something about.
    pub fn n_items(&self) -> usize {
        self.n_items
    }
}

/// The claim relation consumed by every resolver.
///
/// Items, sources and values are indexed in order of first appearance, and
/// the groupings are computed once at construction.
#[derive(Debug, Clone)]
pub struct ClaimSet {
    claims: Vec<Claim>,
    items: Vec<ItemClaims>,
    sources: Vec<SourceClaims>,
    values: IndexSet<Value>,
    /// Per value slot: row index and source slot of its earliest claim.
    first_claim: Vec<(usize, usize)>,
    /// Per value slot: row index of its earliest claim by any other source.
    rival_claim: Vec<Option<usize>>,
}

impl ClaimSet {
    /// Build a claim set, rejecting the reserved no-claim value `0`.
    pub fn from_claims(claims: impl IntoIterator<Item = Claim>) -> Result<Self> {
        let claims: Vec<Claim> = claims.into_iter().collect();
        if let Some(bad) = claims.iter().find(|c| c.value == 0) {
            return Err(VerityError::InvalidClaim {
                source_id: bad.source,
                item: bad.item,
                message: "value 0 is reserved for 'no claim'".to_string(),
            });
        }
        Ok(Self::from_valid_claims(claims))
    }

    pub(crate) fn from_valid_claims(claims: Vec<Claim>) -> Self {
        let mut values: IndexSet<Value> = IndexSet::new();
        let mut items: IndexMap<usize, (Vec<SlotClaim>, IndexSet<usize>)> = IndexMap::new();
        let mut sources: IndexMap<usize, (IndexSet<usize>, IndexSet<usize>)> = IndexMap::new();

        let mut first_claim: Vec<(usize, usize)> = Vec::new();
        let mut rival_claim: Vec<Option<usize>> = Vec::new();

        for (row, claim) in claims.iter().enumerate() {
            let (value_slot, is_new) = values.insert_full(claim.value);
            let source_entry = sources.entry(claim.source);
            let source_slot = source_entry.index();
            if is_new {
                first_claim.push((row, source_slot));
                rival_claim.push(None);
            } else if rival_claim[value_slot].is_none() && first_claim[value_slot].1 != source_slot {
                rival_claim[value_slot] = Some(row);
            }
            let (source_values, source_items) = source_entry.or_default();
            source_values.insert(value_slot);
            source_items.insert(claim.item);

            let (item_claims, item_values) = items.entry(claim.item).or_default();
            item_claims.push(SlotClaim {
                source: source_slot,
                value: value_slot,
            });
            item_values.insert(value_slot);
        }

        let items = items
            .into_iter()
            .map(|(item, (claims, values))| ItemClaims {
                item,
                claims,
                values: values.into_iter().collect(),
            })
            .collect();
        let sources = sources
            .into_iter()
            .map(|(source, (values, items))| SourceClaims {
                source,
                values: values.into_iter().collect(),
                n_items: items.len(),
            })
            .collect();

        Self {
            claims,
            items,
            sources,
            values,
            first_claim,
            rival_claim,
        }
    }

    /// Number of claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Claims in relation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    /// Items with at least one claim.
    pub fn items(&self) -> &[ItemClaims] {
        &self.items
    }

    /// Sources with at least one claim.
    pub fn sources(&self) -> &[SourceClaims] {
        &self.sources
    }

    /// Number of distinct values across the whole relation.
    pub fn n_values(&self) -> usize {
        self.values.len()
    }

    /// Value stored in a value slot.
    pub fn value(&self, slot: usize) -> Value {
        self.values[slot]
    }

    /// Slot of a value, if any source claims it.
    pub fn value_slot(&self, value: Value) -> Option<usize> {
        self.values.get_index_of(&value)
    }

    /// Value slots claimed by any source other than `source_slot`, ordered by
    /// their earliest claim from such a source.
    pub fn values_claimed_by_others(&self, source_slot: usize) -> Vec<usize> {
        let Some(source) = self.sources.get(source_slot) else {
            return Vec::new();
        };
        // Values first claimed by this source move to their first rival claim.
        let mut moved: Vec<(usize, usize)> = source
            .values
            .iter()
            .filter(|&&v| self.first_claim[v].1 == source_slot)
            .filter_map(|&v| self.rival_claim[v].map(|row| (row, v)))
            .collect();
        moved.sort_unstable();

        let mut ordered = Vec::with_capacity(self.values.len());
        let mut moved = moved.into_iter().peekable();
        for (v, &(row, first_source)) in self.first_claim.iter().enumerate() {
            if first_source == source_slot {
                continue;
            }
            while let Some(&(moved_row, moved_v)) = moved.peek() {
                if moved_row > row {
                    break;
                }
                ordered.push(moved_v);
                moved.next();
            }
            ordered.push(v);
        }
        ordered.extend(moved.map(|(_, v)| v));
        ordered
    }

    /// Distinct values claimed for `item`, first appearance first.
    pub fn item_values(&self, item: usize) -> Vec<Value> {
        self.items
            .iter()
            .find(|group| group.item == item)
            .map(|group| group.values.iter().map(|&v| self.values[v]).collect())
            .unwrap_or_default()
    }

    /// Write the relation as a `source,item,value` CSV file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| VerityError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        for claim in &self.claims {
            writer.serialize(claim)?;
        }
        writer.flush().map_err(|e| VerityError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Read a `source,item,value` CSV file.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| VerityError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));
        let claims = reader
            .deserialize::<Claim>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::from_claims(claims)
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}
