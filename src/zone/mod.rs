// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory DNS zone and its master-file rendering.
//!
//! A [`Zone`] is a set of resource record sets keyed by owner name and
//! record type. Owner names are kept in DNS canonical order with the apex
//! first; within a name, record sets keep their insertion order.
//!
//! - [`builder`] - assembles the SOA, NS and A records from configuration
//! - [`writer`] - renders a zone as RFC 1035 master-file text

use std::collections::BTreeMap;

use hickory_proto::rr::rdata::SOA;
use hickory_proto::rr::{LowerName, Name, RData, RecordType};

pub mod builder;
pub mod writer;

pub use builder::build_zone;
pub use writer::{to_master_file, write_zone};

/// All records sharing one owner name and record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    name: Name,
    record_type: RecordType,
    ttl: u32,
    rdatas: Vec<RData>,
}

impl RecordSet {
    #[must_use]
    pub fn new(name: Name, record_type: RecordType, ttl: u32) -> Self {
        Self {
            name,
            record_type,
            ttl,
            rdatas: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    #[must_use]
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    #[must_use]
    pub fn rdatas(&self) -> &[RData] {
        &self.rdatas
    }

    /// Add `rdata` to the set. An RR set is a set: identical data is stored
    /// once, and `false` is returned. The set keeps the lowest TTL it has seen.
    pub fn insert(&mut self, rdata: RData, ttl: u32) -> bool {
        self.ttl = self.ttl.min(ttl);
        if self.rdatas.contains(&rdata) {
            return false;
        }
        self.rdatas.push(rdata);
        true
    }
}

/// A DNS zone rooted at `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    origin: Name,
    nodes: BTreeMap<LowerName, Vec<RecordSet>>,
}

impl Zone {
    #[must_use]
    pub fn new(origin: Name) -> Self {
        Self {
            origin,
            nodes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> &Name {
        &self.origin
    }

    /// Add one record, creating its record set if needed.
    ///
    /// A zone holds at most one SOA: adding an SOA replaces any existing one
    /// at that name.
    ///
    /// Returns `false` if identical data was already present.
    pub fn add(&mut self, name: Name, ttl: u32, rdata: RData) -> bool {
        let record_type = rdata.record_type();
        let node = self.nodes.entry(LowerName::new(&name)).or_default();

        let index = match node.iter().position(|set| set.record_type == record_type) {
            Some(index) => index,
            None => {
                node.push(RecordSet::new(name, record_type, ttl));
                node.len() - 1
            }
        };

        let set = &mut node[index];
        if record_type == RecordType::SOA {
            set.rdatas.clear();
            set.ttl = ttl;
        }
        set.insert(rdata, ttl)
    }

    /// Look up the record set for `name` and `record_type`.
    #[must_use]
    pub fn get(&self, name: &Name, record_type: RecordType) -> Option<&RecordSet> {
        self.nodes
            .get(&LowerName::new(name))?
            .iter()
            .find(|set| set.record_type == record_type)
    }

    /// The zone's SOA record, if one has been added at the apex.
    #[must_use]
    pub fn soa(&self) -> Option<&SOA> {
        match self.get(&self.origin, RecordType::SOA)?.rdatas.first()? {
            RData::SOA(soa) => Some(soa),
            _ => None,
        }
    }

    /// Record sets in output order: the apex node first, then every other
    /// owner name in canonical order.
    pub fn record_sets(&self) -> impl Iterator<Item = &RecordSet> {
        let apex = LowerName::new(&self.origin);
        let apex_sets = self.nodes.get(&apex).into_iter().flatten();
        let other_sets = self
            .nodes
            .iter()
            .filter(move |(name, _)| **name != apex)
            .flat_map(|(_, sets)| sets);

        apex_sets.chain(other_sets)
    }

    /// Total number of records across all sets.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.record_sets().map(|set| set.rdatas.len()).sum()
    }
}
