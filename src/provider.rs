//! Record-set level operations on a PowerDNS zone.
//!
//! PowerDNS only edits whole rrsets, so every operation groups its input by
//! (absolute name, type), works out the new content of each affected rrset
//! and sends all of them in a single PATCH.

use std::collections::{BTreeMap, HashMap};

use crate::client::{ClientError, PdnsClient};
use crate::record::{
    absolute_name, canonical_zone, ChangeType, RRSet, Record, RecordContent, Zone, DEFAULT_TTL,
};

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

type RRKey = (String, String);

pub struct Provider {
    client: PdnsClient,
}

impl Provider {
    pub fn new(client: PdnsClient) -> Self {
        Self { client }
    }

    pub async fn get_records(&self, zone: &str) -> Result<Vec<Record>, ProviderError> {
        let zone = canonical_zone(zone);
        let current = self.client.get_zone(&zone).await?;

        let records: Vec<Record> = current
            .rrsets
            .iter()
            .flat_map(|set| {
                set.records
                    .iter()
                    .filter(|r| !r.disabled)
                    .map(|r| Record::from_content(&set.name, &zone, &set.rtype, set.ttl, &r.content))
            })
            .collect();
        tracing::info!(%zone, count = records.len(), "fetched records");
        Ok(records)
    }

    /// Adds records to their rrsets, keeping whatever is already there.
    pub async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, ProviderError> {
        let zone = canonical_zone(zone);
        let groups = group_records(&zone, records)?;
        let existing = index_rrsets(self.client.get_zone(&zone).await?);

        let mut changes = Vec::with_capacity(groups.len());
        let mut stored = Vec::new();
        for ((name, rtype), group) in groups {
            let current = existing.get(&(name.clone(), rtype.clone()));
            let mut contents = current.map(|set| set.records.clone()).unwrap_or_default();
            for record in &group {
                push_unique(&mut contents, record.content());
            }
            let ttl = group_ttl(&group).or(current.map(|set| set.ttl).filter(|&t| t > 0));
            changes.push(replace(name, rtype, ttl.unwrap_or(DEFAULT_TTL), contents));
            stored.extend(group.iter().map(Record::normalized));
        }

        self.client.patch_rrsets(&zone, &changes).await?;
        tracing::info!(%zone, rrsets = changes.len(), records = stored.len(), "appended records");
        Ok(stored)
    }

    /// Replaces each affected rrset with exactly the given records. Rrsets
    /// not mentioned are left alone.
    pub async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, ProviderError> {
        let zone = canonical_zone(zone);
        let groups = group_records(&zone, records)?;

        let mut changes = Vec::with_capacity(groups.len());
        let mut stored = Vec::new();
        for ((name, rtype), group) in groups {
            let mut contents = Vec::with_capacity(group.len());
            for record in &group {
                push_unique(&mut contents, record.content());
            }
            let ttl = group_ttl(&group).unwrap_or(DEFAULT_TTL);
            changes.push(replace(name, rtype, ttl, contents));
            stored.extend(group.iter().map(Record::normalized));
        }

        self.client.patch_rrsets(&zone, &changes).await?;
        tracing::info!(%zone, rrsets = changes.len(), records = stored.len(), "set records");
        Ok(stored)
    }

    /// Removes matching records and returns the ones that were actually
    /// present. An rrset left without records is deleted outright.
    pub async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, ProviderError> {
        let zone = canonical_zone(zone);
        let groups = group_records(&zone, records)?;
        let existing = index_rrsets(self.client.get_zone(&zone).await?);

        let mut changes = Vec::new();
        let mut removed = Vec::new();
        for (key, group) in groups {
            let Some(current) = existing.get(&key) else {
                continue;
            };
            let mut targets: Vec<(String, &Record)> = Vec::with_capacity(group.len());
            for record in &group {
                let content = record.content();
                if !targets.iter().any(|(c, _)| *c == content) {
                    targets.push((content, record));
                }
            }
            // disabled entries are never matched, they always stay in the rrset
            let (gone, kept): (Vec<_>, Vec<_>) = current.records.iter().partition(|r| {
                !r.disabled && targets.iter().any(|(content, _)| *content == r.content)
            });
            if gone.is_empty() {
                continue;
            }

            for (content, record) in &targets {
                if gone.iter().any(|r| r.content == *content) {
                    removed.push(record.normalized());
                }
            }

            let (name, rtype) = key;
            if kept.is_empty() {
                changes.push(RRSet {
                    name,
                    rtype,
                    ttl: current.ttl,
                    changetype: Some(ChangeType::Delete),
                    records: Vec::new(),
                });
            } else {
                let contents = kept.into_iter().cloned().collect();
                changes.push(replace(name, rtype, current.ttl, contents));
            }
        }

        self.client.patch_rrsets(&zone, &changes).await?;
        tracing::info!(%zone, rrsets = changes.len(), records = removed.len(), "deleted records");
        Ok(removed)
    }
}

fn group_records(zone: &str, records: &[Record]) -> Result<BTreeMap<RRKey, Vec<Record>>, ProviderError> {
    let mut groups: BTreeMap<RRKey, Vec<Record>> = BTreeMap::new();
    for record in records {
        let rtype = record.rtype.trim().to_ascii_uppercase();
        if rtype.is_empty() {
            return Err(ProviderError::InvalidRecord(format!(
                "record {:?} has no type",
                record.name
            )));
        }
        groups
            .entry((absolute_name(&record.name, zone).to_ascii_lowercase(), rtype))
            .or_default()
            .push(record.clone());
    }
    Ok(groups)
}

fn index_rrsets(zone: Zone) -> HashMap<RRKey, RRSet> {
    zone.rrsets
        .into_iter()
        .map(|set| ((set.name.to_ascii_lowercase(), set.rtype.to_ascii_uppercase()), set))
        .collect()
}

fn group_ttl(group: &[Record]) -> Option<u32> {
    group.iter().map(|r| r.ttl).filter(|&t| t > 0).max()
}

/// Adds `content` unless already present. A disabled entry with the same
/// content is switched back on instead.
fn push_unique(contents: &mut Vec<RecordContent>, content: String) {
    match contents.iter_mut().find(|r| r.content == content) {
        Some(existing) => existing.disabled = false,
        None => contents.push(RecordContent { content, disabled: false }),
    }
}

fn replace(name: String, rtype: String, ttl: u32, records: Vec<RecordContent>) -> RRSet {
    RRSet {
        name,
        rtype,
        ttl,
        changetype: Some(ChangeType::Replace),
        records,
    }
}
