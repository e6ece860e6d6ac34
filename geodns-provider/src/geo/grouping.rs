//! Merges sorted native directional rows into canonical geo record sets.

use std::iter::Peekable;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::geo::territory::TerritoryResolver;
use crate::rdata::for_type_and_rdata;
use crate::types::{GeoConfig, RData, ResourceRecordSetWithConfig};
use crate::utils::log_sanitizer::rdata_for_log;

/// Backend reference to a geo group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionalGroup {
    /// Backend id, handed to the territory loader.
    pub id: String,
    /// Display name; group identity when merging.
    pub name: String,
}

impl DirectionalGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One native row: a single rdata value of a directional record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionalRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: Option<u32>,
    /// Positional rdata, converted with [`for_type_and_rdata`].
    pub rdata: Vec<String>,
    /// The row answers with nothing.
    #[serde(default)]
    pub no_response: bool,
    #[serde(default)]
    pub geolocation_group: Option<DirectionalGroup>,
    /// Fallback when no geolocation group is set.
    #[serde(default)]
    pub group: Option<DirectionalGroup>,
}

impl DirectionalRecord {
    /// The group this row belongs to: its geolocation group, else its plain group.
    pub fn group_ref(&self) -> Option<&DirectionalGroup> {
        self.geolocation_group.as_ref().or(self.group.as_ref())
    }

    fn same_run(&self, other: &Self) -> bool {
        self.record_type == other.record_type
            && self.ttl == other.ttl
            && self.name.eq_ignore_ascii_case(&other.name)
            && match (self.group_ref(), other.group_ref()) {
                (Some(a), Some(b)) => a.name == b.name,
                _ => false,
            }
    }
}

/// Lazily groups rows sorted by `(type, group name)` into one record set per run
/// of equal name, type, TTL and group.
///
/// A row without a group yields [`ProviderError::ContractViolation`]; after any
/// error the iterator is exhausted.
pub struct GroupGeoRecordIter<I: Iterator<Item = DirectionalRecord>> {
    provider: &'static str,
    rows: Peekable<I>,
    resolver: TerritoryResolver,
    done: bool,
}

impl<I: Iterator<Item = DirectionalRecord>> GroupGeoRecordIter<I> {
    pub fn new(
        provider: &'static str,
        rows: impl IntoIterator<IntoIter = I>,
        resolver: TerritoryResolver,
    ) -> Self {
        Self {
            provider,
            rows: rows.into_iter().peekable(),
            resolver,
            done: false,
        }
    }

    fn violation(&self, detail: String) -> ProviderError {
        log::error!("[{}] {detail}", self.provider);
        ProviderError::contract_violation(self.provider, detail)
    }

    fn answer_rdata(&self, row: &DirectionalRecord) -> Result<RData> {
        if row.rdata.is_empty() {
            return Err(self.violation(format!(
                "{} {} in group {} has neither rdata nor the no-response flag",
                row.name,
                row.record_type,
                row.group_ref().map_or("?", |g| g.name.as_str())
            )));
        }
        for_type_and_rdata(self.provider, &row.record_type, &row.rdata)
    }

    fn group_run(&mut self, first: DirectionalRecord) -> Result<ResourceRecordSetWithConfig> {
        let Some(group) = first.group_ref().cloned() else {
            return Err(self.violation(format!(
                "expected record to be in a geolocation group: {} {} {}",
                first.name,
                first.record_type,
                rdata_for_log(&first.rdata)
            )));
        };
        let territories = self.resolver.resolve(&group.id)?;

        let mut builder = ResourceRecordSetWithConfig::builder()
            .name(first.name.clone())
            .record_type(first.record_type.clone())
            .ttl(first.ttl);
        if !first.no_response {
            builder.push(self.answer_rdata(&first)?);
        }

        let mut merged = 1_usize;
        while let Some(next) = self.rows.next_if(|next| next.same_run(&first)) {
            if next.no_response != first.no_response {
                return Err(self.violation(format!(
                    "{} {} group {} mixes no-response and answer rows",
                    first.name, first.record_type, group.name
                )));
            }
            if !next.no_response {
                builder.push(self.answer_rdata(&next)?);
            }
            merged += 1;
        }
        log::trace!(
            "[{}] grouped {merged} rows into {} {} group {}",
            self.provider,
            first.name,
            first.record_type,
            group.name
        );

        let geo = if first.no_response {
            GeoConfig::no_response(group.name, territories)
        } else {
            GeoConfig::new(group.name, territories)
        };
        builder.geo(geo).build()
    }
}

impl<I: Iterator<Item = DirectionalRecord>> Iterator for GroupGeoRecordIter<I> {
    type Item = Result<ResourceRecordSetWithConfig>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let first = self.rows.next()?;
        let item = self.group_run(first);
        self.done = item.is_err();
        Some(item)
    }
}
