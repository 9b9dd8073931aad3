//! `<StatisticsCollector/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/statistics-collector-policy

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::{DecodeError, ErrorCollector, ErrorKind};
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::{Item, ObjectList};

pub const KIND: &str = "statistics_collector";

/// Allowed values of a statistic's `type`.
pub const STATISTIC_TYPES: &[&str] = &["string", "integer", "float", "long", "double"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsCollector {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub statistics: Vec<Statistic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistic {
    pub name: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "type")]
    pub stat_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "statistics_collector policy")?;
    let mut errors = ErrorCollector::new();

    let statistics = decode_statistics(&list.filter("statistic"), &mut errors)?;

    errors.finish(Policy::StatisticsCollector(StatisticsCollector {
        base,
        display_name: decode::string(list, "display_name")?,
        statistics,
    }))
}

/// Decode every `statistic` entry. Missing labels, refs and types are
/// recorded per entry; only a non-object entry stops the walk.
fn decode_statistics(
    items: &ObjectList,
    errors: &mut ErrorCollector,
) -> Result<Vec<Statistic>, DecodeError> {
    let mut stats = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "statistic")?;

        let Some(name) = item.label(0) else {
            errors.push(DecodeError::at(item.pos(), ErrorKind::MissingLabel("statistic")));
            continue;
        };

        let stat = Statistic {
            name: name.to_string(),
            reference: decode::string_or_default(list, "ref")?,
            stat_type: decode::string_or_default(list, "type")?,
            value: decode::string(list, "value")?,
        };

        if stat.reference.is_empty() {
            errors.push(DecodeError::at(
                item.pos(),
                ErrorKind::MissingField {
                    what: "statistic",
                    field: "ref",
                },
            ));
        }

        if stat.stat_type.is_empty() {
            errors.push(DecodeError::at(
                item.pos(),
                ErrorKind::MissingField {
                    what: "statistic",
                    field: "type",
                },
            ));
        } else if !STATISTIC_TYPES.contains(&stat.stat_type.as_str()) {
            errors.push(DecodeError::at(
                item.pos(),
                ErrorKind::InvalidValue {
                    what: "statistic",
                    field: "type",
                    allowed: STATISTIC_TYPES.join(", "),
                },
            ));
        }

        stats.push(stat);
    }
    Ok(stats)
}
