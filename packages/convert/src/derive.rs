//! Category and mission status derivation.
//!
//! Both derivations are ordered rule tables over lower-cased free text.
//! The tables are the business rules: the first matching entry wins and
//! every function falls back to a default label, so derivation never
//! fails.

use std::collections::BTreeMap;

use geojson::JsonObject;
use sartopo_faks_feature_models::{MissionStatus, PointCategory};

use crate::raw::{RawFeature, property_str};

/// A single point category rule.
///
/// The rule matches when the lower-cased title contains any of
/// `title_contains`, has a word starting with any of `title_word_prefixes`,
/// or the lower-cased marker symbol contains any of `symbol_contains`.
#[derive(Debug, Clone, Copy)]
pub struct PointCategoryRule {
    pub category: PointCategory,
    pub title_contains: &'static [&'static str],
    pub title_word_prefixes: &'static [&'static str],
    pub symbol_contains: &'static [&'static str],
}

impl PointCategoryRule {
    /// Checks the rule against already lower-cased inputs.
    #[must_use]
    pub fn matches(&self, title: &str, symbol: &str) -> bool {
        contains_any(title, self.title_contains)
            || has_any_word_prefix(title, self.title_word_prefixes)
            || contains_any(symbol, self.symbol_contains)
    }
}

/// Point category rules in priority order.
///
/// Order matters: "Oppmøte ved KO" is a meeting point, not a command post.
/// The "ko" abbreviation only matches at the start of a word ("KO1",
/// "KOplass") so that titles such as "Funn av sko" are not taken for
/// command posts.
pub const POINT_CATEGORY_RULES: &[PointCategoryRule] = &[
    PointCategoryRule {
        category: PointCategory::Oppmotested,
        title_contains: &["oppmøte"],
        title_word_prefixes: &[],
        symbol_contains: &[],
    },
    PointCategoryRule {
        category: PointCategory::Kommandoplass,
        title_contains: &["kommandoplass"],
        title_word_prefixes: &["ko"],
        symbol_contains: &["cp"],
    },
    PointCategoryRule {
        category: PointCategory::Bosted,
        title_contains: &["bosted", "bopel", "bopæl"],
        title_word_prefixes: &[],
        symbol_contains: &[],
    },
    PointCategoryRule {
        category: PointCategory::FunnAvSpor,
        title_contains: &["funn"],
        title_word_prefixes: &[],
        symbol_contains: &[],
    },
];

/// Lower-cased operational period titles and the status they signal.
pub const PERIOD_TITLE_STATUSES: &[(&str, MissionStatus)] = &[
    ("01 klargjorte oppdrag", MissionStatus::Empty),
    ("02 søkes nå", MissionStatus::Assigned),
    ("03 ferdig søkt", MissionStatus::Searched),
];

/// Lower-cased assignment `status` values and the status they map to.
pub const STATUS_FIELD_STATUSES: &[(&str, MissionStatus)] = &[
    ("draft", MissionStatus::Empty),
    ("prepared", MissionStatus::Empty),
    ("inprogress", MissionStatus::Assigned),
    ("completed", MissionStatus::Searched),
];

/// Operational period titles indexed by feature identifier.
///
/// Built once per run from every feature in the input, including features
/// without geometry, since operational periods are usually geometry-less.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationalPeriods {
    titles: BTreeMap<String, String>,
}

impl OperationalPeriods {
    /// Indexes the lower-cased `title` of every feature that has an id.
    ///
    /// When ids repeat, the first feature wins.
    #[must_use]
    pub fn from_features(features: &[RawFeature]) -> Self {
        let mut titles = BTreeMap::new();

        for feature in features {
            let Some(id) = feature.id_string() else {
                continue;
            };
            let title = feature.property("title").unwrap_or_default();
            titles.entry(id).or_insert_with(|| title.to_lowercase());
        }

        Self { titles }
    }

    /// Returns the lower-cased title of the feature with the given id.
    #[must_use]
    pub fn title(&self, id: &str) -> Option<&str> {
        self.titles.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Derives an assignment's mission status.
///
/// The operational period referenced by `operationalPeriodId` takes
/// precedence; its title is matched against [`PERIOD_TITLE_STATUSES`]. If
/// no period resolves or its title is not recognized, the assignment's own
/// `status` is matched against [`STATUS_FIELD_STATUSES`]. Defaults to
/// [`MissionStatus::Empty`].
#[must_use]
pub fn derive_mission_status(
    periods: &OperationalPeriods,
    properties: &JsonObject,
) -> MissionStatus {
    let from_period = property_str(properties, "operationalPeriodId")
        .filter(|id| !id.is_empty())
        .and_then(|id| periods.title(&id))
        .and_then(|title| lookup_status(PERIOD_TITLE_STATUSES, title));

    if let Some(status) = from_period {
        return status;
    }

    property_str(properties, "status")
        .and_then(|status| lookup_status(STATUS_FIELD_STATUSES, &status.to_lowercase()))
        .unwrap_or_default()
}

/// Derives a point feature's category from its `title` and
/// `marker-symbol` using [`POINT_CATEGORY_RULES`].
#[must_use]
pub fn derive_point_category(properties: &JsonObject) -> PointCategory {
    let title = property_str(properties, "title")
        .unwrap_or_default()
        .to_lowercase();
    let symbol = property_str(properties, "marker-symbol")
        .unwrap_or_default()
        .to_lowercase();

    POINT_CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(&title, &symbol))
        .map_or(PointCategory::Annet, |rule| rule.category)
}

fn lookup_status(table: &[(&str, MissionStatus)], key: &str) -> Option<MissionStatus> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, status)| *status)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn has_any_word_prefix(haystack: &str, prefixes: &[&str]) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| prefixes.iter().any(|prefix| word.starts_with(prefix)))
}
