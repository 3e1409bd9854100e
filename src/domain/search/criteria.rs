use serde::{Deserialize, Serialize};

/// Placeholder written into cache keys for unset optional criteria fields.
const UNSET: &str = "*";

pub(crate) fn default_page_size() -> u32 {
    10
}

pub(crate) fn default_page_number() -> u32 {
    1
}

/// Raw search criteria as received from the boundary layer.
///
/// Optional text fields arrive untrimmed and the sort field/order are free
/// text; nothing downstream consumes this type directly. `SortPolicy`
/// turns it into a [`NormalizedCriteria`] first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub skill_name: Option<String>,
    pub skill_category: Option<String>,
    pub department: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    pub sorting: Option<String>,
    pub sort_order: Option<String>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            skill_name: None,
            skill_category: None,
            department: None,
            page_size: default_page_size(),
            page_number: default_page_number(),
            sorting: None,
            sort_order: None,
        }
    }
}

/// Fields a search may be sorted by. Anything outside this set is replaced
/// by the policy default before key derivation and before the repository
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Name,
    Skill,
    Category,
    Department,
    DateCreated,
}

impl SortField {
    /// Parses a requested sort field, case-insensitively and ignoring
    /// separators, so `"dateCreated"`, `"date_created"` and `"DateCreated"`
    /// all resolve to the same field.
    pub fn parse(raw: &str) -> Option<Self> {
        let canonical: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match canonical.as_str() {
            "name" => Some(SortField::Name),
            "skill" | "skillname" => Some(SortField::Skill),
            "category" | "skillcategory" => Some(SortField::Category),
            "department" => Some(SortField::Department),
            "datecreated" => Some(SortField::DateCreated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Skill => "Skill",
            SortField::Category => "Category",
            SortField::Department => "Department",
            SortField::DateCreated => "DateCreated",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Immutable sort configuration injected into the search component at
/// construction.
///
/// The two read paths carry independent policies: skill search defaults to
/// ascending order, the skill-gap path to descending. Both share the same
/// allow-list and default field.
#[derive(Debug, Clone)]
pub struct SortPolicy {
    allowed: Vec<SortField>,
    default_field: SortField,
    default_order: SortOrder,
}

impl SortPolicy {
    pub fn new(allowed: Vec<SortField>, default_field: SortField, default_order: SortOrder) -> Self {
        Self {
            allowed,
            default_field,
            default_order,
        }
    }

    /// Policy for the search-by-skill path: all five fields, DateCreated ASC.
    pub fn search_default() -> Self {
        Self::new(
            vec![
                SortField::Name,
                SortField::Skill,
                SortField::Category,
                SortField::Department,
                SortField::DateCreated,
            ],
            SortField::DateCreated,
            SortOrder::Asc,
        )
    }

    /// Policy for the skill-gap path: same allow-list, DateCreated DESC.
    pub fn skill_gap_default() -> Self {
        Self {
            default_order: SortOrder::Desc,
            ..Self::search_default()
        }
    }

    /// Normalizes raw criteria: trims optional text filters (blank becomes
    /// unset), clamps paging to sane minimums, and resolves the sort field
    /// and order against this policy. A requested field outside the
    /// allow-list is substituted with the default and the substitution is
    /// logged.
    pub fn normalize(&self, criteria: SearchCriteria) -> NormalizedCriteria {
        let sort_field = match criteria.sorting.as_deref().map(str::trim) {
            None | Some("") => self.default_field,
            Some(raw) => match SortField::parse(raw).filter(|f| self.allowed.contains(f)) {
                Some(field) => field,
                None => {
                    tracing::warn!(
                        requested = raw,
                        substituted = self.default_field.as_str(),
                        "sort field not in allow-list, using default"
                    );
                    self.default_field
                }
            },
        };

        let sort_order = match criteria.sort_order.as_deref().map(str::trim) {
            None | Some("") => self.default_order,
            Some(raw) => SortOrder::parse(raw).unwrap_or(self.default_order),
        };

        NormalizedCriteria {
            skill_name: normalize_filter(criteria.skill_name),
            skill_category: normalize_filter(criteria.skill_category),
            department: normalize_filter(criteria.department),
            page_size: criteria.page_size.max(1),
            page_number: criteria.page_number.max(1),
            sort_field,
            sort_order,
        }
    }
}

fn normalize_filter(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Criteria after normalization: the only form the repository and the cache
/// key derivation ever see.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCriteria {
    pub skill_name: Option<String>,
    pub skill_category: Option<String>,
    pub department: Option<String>,
    pub page_size: u32,
    pub page_number: u32,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl NormalizedCriteria {
    /// Derives the cache key for this criteria under a path-specific prefix.
    ///
    /// Pure function: semantically identical criteria always produce the
    /// same key, and the fixed field order plus the prefix keep the two
    /// read paths' key spaces disjoint.
    pub fn cache_key(&self, prefix: &str) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}|{}|{}",
            prefix,
            self.skill_name.as_deref().unwrap_or(UNSET),
            self.skill_category.as_deref().unwrap_or(UNSET),
            self.department.as_deref().unwrap_or(UNSET),
            self.page_size,
            self.page_number,
            self.sort_field.as_str(),
            self.sort_order.as_str(),
        )
    }
}
