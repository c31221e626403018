//! Filter and sort criteria chosen by the user

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "up" => Ok(SortDirection::Ascending),
            "desc" | "descending" | "down" => Ok(SortDirection::Descending),
            other => Err(format!("Unknown sort direction `{}`. Use `asc` or `desc`", other)),
        }
    }
}

/// Category filter; `All` disables it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category<C> {
    All,
    Only(C),
}

impl<C> Default for Category<C> {
    fn default() -> Self {
        Category::All
    }
}

impl<C: PartialEq> Category<C> {
    pub fn admits(&self, value: &C) -> bool {
        match self {
            Category::All => true,
            Category::Only(wanted) => wanted == value,
        }
    }
}

impl<C: FromStr> Category<C> {
    /// `all` (any case) and the empty string are the "no filter" sentinels
    pub fn parse(raw: &str) -> Result<Self, C::Err> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Ok(Category::All)
        } else {
            raw.parse().map(Category::Only)
        }
    }
}

/// Inclusive date range. Open ends do not constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Records without a timestamp only pass an open range
    pub fn contains(&self, timestamp: Option<NaiveDateTime>) -> bool {
        if self.is_open() {
            return true;
        }
        let Some(timestamp) = timestamp else {
            return false;
        };
        let day = timestamp.date();
        self.start.map_or(true, |start| day >= start) && self.end.map_or(true, |end| day <= end)
    }
}

/// Everything that shapes a derived list, except the page number
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<K, C> {
    pub search: String,
    pub category: Category<C>,
    pub range: DateRange,
    pub sort: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq, C> ListQuery<K, C> {
    pub fn new(sort: K, direction: SortDirection) -> Self {
        Self {
            search: String::new(),
            category: Category::All,
            range: DateRange::default(),
            sort,
            direction,
        }
    }

    /// Column-header behavior: same column flips the direction, a new column starts ascending
    pub fn toggle_sort(&mut self, key: K) {
        if self.sort == key {
            self.direction = self.direction.toggle();
        } else {
            self.sort = key;
            self.direction = SortDirection::Ascending;
        }
    }
}
