//! Client-side list presentation
//!
//! Turns an already-fetched record list plus the user's criteria into the exact
//! slice to render: filter over the full set, sort, then cut one page. Every view
//! that lists records (transaction table, dashboard panel, admin account list)
//! goes through [`present`].

pub mod criteria;
pub mod records;

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

pub use criteria::{Category, ListQuery, SortDirection};
pub use records::{AccountSort, TransactionSort};

pub const ACCOUNTS_PER_PAGE: usize = 5;
pub const DASHBOARD_TRANSACTIONS_PER_PAGE: usize = 5;
pub const TRANSACTIONS_PER_PAGE: usize = 10;

/// Comparable projection of one record field
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Number(Decimal),
    /// Records without a date sort before dated ones
    Instant(Option<NaiveDateTime>),
    Text(Cow<'a, str>),
}

impl SortValue<'_> {
    fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
            (SortValue::Instant(a), SortValue::Instant(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            _ => Ordering::Equal,
        }
    }
}

/// A record that can be listed
pub trait Listable {
    type SortKey: Copy + PartialEq;
    type Category: PartialEq;

    /// Fields matched by free-text search. Empty means search never excludes the record.
    fn search_fields(&self) -> Vec<&str>;
    fn category(&self) -> Self::Category;
    fn timestamp(&self) -> Option<NaiveDateTime>;
    fn sort_value(&self, key: Self::SortKey) -> SortValue<'_>;
}

pub type QueryFor<T> = ListQuery<<T as Listable>::SortKey, <T as Listable>::Category>;

fn matches_search<T: Listable>(record: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let fields = record.search_fields();
    fields.is_empty() || fields.iter().any(|field| field.to_lowercase().contains(needle))
}

/// Apply every active filter (logical AND) to the full record set
pub fn filter<'a, T: Listable>(records: &'a [T], query: &QueryFor<T>) -> Vec<&'a T> {
    let needle = query.search.trim().to_lowercase();
    records
        .iter()
        .filter(|record| matches_search(*record, &needle))
        .filter(|record| query.category.admits(&record.category()))
        .filter(|record| query.range.contains(record.timestamp()))
        .collect()
}

/// Stable sort by one key
pub fn sort<T: Listable>(items: &mut [&T], key: T::SortKey, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = a.sort_value(key).compare(&b.sort_value(key));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Never less than one page, so an empty result still renders as "page 1 of 1"
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Cut `[(page-1)*size, page*size)`. Pages past the end are empty, page 0 reads as page 1.
pub fn paginate<'a, T>(items: &[&'a T], page: usize, page_size: usize) -> Vec<&'a T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    items.iter().skip(start).take(page_size).copied().collect()
}

/// One rendered page of a derived list
#[derive(Debug)]
pub struct PageView<'a, T> {
    pub items: Vec<&'a T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> PageView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `Page X of Y (n noun)` with arrows only where navigation is open
    pub fn footer(&self, noun: &str) -> String {
        let previous = if self.has_previous { "◄  " } else { "   " };
        let next = if self.has_next { "  ►" } else { "" };
        format!(
            "{}Page {} of {} ({} {}){}",
            previous, self.page, self.total_pages, self.total_matches, noun, next
        )
    }
}

/// Filter, sort and page `records`. Pure: same inputs, same page.
pub fn present<'a, T: Listable>(
    records: &'a [T],
    query: &QueryFor<T>,
    page: usize,
    page_size: usize,
) -> PageView<'a, T> {
    let mut matches = filter(records, query);
    sort(&mut matches, query.sort, query.direction);

    let total_matches = matches.len();
    let total_pages = total_pages(total_matches, page_size);

    PageView {
        items: paginate(&matches, page, page_size),
        page,
        total_pages,
        total_matches,
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::criteria::DateRange;
    use super::*;
    use crate::models::{Account, Role, Transaction, TransactionType, User};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn tx(id: i64, amount: i64, date: u32, kind: TransactionType, receiver: Option<i64>) -> Transaction {
        Transaction {
            id,
            amount: Decimal::from(amount),
            date: day(date),
            kind,
            sender: None,
            receiver,
        }
    }

    fn user(id: i64, name: &str, role: Role, balance: i64, created: Option<u32>) -> User {
        User {
            id,
            name: name.to_string(),
            username: name.to_lowercase().replace(' ', "."),
            email: format!("user{}@escobanks.ph", id),
            mobile: None,
            role,
            account: Some(Account {
                id: id + 100,
                balance: Decimal::from(balance),
                created_at: created.map(day),
            }),
        }
    }

    fn sample_users() -> Vec<User> {
        vec![
            user(1, "Ana Cruz", Role::User, 300, Some(3)),
            user(2, "Juan Bana", Role::Admin, 1200, Some(1)),
            user(3, "Maria Diaz", Role::User, 50, None),
            user(4, "Pablo Reyes", Role::Admin, 800, Some(7)),
        ]
    }

    fn account_query() -> QueryFor<User> {
        ListQuery::new(AccountSort::Balance, SortDirection::Descending)
    }

    fn transaction_query() -> QueryFor<Transaction> {
        ListQuery::new(TransactionSort::Date, SortDirection::Descending)
    }

    #[test]
    fn test_role_filter_is_exact_subset() {
        let users = sample_users();
        let mut query = account_query();
        query.category = Category::Only(Role::Admin);

        let admins = filter(&users, &query);

        assert_eq!(admins.len(), 2);
        assert!(admins.iter().all(|u| u.role == Role::Admin));
        let excluded = users.iter().filter(|u| !admins.iter().any(|a| a.id == u.id));
        assert!(excluded.into_iter().all(|u| u.role != Role::Admin));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let users = sample_users();
        let mut query = account_query();
        query.search = "ana".to_string();

        let names: Vec<&str> = filter(&users, &query).iter().map(|u| u.name.as_str()).collect();

        assert!(names.contains(&"Ana Cruz"));
        assert!(names.contains(&"Juan Bana"));
        assert!(!names.contains(&"Maria Diaz"));
    }

    #[test]
    fn test_search_matches_email() {
        let users = sample_users();
        let mut query = account_query();
        query.search = "USER3@".to_string();

        let found = filter(&users, &query);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Maria Diaz");
    }

    #[test]
    fn test_search_does_not_narrow_transactions() {
        let txs = vec![tx(1, 10, 1, TransactionType::Deposit, None)];
        let mut query = transaction_query();
        query.search = "anything".to_string();

        assert_eq!(filter(&txs, &query).len(), 1);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let txs = vec![
            tx(1, 10, 1, TransactionType::Deposit, None),
            tx(2, 20, 5, TransactionType::Deposit, None),
            tx(3, 30, 5, TransactionType::Transfer, Some(9)),
            tx(4, 40, 20, TransactionType::Deposit, None),
        ];
        let mut query = transaction_query();
        query.category = Category::Only(TransactionType::Deposit);
        query.range = DateRange {
            start: NaiveDate::from_ymd_opt(2025, 3, 2),
            end: NaiveDate::from_ymd_opt(2025, 3, 10),
        };

        let ids: Vec<i64> = filter(&txs, &query).iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_sort_orders_adjacent_pairs() {
        let txs = vec![
            tx(1, 40, 3, TransactionType::Withdrawal, Some(7)),
            tx(2, 10, 9, TransactionType::Deposit, None),
            tx(3, 25, 1, TransactionType::Transfer, Some(2)),
            tx(4, 10, 4, TransactionType::Canceled, Some(5)),
        ];

        for key in [
            TransactionSort::Date,
            TransactionSort::Type,
            TransactionSort::Receiver,
            TransactionSort::Amount,
        ] {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let mut items: Vec<&Transaction> = txs.iter().collect();
                sort(&mut items, key, direction);
                for pair in items.windows(2) {
                    let ordering = pair[0].sort_value(key).compare(&pair[1].sort_value(key));
                    match direction {
                        SortDirection::Ascending => assert_ne!(ordering, Ordering::Greater),
                        SortDirection::Descending => assert_ne!(ordering, Ordering::Less),
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let txs = vec![
            tx(1, 10, 1, TransactionType::Deposit, None),
            tx(2, 10, 2, TransactionType::Deposit, None),
            tx(3, 10, 3, TransactionType::Deposit, None),
        ];
        let mut items: Vec<&Transaction> = txs.iter().collect();

        sort(&mut items, TransactionSort::Amount, SortDirection::Descending);

        let ids: Vec<i64> = items.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_undated_accounts_sort_first_ascending() {
        let users = sample_users();
        let mut query = account_query();
        query.sort = AccountSort::DateCreated;
        query.direction = SortDirection::Ascending;

        let view = present(&users, &query, 1, ACCOUNTS_PER_PAGE);
        let ids: Vec<i64> = view.items.iter().map(|u| u.id).collect();

        assert_eq!(ids, vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(5, 5), 1);
    }

    #[test]
    fn test_twenty_three_transactions() {
        let txs: Vec<Transaction> = (1..=23)
            .map(|i| tx(i, i, 1 + (i as u32 % 28), TransactionType::Deposit, None))
            .collect();
        let mut query = transaction_query();
        query.sort = TransactionSort::Amount;
        query.direction = SortDirection::Ascending;

        let first = present(&txs, &query, 1, TRANSACTIONS_PER_PAGE);
        let second = present(&txs, &query, 2, TRANSACTIONS_PER_PAGE);
        let third = present(&txs, &query, 3, TRANSACTIONS_PER_PAGE);

        fn ids(view: &PageView<'_, Transaction>) -> Vec<i64> {
            view.items.iter().map(|t| t.id).collect()
        }
        assert_eq!(ids(&first), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(&second), (11..=20).collect::<Vec<_>>());
        assert_eq!(ids(&third), vec![21, 22, 23]);
        assert_eq!(third.total_pages, 3);
        assert!(!third.has_next);
        assert!(third.has_previous);
        assert!(!first.has_previous);
        assert!(first.has_next);
    }

    #[test]
    fn test_empty_result_is_one_empty_page() {
        let users = sample_users();
        let mut query = account_query();
        query.search = "nobody".to_string();

        let view = present(&users, &query, 1, ACCOUNTS_PER_PAGE);

        assert!(view.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.total_matches, 0);
        assert!(!view.has_next);
    }

    #[test]
    fn test_stale_page_after_filter_is_empty_not_error() {
        let users: Vec<User> = (1..=12)
            .map(|i| user(i, &format!("Customer {}", i), Role::User, i * 10, Some(1)))
            .collect();
        let mut query = account_query();
        let before = present(&users, &query, 3, ACCOUNTS_PER_PAGE);
        assert_eq!(before.items.len(), 2);

        query.search = "Customer 1".to_string();
        let after = present(&users, &query, 3, ACCOUNTS_PER_PAGE);

        assert_eq!(after.total_matches, 4);
        assert_eq!(after.total_pages, 1);
        assert!(after.is_empty());
        assert_eq!(after.page, 3);
    }

    #[test]
    fn test_present_is_idempotent() {
        let users = sample_users();
        let mut query = account_query();
        query.search = "a".to_string();

        let first: Vec<i64> = present(&users, &query, 1, 2).items.iter().map(|u| u.id).collect();
        let second: Vec<i64> = present(&users, &query, 1, 2).items.iter().map(|u| u.id).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_pages_do_not_overlap() {
        let users = sample_users();
        let query = account_query();

        let first = present(&users, &query, 1, 3);
        let second = present(&users, &query, 2, 3);

        assert_eq!(first.items.len(), 3);
        assert_eq!(second.items.len(), 1);
        assert!(first.items.iter().all(|a| second.items.iter().all(|b| a.id != b.id)));
    }

    #[test]
    fn test_footer_follows_navigation() {
        let records: Vec<Transaction> = (1..=7)
            .map(|i| tx(i, i, 1, TransactionType::Deposit, None))
            .collect();
        let query = QueryFor::<Transaction>::new(TransactionSort::Date, SortDirection::Descending);

        let first = present(&records, &query, 1, 5);
        assert_eq!(first.footer("transactions"), "   Page 1 of 2 (7 transactions)  ►");

        let last = present(&records, &query, 2, 5);
        assert_eq!(last.footer("transactions"), "◄  Page 2 of 2 (7 transactions)");

        let stale = present(&records, &query, 4, 5);
        assert!(stale.is_empty());
        assert_eq!(stale.footer("transactions"), "◄  Page 4 of 2 (7 transactions)");
    }
}
