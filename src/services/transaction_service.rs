use chrono::NaiveDate;
use tracing::error;

use crate::api::bank::BankBackend;
use crate::listing::{
    self, Category, PageView, QueryFor, SortDirection, TransactionSort,
    DASHBOARD_TRANSACTIONS_PER_PAGE, TRANSACTIONS_PER_PAGE,
};
use crate::models::{Transaction, TransactionType};
use crate::session::AuthSession;
use crate::utils::errors::ServiceError;
use crate::utils::money::format_money;
use crate::utils::page::Pager;
use crate::utils::table::Table;

/// `user_id` is the caller's own id, or for the history table `auth.viewed_user()`
pub async fn fetch_transactions(
    backend: &dyn BankBackend,
    auth: &AuthSession,
    user_id: i64,
) -> Result<Vec<Transaction>, ServiceError> {
    backend
        .list_transactions(&auth.token, user_id)
        .await
        .map_err(|e| {
            error!("Error fetching transactions for user {}: {}", user_id, e);
            ServiceError::inline("Failed to fetch transactions", e)
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Every column, type and date filters
    Full,
    /// Compact panel on the dashboard
    Panel,
}

/// Fetched transactions plus the criteria and page the user is looking at
#[derive(Debug, Clone)]
pub struct TransactionTable {
    records: Vec<Transaction>,
    query: QueryFor<Transaction>,
    pager: Pager,
    page_size: usize,
    layout: Layout,
}

impl TransactionTable {
    pub fn full() -> Self {
        Self::with_layout(Layout::Full, TRANSACTIONS_PER_PAGE)
    }

    pub fn dashboard() -> Self {
        Self::with_layout(Layout::Panel, DASHBOARD_TRANSACTIONS_PER_PAGE)
    }

    fn with_layout(layout: Layout, page_size: usize) -> Self {
        TransactionTable {
            records: Vec::new(),
            query: QueryFor::<Transaction>::new(TransactionSort::Date, SortDirection::Descending),
            pager: Pager::new(),
            page_size,
            layout,
        }
    }

    /// New source data; the page stays where it was
    pub fn replace_records(&mut self, records: Vec<Transaction>) {
        self.records = records;
        self.sync_pages();
    }

    pub fn set_type(&mut self, category: Category<TransactionType>) {
        self.query.category = category;
        self.sync_pages();
    }

    pub fn set_start(&mut self, start: Option<NaiveDate>) {
        self.query.range.start = start;
        self.sync_pages();
    }

    pub fn set_end(&mut self, end: Option<NaiveDate>) {
        self.query.range.end = end;
        self.sync_pages();
    }

    pub fn clear_filters(&mut self) {
        self.query.category = Category::All;
        self.query.range = Default::default();
        self.sync_pages();
    }

    /// Explicit direction, or column-header toggling when none is given
    pub fn sort_by(&mut self, key: TransactionSort, direction: Option<SortDirection>) {
        match direction {
            Some(direction) => {
                self.query.sort = key;
                self.query.direction = direction;
            }
            None => self.query.toggle_sort(key),
        }
    }

    pub fn next(&mut self) -> bool {
        self.pager.next()
    }

    pub fn previous(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.pager.go_to(page)
    }

    fn sync_pages(&mut self) {
        let matches = listing::filter(&self.records, &self.query).len();
        self.pager
            .set_total_pages(listing::total_pages(matches, self.page_size));
    }

    pub fn view(&self) -> PageView<'_, Transaction> {
        listing::present(
            &self.records,
            &self.query,
            self.pager.current_page(),
            self.page_size,
        )
    }

    pub fn render(&self, title: &str) -> String {
        let view = self.view();
        let mut output = format!("📋 {}\n", title);

        if self.layout == Layout::Full {
            output.push_str(&self.describe_filters());
            output.push('\n');
        }

        if view.is_empty() {
            output.push_str("\nNo transactions found\n");
        } else {
            output.push('\n');
            output.push_str(&self.table(&view).render());
        }

        output.push('\n');
        output.push_str(&view.footer("transactions"));
        output
    }

    fn header(&self, key: TransactionSort, label: &str) -> String {
        if self.query.sort != key {
            return label.to_string();
        }
        let arrow = match self.query.direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        };
        format!("{} {}", label, arrow)
    }

    fn table(&self, view: &PageView<'_, Transaction>) -> Table {
        let date = self.header(TransactionSort::Date, "Date");
        let kind = self.header(TransactionSort::Type, "Type");
        let receiver = self.header(TransactionSort::Receiver, "Receiver");
        let amount = self.header(TransactionSort::Amount, "Amount");

        let mut table = match self.layout {
            Layout::Full => Table::new(&[
                "ID",
                amount.as_str(),
                date.as_str(),
                kind.as_str(),
                receiver.as_str(),
                "Sender",
            ]),
            Layout::Panel => Table::new(&[
                date.as_str(),
                kind.as_str(),
                receiver.as_str(),
                amount.as_str(),
            ]),
        };

        for tx in &view.items {
            let day = tx.date.format("%Y-%m-%d").to_string();
            let receiver = account_cell(tx.receiver);
            match self.layout {
                Layout::Full => table.add_row(vec![
                    tx.id.to_string(),
                    format_money(tx.amount),
                    day,
                    tx.kind.to_string(),
                    receiver,
                    account_cell(tx.sender),
                ]),
                Layout::Panel => table.add_row(vec![
                    day,
                    tx.kind.to_string(),
                    receiver,
                    format_money(tx.amount),
                ]),
            }
        }
        table
    }

    fn describe_filters(&self) -> String {
        let kind = match self.query.category {
            Category::All => "all types".to_string(),
            Category::Only(kind) => kind.to_string(),
        };
        let day = |d: Option<NaiveDate>| d.map_or("…".to_string(), |d| d.to_string());
        format!(
            "Showing {} from {} to {}",
            kind,
            day(self.query.range.start),
            day(self.query.range.end)
        )
    }
}

fn account_cell(account: Option<i64>) -> String {
    account.map_or_else(|| "-".to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{session, transaction, FakeBank};

    fn sample(count: i64) -> Vec<Transaction> {
        (1..=count)
            .map(|i| transaction(i, i * 10, (i as u32 % 28) + 1, TransactionType::Deposit))
            .collect()
    }

    fn ids(view: &PageView<'_, Transaction>) -> Vec<i64> {
        view.items.iter().map(|tx| tx.id).collect()
    }

    #[tokio::test]
    async fn test_fetch_uses_selected_user() {
        let bank = FakeBank::default();
        let mut auth = session(3);
        fetch_transactions(&bank, &auth, auth.viewed_user()).await.unwrap();
        auth.selected_user = Some(8);
        fetch_transactions(&bank, &auth, auth.viewed_user()).await.unwrap();
        assert_eq!(bank.calls(), vec!["list_transactions 3", "list_transactions 8"]);
    }

    #[test]
    fn test_twenty_three_transactions_in_pages_of_ten() {
        let mut table = TransactionTable::full();
        table.replace_records(sample(23));
        table.sort_by(TransactionSort::Amount, Some(SortDirection::Ascending));

        assert_eq!(ids(&table.view()), (1..=10).collect::<Vec<_>>());
        assert!(table.next());
        assert_eq!(ids(&table.view()), (11..=20).collect::<Vec<_>>());
        assert!(table.next());
        let last = table.view();
        assert_eq!(ids(&last), vec![21, 22, 23]);
        assert!(!last.has_next);
        assert!(!table.next());
    }

    #[test]
    fn test_type_filter_keeps_page() {
        let mut records = sample(12);
        records.push(transaction(99, 5, 3, TransactionType::Transfer));
        let mut table = TransactionTable::full();
        table.replace_records(records);
        table.next();

        table.set_type(Category::Only(TransactionType::Transfer));
        assert_eq!(table.pager.current_page(), 2);
        assert!(table.view().is_empty());

        table.go_to(1);
        assert_eq!(ids(&table.view()), vec![99]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let mut table = TransactionTable::full();
        table.replace_records(sample(10));
        table.set_start(NaiveDate::from_ymd_opt(2025, 3, 3));
        table.set_end(NaiveDate::from_ymd_opt(2025, 3, 5));

        let mut found = ids(&table.view());
        found.sort();
        assert_eq!(found, vec![2, 3, 4]);

        table.clear_filters();
        assert_eq!(table.view().total_matches, 10);
    }

    #[test]
    fn test_header_sort_toggles() {
        let mut table = TransactionTable::dashboard();
        table.sort_by(TransactionSort::Amount, None);
        assert_eq!(table.query.direction, SortDirection::Ascending);
        table.sort_by(TransactionSort::Amount, None);
        assert_eq!(table.query.direction, SortDirection::Descending);
    }

    #[test]
    fn test_render() {
        let mut table = TransactionTable::dashboard();
        assert!(table.render("Recent").contains("No transactions found"));

        table.replace_records(sample(6));
        let output = table.render("Recent");
        assert!(output.contains("Date ▼"));
        assert!(output.contains("$60.00"));
        assert!(output.contains("Page 1 of 2 (6 transactions)"));
    }
}
