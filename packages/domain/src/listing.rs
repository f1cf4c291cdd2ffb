//! # Quest board listing state
//!
//! [`QuestBoard`] owns the fetched records and everything derived from them:
//!
//! | Derived | Recomputed when |
//! |---------|-----------------|
//! | [`Counts`] | records are loaded; `important` again on every toggle |
//! | visible view | a menu entry is selected (see [`MailFilter`]) |
//! | current page | the filter changes (back to page 1) or the user pages |
//!
//! The view is a snapshot of record positions taken at selection time. Toggling
//! importance changes what a visible row shows but does not re-filter, so an
//! un-starred quest stays on the "important" page until the next selection.
//!
//! The importance toggle is optimistic: [`QuestBoard::toggle_important`] flips the
//! local flag, and the caller propagates it with
//! [`crate::backend::propagate_importance`]. A failed propagation is logged and the
//! local flag is kept; nothing reconciles the two afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::quest::{MailId, QuestRecord, QuestStatus};

/// The listing's filter state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MailFilter {
    /// Everything except trash.
    #[default]
    All,
    ByStatus(QuestStatus),
    Important,
    Trash,
}

impl MailFilter {
    /// Value written to the `status` query parameter.
    pub fn query_value(&self) -> &str {
        match self {
            MailFilter::All => "all",
            MailFilter::Important => "important",
            MailFilter::Trash => "trash",
            MailFilter::ByStatus(status) => status.key(),
        }
    }

    pub fn matches(&self, record: &QuestRecord) -> bool {
        match self {
            MailFilter::All => !record.status.is_trash(),
            MailFilter::ByStatus(status) => &record.status == status,
            MailFilter::Important => record.is_important,
            MailFilter::Trash => record.status.is_trash(),
        }
    }
}

impl fmt::Display for MailFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value())
    }
}

impl FromStr for MailFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" | "all" => MailFilter::All,
            "important" => MailFilter::Important,
            "trash" => MailFilter::Trash,
            other => MailFilter::ByStatus(QuestStatus::from(other.to_string())),
        })
    }
}

/// Records matching `filter`, in fetch order.
pub fn derive_view<'a>(records: &'a [QuestRecord], filter: &MailFilter) -> Vec<&'a QuestRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Per-status badge counts shown in the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    /// Active (non-trash) records.
    pub total: usize,
    pub preparing: usize,
    pub pending: usize,
    pub completed: usize,
    pub refuse: usize,
    /// Starred records, trash included.
    pub important: usize,
    pub trash: usize,
}

impl Counts {
    pub fn from_records(records: &[QuestRecord]) -> Self {
        let mut counts = Counts {
            important: count_important(records),
            ..Counts::default()
        };
        for record in records {
            match record.status {
                QuestStatus::Preparing => counts.preparing += 1,
                QuestStatus::Pending => counts.pending += 1,
                QuestStatus::Completed => counts.completed += 1,
                QuestStatus::Refuse => counts.refuse += 1,
                QuestStatus::Trash => counts.trash += 1,
                QuestStatus::Other(_) => {}
            }
            if !record.status.is_trash() {
                counts.total += 1;
            }
        }
        counts
    }

    pub fn for_filter(&self, filter: &MailFilter) -> usize {
        match filter {
            MailFilter::All => self.total,
            MailFilter::Important => self.important,
            MailFilter::Trash | MailFilter::ByStatus(QuestStatus::Trash) => self.trash,
            MailFilter::ByStatus(QuestStatus::Preparing) => self.preparing,
            MailFilter::ByStatus(QuestStatus::Pending) => self.pending,
            MailFilter::ByStatus(QuestStatus::Completed) => self.completed,
            MailFilter::ByStatus(QuestStatus::Refuse) => self.refuse,
            MailFilter::ByStatus(QuestStatus::Other(_)) => 0,
        }
    }
}

fn count_important(records: &[QuestRecord]) -> usize {
    records.iter().filter(|r| r.is_important).count()
}

/// Which timestamp the last table column shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeColumn {
    /// `sentAt`
    #[default]
    #[serde(rename = "sentAt")]
    RequestedAt,
    /// `time`
    #[serde(rename = "time")]
    AvailableAt,
}

impl TimeColumn {
    pub const ALL: [TimeColumn; 2] = [TimeColumn::RequestedAt, TimeColumn::AvailableAt];

    pub fn key(self) -> &'static str {
        match self {
            TimeColumn::RequestedAt => "sentAt",
            TimeColumn::AvailableAt => "time",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeColumn::RequestedAt => "의뢰 요청시간",
            TimeColumn::AvailableAt => "의뢰 가능시간",
        }
    }

    pub fn value(self, record: &QuestRecord) -> String {
        match self {
            TimeColumn::RequestedAt => record.requested_at_display(),
            TimeColumn::AvailableAt => record.time.clone(),
        }
    }
}

/// Badge colour of a menu count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    Red,
    Blue,
    Green,
    Grey,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuEntry {
    pub filter: MailFilter,
    pub label: &'static str,
    pub count: usize,
    pub tone: BadgeTone,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MenuItem {
    Group {
        entry: MenuEntry,
        children: Vec<MenuEntry>,
    },
    Entry(MenuEntry),
    /// Shown but not selectable.
    Label(&'static str),
    Divider,
}

/// The navigation menu for the given counts.
pub fn menu(counts: &Counts) -> Vec<MenuItem> {
    let child = |status: QuestStatus| {
        let label = status_label(&status);
        let filter = MailFilter::ByStatus(status);
        MenuEntry {
            label,
            count: counts.for_filter(&filter),
            filter,
            tone: BadgeTone::Blue,
        }
    };

    vec![
        MenuItem::Group {
            entry: MenuEntry {
                filter: MailFilter::All,
                label: "전체 의뢰함",
                count: counts.total,
                tone: BadgeTone::Red,
            },
            children: QuestStatus::FILTERABLE.into_iter().map(child).collect(),
        },
        MenuItem::Entry(MenuEntry {
            filter: MailFilter::Important,
            label: "중요 의뢰함",
            count: counts.important,
            tone: BadgeTone::Green,
        }),
        MenuItem::Label("종료된 의뢰함"),
        MenuItem::Divider,
        MenuItem::Entry(MenuEntry {
            filter: MailFilter::Trash,
            label: "휴지통",
            count: counts.trash,
            tone: BadgeTone::Grey,
        }),
    ]
}

fn status_label(status: &QuestStatus) -> &'static str {
    match status {
        QuestStatus::Preparing => "신청중",
        QuestStatus::Pending => "보류중",
        QuestStatus::Completed => "신청완료",
        QuestStatus::Refuse => "신청거절",
        QuestStatus::Trash => "휴지통",
        QuestStatus::Other(_) => "기타",
    }
}

/// Listing state for the quest board page.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestBoard {
    records: Vec<QuestRecord>,
    filter: MailFilter,
    /// Positions into `records` of the visible rows.
    view: Vec<usize>,
    counts: Counts,
    time_column: TimeColumn,
    /// 1-based.
    page: usize,
    page_size: usize,
}

impl Default for QuestBoard {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, TimeColumn::default())
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

impl QuestBoard {
    pub fn new(page_size: usize, time_column: TimeColumn) -> Self {
        Self {
            records: Vec::new(),
            filter: MailFilter::All,
            view: Vec::new(),
            counts: Counts::default(),
            time_column,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the record set. The listing always restarts at [`MailFilter::All`].
    pub fn load(&mut self, records: Vec<QuestRecord>) {
        self.counts = Counts::from_records(&records);
        self.records = records;
        self.select(MailFilter::All);
    }

    /// Menu transition: re-derive the view for `filter` and go back to page 1.
    pub fn select(&mut self, filter: MailFilter) {
        self.view = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(r))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(filter = %filter, rows = self.view.len(), "quest board filter selected");
        self.filter = filter;
        self.page = 1;
    }

    /// Flip a record's importance flag. Returns the new flag, or `None` for an
    /// unknown id.
    pub fn toggle_important(&mut self, id: &MailId) -> Option<bool> {
        let record = self.records.iter_mut().find(|r| &r.id == id)?;
        record.is_important = !record.is_important;
        let flag = record.is_important;
        self.counts.important = count_important(&self.records);
        Some(flag)
    }

    pub fn filter(&self) -> &MailFilter {
        &self.filter
    }

    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    pub fn records(&self) -> &[QuestRecord] {
        &self.records
    }

    pub fn record(&self, id: &MailId) -> Option<&QuestRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn time_column(&self) -> TimeColumn {
        self.time_column
    }

    pub fn set_time_column(&mut self, column: TimeColumn) {
        self.time_column = column;
    }

    /// Every row of the current view, all pages.
    pub fn visible(&self) -> Vec<&QuestRecord> {
        self.view.iter().filter_map(|&i| self.records.get(i)).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.view.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// At least one, so an empty view still has a page to show.
    pub fn page_count(&self) -> usize {
        self.view.len().div_ceil(self.page_size).max(1)
    }

    /// Move to `page`, clamped to `1..=page_count()`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    /// Rows of the current page.
    pub fn page_rows(&self) -> Vec<&QuestRecord> {
        let start = (self.page - 1) * self.page_size;
        self.view
            .iter()
            .skip(start)
            .take(self.page_size)
            .filter_map(|&i| self.records.get(i))
            .collect()
    }
}
