//! Monthly sale statistics
//!
//! Sales are bucketed by calendar month. Buckets live in a `BTreeMap`
//! keyed by [`PeriodKey`], so iteration is always chronological whatever
//! order the backend sent them in.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use shared::models::{SaleSummary, StatisticsResponse};
use shared::{money, util};

use super::{SaleError, SaleResult};

/// Year + month aggregation key, displayed as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Build a key; `None` unless `month` is in `1..=12`
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Month containing the given date
    pub fn of(date: &impl Datelike) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = SaleError;

    /// Accepts `YYYY-MM`, or any full sale date
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Some((year, month)) = raw.split_once('-')
            && !month.contains('-')
            && let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>())
        {
            return Self::new(year, month)
                .ok_or_else(|| SaleError::MalformedSale(format!("invalid period '{}'", s)));
        }
        util::parse_sale_date(raw)
            .map(|date| Self::of(&date))
            .ok_or_else(|| SaleError::MalformedSale(format!("invalid period '{}'", s)))
    }
}

/// Sales of one period and their total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsBucket {
    pub period: PeriodKey,
    pub sales: Vec<SaleSummary>,
    /// Sum of `total_price` over `sales`, in cents
    pub period_total: i64,
}

impl StatisticsBucket {
    fn new(period: PeriodKey) -> Self {
        Self {
            period,
            sales: Vec::new(),
            period_total: 0,
        }
    }

    fn push(&mut self, sale: SaleSummary) -> SaleResult<()> {
        self.period_total = self
            .period_total
            .checked_add(sale.total_price)
            .ok_or_else(|| total_out_of_range(self.period))?;
        self.sales.push(sale);
        Ok(())
    }
}

fn total_out_of_range(period: PeriodKey) -> SaleError {
    SaleError::MalformedSale(format!("sales total for {} out of range", period))
}

/// A period and its formatted amount, ready for a table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRow {
    pub period: PeriodKey,
    pub amount: String,
}

/// Sales grouped by month with per-month and grand totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleStatistics {
    buckets: BTreeMap<PeriodKey, StatisticsBucket>,
    grand_total: i64,
}

impl SaleStatistics {
    /// Group a flat list of sales by the month of their date
    pub fn group(sales: &[SaleSummary]) -> SaleResult<Self> {
        let mut stats = Self::default();
        for sale in sales {
            let date = util::parse_sale_date(&sale.sale_date).ok_or_else(|| {
                SaleError::MalformedSale(format!("unreadable sale date '{}'", sale.sale_date))
            })?;
            stats.insert(PeriodKey::of(&date), sale.clone())?;
        }
        tracing::debug!(
            sales = sales.len(),
            periods = stats.buckets.len(),
            "Sales grouped by month"
        );
        Ok(stats)
    }

    /// Consume the backend's pre-grouped `itemsByPeriod` mapping
    ///
    /// Keys naming the same month (`2024-03` and `2024-03-01`) are merged.
    pub fn from_response(response: StatisticsResponse) -> SaleResult<Self> {
        let mut stats = Self::default();
        for (raw_period, sales) in response.items_by_period {
            let period: PeriodKey = raw_period.parse()?;
            stats.buckets.entry(period).or_insert_with(|| StatisticsBucket::new(period));
            for sale in sales {
                stats.insert(period, sale)?;
            }
        }
        tracing::debug!(periods = stats.buckets.len(), "Statistics response loaded");
        Ok(stats)
    }

    fn insert(&mut self, period: PeriodKey, sale: SaleSummary) -> SaleResult<()> {
        let grand_total = self
            .grand_total
            .checked_add(sale.total_price)
            .ok_or_else(|| total_out_of_range(period))?;
        self.buckets
            .entry(period)
            .or_insert_with(|| StatisticsBucket::new(period))
            .push(sale)?;
        self.grand_total = grand_total;
        Ok(())
    }

    /// Buckets in chronological order
    pub fn buckets(&self) -> impl Iterator<Item = &StatisticsBucket> {
        self.buckets.values()
    }

    pub fn bucket(&self, period: &PeriodKey) -> Option<&StatisticsBucket> {
        self.buckets.get(period)
    }

    /// Sum of every period total, in cents
    pub fn grand_total(&self) -> i64 {
        self.grand_total
    }

    pub fn grand_total_display(&self) -> String {
        money::to_display(self.grand_total)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// One row per month, oldest first, amounts formatted
    pub fn display_rows(&self) -> Vec<PeriodRow> {
        self.buckets()
            .map(|b| PeriodRow {
                period: b.period,
                amount: money::to_display(b.period_total),
            })
            .collect()
    }
}
