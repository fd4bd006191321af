//! Basket - the cart assembled at the counter
//!
//! Lines are kept in insertion order with at most one line per article.
//! Prices are captured when the article is added and all arithmetic is done
//! in integer cents. Every edit is checked so the basket total always fits
//! in an `i64`; an edit that would overflow is rejected and leaves the
//! basket as it was.

use chrono::NaiveDateTime;
use shared::models::{Article, Member, PaymentType, SaleLinePayload, SalePayload};
use shared::{money, util};

use super::{SaleError, SaleResult};

/// One aggregated line of the basket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketItem {
    pub article_id: i64,
    /// Article name copied when the line was created
    pub name: String,
    pub quantity: i32,
    /// Unit price in cents, captured when the article was added
    pub unit_price: i64,
}

impl BasketItem {
    /// `unit_price * quantity`, `None` on overflow
    pub fn line_total(&self) -> Option<i64> {
        self.unit_price.checked_mul(i64::from(self.quantity))
    }
}

fn sum_lines(items: &[BasketItem]) -> Option<i64> {
    items
        .iter()
        .try_fold(0i64, |total, item| total.checked_add(item.line_total()?))
}

/// Whether a sale can still change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaleState {
    #[default]
    Draft,
    /// Terminal
    Finalized,
}

/// In-memory sale being assembled or edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket {
    id: Option<i64>,
    date: NaiveDateTime,
    items: Vec<BasketItem>,
    /// Sum of the line totals, kept in step with `items`
    total: i64,
    member_id: Option<i64>,
    member_full_name: Option<String>,
    payment_type: Option<PaymentType>,
    state: SaleState,
}

impl Default for Basket {
    fn default() -> Self {
        Self::new()
    }
}

impl Basket {
    /// Empty draft dated now
    pub fn new() -> Self {
        Self::dated(util::now_local())
    }

    /// Empty draft with an explicit creation date
    pub fn dated(date: NaiveDateTime) -> Self {
        Self {
            id: None,
            date,
            items: Vec::new(),
            total: 0,
            member_id: None,
            member_full_name: None,
            payment_type: None,
            state: SaleState::Draft,
        }
    }

    /// Rebuild a basket from a stored sale
    ///
    /// The id is kept and the date string parsed; everything else is copied
    /// as stored, including the `finalized` flag. Lines repeating an article
    /// are merged the way [`Basket::add_item`] merges them. A line with a
    /// non-positive quantity or a negative price is rejected.
    pub fn from_persisted(sale: SalePayload) -> SaleResult<Self> {
        let date = util::parse_sale_date(&sale.date)
            .ok_or_else(|| SaleError::MalformedSale(format!("unreadable date '{}'", sale.date)))?;

        let mut items: Vec<BasketItem> = Vec::with_capacity(sale.items.len());
        for line in sale.items {
            if line.quantity <= 0 || line.price < 0 {
                return Err(SaleError::MalformedSale(format!(
                    "article {} stored with quantity {} and price {}",
                    line.article_id, line.quantity, line.price
                )));
            }
            match items.iter_mut().find(|i| i.article_id == line.article_id) {
                Some(existing) => {
                    existing.quantity =
                        existing.quantity.checked_add(line.quantity).ok_or_else(|| {
                            SaleError::MalformedSale(format!(
                                "quantity overflow for article {}",
                                line.article_id
                            ))
                        })?;
                    existing.unit_price = line.price;
                }
                None => items.push(BasketItem {
                    article_id: line.article_id,
                    name: line.name,
                    quantity: line.quantity,
                    unit_price: line.price,
                }),
            }
        }
        let total = sum_lines(&items)
            .ok_or_else(|| SaleError::MalformedSale("sale total out of range".into()))?;

        Ok(Self {
            id: sale.id,
            date,
            items,
            total,
            member_id: sale.member_id,
            member_full_name: sale.member_full_name,
            payment_type: sale.payment_designation,
            state: if sale.finalized {
                SaleState::Finalized
            } else {
                SaleState::Draft
            },
        })
    }

    /// Wire representation of the basket as it stands
    pub fn to_payload(&self) -> SalePayload {
        SalePayload {
            id: self.id,
            date: util::format_sale_date(&self.date),
            items: self
                .items
                .iter()
                .map(|item| SaleLinePayload {
                    article_id: item.article_id,
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.unit_price,
                })
                .collect(),
            member_id: self.member_id,
            member_full_name: self.member_full_name.clone(),
            payment_designation: self.payment_type,
            finalized: self.is_finalized(),
        }
    }

    // ========== Accessors ==========

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    /// Line for the given article, if any
    pub fn item(&self, article_id: i64) -> Option<&BasketItem> {
        self.items.iter().find(|i| i.article_id == article_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn member_id(&self) -> Option<i64> {
        self.member_id
    }

    pub fn member_full_name(&self) -> Option<&str> {
        self.member_full_name.as_deref()
    }

    pub fn payment_type(&self) -> Option<PaymentType> {
        self.payment_type
    }

    pub fn state(&self) -> SaleState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        self.state == SaleState::Finalized
    }

    // ========== Edits ==========

    /// Add `quantity` units of an article at `unit_price` cents
    ///
    /// An existing line for the same article takes the new price and grows
    /// by `quantity`; otherwise a line is appended.
    pub fn add_item(&mut self, article: &Article, quantity: i32, unit_price: i64) -> SaleResult<()> {
        self.ensure_draft()?;
        if quantity <= 0 {
            return Err(SaleError::InvalidItem(format!(
                "quantity must be positive, got {}",
                quantity
            )));
        }
        if unit_price < 0 {
            return Err(SaleError::InvalidItem(format!(
                "price must be non-negative, got {}",
                unit_price
            )));
        }

        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.article_id == article.id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    SaleError::InvalidItem(format!("quantity overflow for article {}", article.id))
                })?;
                line.unit_price = unit_price;
            }
            None => items.push(BasketItem {
                article_id: article.id,
                name: article.name.clone(),
                quantity,
                unit_price,
            }),
        }
        self.commit(items)?;

        tracing::debug!(
            article_id = article.id,
            quantity,
            unit_price,
            "Article added to basket"
        );
        Ok(())
    }

    /// Add an article at its catalog price, or at the typed free price when
    /// the article has none
    pub fn add_article(
        &mut self,
        article: &Article,
        quantity: i32,
        free_price: Option<&str>,
    ) -> SaleResult<()> {
        let unit_price = match (article.sale_price, free_price) {
            (Some(price), _) => price,
            (None, Some(typed)) => {
                money::to_cents(typed).map_err(|e| SaleError::InvalidItem(e.to_string()))?
            }
            (None, None) => {
                return Err(SaleError::InvalidItem(format!(
                    "article '{}' has no catalog price and no price was typed",
                    article.name
                )));
            }
        };
        self.add_item(article, quantity, unit_price)
    }

    /// Remove the line of an article; returns the removed line
    pub fn remove_item(&mut self, article_id: i64) -> SaleResult<Option<BasketItem>> {
        self.ensure_draft()?;
        let mut items = self.items.clone();
        let removed = items
            .iter()
            .position(|i| i.article_id == article_id)
            .map(|index| items.remove(index));
        if removed.is_some() {
            self.commit(items)?;
        }
        Ok(removed)
    }

    /// One more unit on a line; `false` if the article has no line
    pub fn increment(&mut self, article_id: i64) -> SaleResult<bool> {
        self.ensure_draft()?;
        let mut items = self.items.clone();
        let Some(line) = items.iter_mut().find(|i| i.article_id == article_id) else {
            return Ok(false);
        };
        line.quantity = line.quantity.checked_add(1).ok_or_else(|| {
            SaleError::InvalidItem(format!("quantity overflow for article {}", article_id))
        })?;
        self.commit(items)?;
        Ok(true)
    }

    /// One unit less on a line, dropping the line instead of reaching zero
    pub fn decrement(&mut self, article_id: i64) -> SaleResult<bool> {
        self.ensure_draft()?;
        let mut items = self.items.clone();
        let Some(index) = items.iter().position(|i| i.article_id == article_id) else {
            return Ok(false);
        };
        if items[index].quantity <= 1 {
            items.remove(index);
        } else {
            items[index].quantity -= 1;
        }
        self.commit(items)?;
        Ok(true)
    }

    /// Attach the buying member
    pub fn set_member(&mut self, member: &Member) -> SaleResult<()> {
        self.ensure_draft()?;
        self.member_id = Some(member.id);
        self.member_full_name = Some(member.full_name());
        Ok(())
    }

    /// Choose how the sale is paid
    pub fn set_payment_type(&mut self, payment_type: PaymentType) -> SaleResult<()> {
        self.ensure_draft()?;
        self.payment_type = Some(payment_type);
        Ok(())
    }

    // ========== Totals ==========

    /// Exact total in cents
    pub fn total_cost(&self) -> i64 {
        self.total
    }

    /// Total formatted for display, e.g. `"37,50"`
    pub fn total_display(&self) -> String {
        money::to_display(self.total)
    }

    // ========== Lifecycle hooks ==========

    pub(crate) fn apply_draft_save(&mut self, id: Option<i64>) {
        self.id = id;
        self.payment_type = Some(PaymentType::DRAFT);
    }

    /// The one-way transition to `Finalized`
    pub(crate) fn finalize(&mut self, id: Option<i64>) {
        self.id = id;
        self.state = SaleState::Finalized;
    }

    fn ensure_draft(&self) -> SaleResult<()> {
        match self.state {
            SaleState::Draft => Ok(()),
            SaleState::Finalized => Err(SaleError::AlreadyFinalized),
        }
    }

    /// Install edited lines if their total is representable
    fn commit(&mut self, items: Vec<BasketItem>) -> SaleResult<()> {
        let total = sum_lines(&items)
            .ok_or_else(|| SaleError::InvalidItem("basket total out of range".into()))?;
        self.items = items;
        self.total = total;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn article(id: i64, name: &str, sale_price: Option<i64>) -> Article {
        Article {
            id,
            name: name.to_string(),
            sale_price,
            description: None,
            quantity: None,
        }
    }

    fn line(article_id: i64, quantity: i32, price: i64) -> SaleLinePayload {
        SaleLinePayload {
            article_id,
            name: format!("Article {}", article_id),
            quantity,
            price,
        }
    }

    fn member() -> Member {
        Member {
            id: 42,
            first_name: "Jeanne".into(),
            last_name: "Martin".into(),
            email: None,
            phone: None,
            is_volunteer: true,
        }
    }

    #[test]
    fn test_new_basket_is_empty_draft() {
        let basket = Basket::new();
        assert!(basket.is_empty());
        assert_eq!(basket.state(), SaleState::Draft);
        assert_eq!(basket.id(), None);
        assert_eq!(basket.total_cost(), 0);
    }

    #[test]
    fn test_add_item_appends_in_order() {
        let mut basket = Basket::new();
        basket.add_item(&article(2, "Badge", Some(250)), 1, 250).unwrap();
        basket.add_item(&article(1, "T-shirt", Some(1500)), 2, 1500).unwrap();

        let ids: Vec<i64> = basket.items().iter().map(|i| i.article_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(basket.item(1).unwrap().name, "T-shirt");
    }

    #[test]
    fn test_add_item_merges_same_article() {
        let mut basket = Basket::new();
        let shirt = article(1, "T-shirt", Some(1500));
        basket.add_item(&shirt, 2, 1500).unwrap();
        basket.add_item(&shirt, 3, 1200).unwrap();

        assert_eq!(basket.items().len(), 1);
        let line = basket.item(1).unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.unit_price, 1200);
    }

    #[test]
    fn test_add_item_rejects_invalid_values() {
        let mut basket = Basket::new();
        let shirt = article(1, "T-shirt", Some(1500));
        assert!(matches!(
            basket.add_item(&shirt, 0, 1500),
            Err(SaleError::InvalidItem(_))
        ));
        assert!(matches!(
            basket.add_item(&shirt, -2, 1500),
            Err(SaleError::InvalidItem(_))
        ));
        assert!(matches!(
            basket.add_item(&shirt, 1, -1),
            Err(SaleError::InvalidItem(_))
        ));
        assert!(basket.is_empty());
    }

    #[test]
    fn test_add_item_free_of_charge_is_allowed() {
        let mut basket = Basket::new();
        basket.add_item(&article(5, "Flyer", Some(0)), 10, 0).unwrap();
        assert_eq!(basket.total_cost(), 0);
        assert_eq!(basket.items().len(), 1);
    }

    #[test]
    fn test_add_article_uses_catalog_price() {
        let mut basket = Basket::new();
        basket
            .add_article(&article(1, "T-shirt", Some(1500)), 1, Some("99,00"))
            .unwrap();
        assert_eq!(basket.item(1).unwrap().unit_price, 1500);
    }

    #[test]
    fn test_add_article_free_price_truncates() {
        let mut basket = Basket::new();
        basket
            .add_article(&article(7, "Donation", None), 1, Some("12,345"))
            .unwrap();
        assert_eq!(basket.item(7).unwrap().unit_price, 1234);
    }

    #[test]
    fn test_add_article_without_any_price() {
        let mut basket = Basket::new();
        let donation = article(7, "Donation", None);
        assert!(matches!(
            basket.add_article(&donation, 1, None),
            Err(SaleError::InvalidItem(_))
        ));
        assert!(matches!(
            basket.add_article(&donation, 1, Some("a lot")),
            Err(SaleError::InvalidItem(_))
        ));
    }

    #[test]
    fn test_remove_item() {
        let mut basket = Basket::new();
        basket.add_item(&article(1, "T-shirt", None), 1, 1500).unwrap();
        basket.add_item(&article(2, "Badge", None), 1, 250).unwrap();

        let removed = basket.remove_item(1).unwrap();
        assert_eq!(removed.map(|l| l.article_id), Some(1));
        assert_eq!(basket.items().len(), 1);

        // absent line is a no-op
        assert_eq!(basket.remove_item(1).unwrap(), None);
        assert_eq!(basket.items().len(), 1);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut basket = Basket::new();
        basket.add_item(&article(1, "T-shirt", None), 2, 1500).unwrap();

        assert!(basket.increment(1).unwrap());
        assert_eq!(basket.item(1).unwrap().quantity, 3);

        assert!(basket.decrement(1).unwrap());
        assert_eq!(basket.item(1).unwrap().quantity, 2);

        assert!(!basket.increment(99).unwrap());
        assert!(!basket.decrement(99).unwrap());
    }

    #[test]
    fn test_decrement_last_unit_removes_line() {
        let mut basket = Basket::new();
        basket.add_item(&article(1, "T-shirt", None), 1, 1500).unwrap();
        assert!(basket.decrement(1).unwrap());
        assert!(basket.item(1).is_none());
        assert!(basket.is_empty());
    }

    #[test]
    fn test_set_member_builds_full_name() {
        let mut basket = Basket::new();
        basket.set_member(&member()).unwrap();
        assert_eq!(basket.member_id(), Some(42));
        assert_eq!(basket.member_full_name(), Some("Jeanne Martin"));
    }

    #[test]
    fn test_total_cost_and_display() {
        let mut basket = Basket::new();
        basket.add_item(&article(1, "T-shirt", None), 2, 1500).unwrap();
        basket.add_item(&article(2, "Badge", None), 3, 250).unwrap();
        assert_eq!(basket.total_cost(), 3750);
        assert_eq!(basket.total_display(), "37,50");
    }

    #[test]
    fn test_finalized_basket_rejects_edits() {
        let mut basket = Basket::new();
        basket.add_item(&article(1, "T-shirt", None), 1, 1500).unwrap();
        basket.finalize(Some(3));

        assert!(matches!(
            basket.add_item(&article(2, "Badge", None), 1, 250),
            Err(SaleError::AlreadyFinalized)
        ));
        assert!(matches!(basket.increment(1), Err(SaleError::AlreadyFinalized)));
        assert!(matches!(basket.decrement(1), Err(SaleError::AlreadyFinalized)));
        assert!(matches!(basket.remove_item(1), Err(SaleError::AlreadyFinalized)));
        assert!(matches!(
            basket.set_payment_type(PaymentType::Cash),
            Err(SaleError::AlreadyFinalized)
        ));
        assert_eq!(basket.item(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_from_persisted_keeps_id_and_parses_date() {
        let stored = SalePayload {
            id: Some(17),
            date: "2024-03-05T14:02:11.250".into(),
            items: vec![SaleLinePayload {
                article_id: 1,
                name: "T-shirt".into(),
                quantity: 2,
                price: 1500,
            }],
            member_id: Some(42),
            member_full_name: Some("Jeanne Martin".into()),
            payment_designation: Some(PaymentType::Waiting),
            finalized: false,
        };

        let basket = Basket::from_persisted(stored.clone()).unwrap();
        assert_eq!(basket.id(), Some(17));
        assert_eq!(basket.state(), SaleState::Draft);
        assert_eq!(util::format_sale_date(&basket.date()), stored.date);
        assert_eq!(basket.total_cost(), 3000);
        assert_eq!(basket.payment_type(), Some(PaymentType::Waiting));
        assert_eq!(basket.to_payload(), stored);
    }

    #[test]
    fn test_from_persisted_finalized_flag() {
        let stored = SalePayload {
            id: Some(3),
            date: "2024-03-05".into(),
            items: Vec::new(),
            member_id: None,
            member_full_name: None,
            payment_designation: Some(PaymentType::Card),
            finalized: true,
        };
        let basket = Basket::from_persisted(stored).unwrap();
        assert!(basket.is_finalized());
    }

    #[test]
    fn test_from_persisted_bad_date() {
        let stored = SalePayload {
            id: Some(3),
            date: "last tuesday".into(),
            items: Vec::new(),
            member_id: None,
            member_full_name: None,
            payment_designation: None,
            finalized: false,
        };
        assert!(matches!(
            Basket::from_persisted(stored),
            Err(SaleError::MalformedSale(_))
        ));
    }

    #[test]
    fn test_no_business_cap_on_quantity() {
        let mut basket = Basket::new();
        let badge = article(2, "Badge", None);
        basket.add_item(&badge, 9999, 100).unwrap();
        assert!(basket.increment(2).unwrap());
        basket.add_item(&badge, 10_000, 100).unwrap();
        assert_eq!(basket.item(2).unwrap().quantity, 20_000);
        assert_eq!(basket.total_cost(), 2_000_000);
    }

    #[test]
    fn test_quantity_overflow_is_rejected() {
        let mut basket = Basket::new();
        let badge = article(2, "Badge", None);
        basket.add_item(&badge, i32::MAX, 0).unwrap();
        assert!(matches!(basket.increment(2), Err(SaleError::InvalidItem(_))));
        assert!(matches!(
            basket.add_item(&badge, 1, 0),
            Err(SaleError::InvalidItem(_))
        ));
        assert_eq!(basket.item(2).unwrap().quantity, i32::MAX);
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let mut basket = Basket::new();
        let big = i64::MAX / 2 + 1;
        assert!(matches!(
            basket.add_item(&article(1, "Gold", None), 2, big),
            Err(SaleError::InvalidItem(_))
        ));
        assert!(basket.is_empty());

        basket.add_item(&article(1, "Gold", None), 1, big).unwrap();
        assert!(matches!(
            basket.add_item(&article(2, "Silver", None), 1, big),
            Err(SaleError::InvalidItem(_))
        ));
        assert!(matches!(basket.increment(1), Err(SaleError::InvalidItem(_))));
        assert_eq!(basket.items().len(), 1);
        assert_eq!(basket.total_cost(), big);
    }

    #[test]
    fn test_from_persisted_merges_repeated_articles() {
        let stored = SalePayload {
            id: Some(4),
            date: "2024-03-05".into(),
            items: vec![
                line(1, 1, 500),
                line(2, 2, 100),
                line(1, 3, 450),
            ],
            member_id: None,
            member_full_name: None,
            payment_designation: None,
            finalized: false,
        };
        let mut basket = Basket::from_persisted(stored).unwrap();
        assert_eq!(basket.items().len(), 2);
        let merged = basket.item(1).unwrap();
        assert_eq!((merged.quantity, merged.unit_price), (4, 450));
        assert_eq!(basket.total_cost(), 2000);

        assert!(basket.decrement(1).unwrap());
        assert_eq!(basket.item(1).unwrap().quantity, 3);
    }

    #[test]
    fn test_from_persisted_rejects_invalid_lines() {
        let with_lines = |items| SalePayload {
            id: Some(4),
            date: "2024-03-05".into(),
            items,
            member_id: None,
            member_full_name: None,
            payment_designation: None,
            finalized: false,
        };
        for items in [
            vec![line(1, 1, 100), line(1, 0, 100)],
            vec![line(1, -1, 100)],
            vec![line(1, 1, -5)],
            vec![line(1, 2, i64::MAX)],
        ] {
            assert!(matches!(
                Basket::from_persisted(with_lines(items)),
                Err(SaleError::MalformedSale(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn prop_same_article_merges(
            adds in prop::collection::vec((1i32..=50, 0i64..=100_000), 1..20)
        ) {
            let mut basket = Basket::new();
            let shirt = article(1, "T-shirt", None);
            for (quantity, price) in &adds {
                basket.add_item(&shirt, *quantity, *price).unwrap();
            }
            prop_assert_eq!(basket.items().len(), 1);
            let line = basket.item(1).unwrap();
            prop_assert_eq!(line.quantity, adds.iter().map(|(q, _)| q).sum::<i32>());
            prop_assert_eq!(line.unit_price, adds.last().unwrap().1);
        }

        #[test]
        fn prop_total_cost_is_exact(
            lines in prop::collection::vec((0i64..40, 1i32..=100, 0i64..=10_000_000), 0..30)
        ) {
            let mut basket = Basket::new();
            for (id, quantity, price) in &lines {
                basket.add_item(&article(*id, "x", None), *quantity, *price).unwrap();
            }
            // independent model: last price wins, quantities add up
            let mut model: std::collections::HashMap<i64, (i64, i64)> = Default::default();
            for (id, quantity, price) in &lines {
                let entry = model.entry(*id).or_insert((0, 0));
                entry.0 += i64::from(*quantity);
                entry.1 = *price;
            }
            let expected: i64 = model.values().map(|(q, p)| q * p).sum();
            prop_assert_eq!(basket.total_cost(), expected);
        }

        #[test]
        fn prop_increment_adds_one(start in 1i32..=100) {
            let mut basket = Basket::new();
            basket.add_item(&article(1, "x", None), start, 100).unwrap();
            basket.increment(1).unwrap();
            prop_assert_eq!(basket.item(1).unwrap().quantity, start + 1);
        }
    }
}
