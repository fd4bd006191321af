//! Sale lifecycle
//!
//! A [`SaleSession`] owns the basket being edited and decides which store
//! call a save turns into:
//!
//! - finalize: `create`, always with a fresh id, then the basket becomes
//!   `Finalized`
//! - draft: `update` keyed by the current id, with the payment forced to
//!   [`PaymentType::DRAFT`]
//!
//! Every save is split into [`SaleSession::prepare_save`], which validates
//! and stamps a generation, and [`SaleSession::complete_save`], which only
//! applies the backend answer if no newer basket or save has superseded it.

use shared::models::{PaymentType, SalePayload};

use super::basket::Basket;
use super::store::SaleStore;
use super::{SaleError, SaleResult};
use crate::ClientResult;

impl Basket {
    /// Parts still missing before the sale can be finalized
    pub fn missing_for_finalize(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.member_id().is_none() {
            missing.push("member");
        }
        if !self.payment_type().is_some_and(|p| !p.is_reserved()) {
            missing.push("payment");
        }
        if self.is_empty() {
            missing.push("items");
        }
        missing
    }

    /// Member attached, real payment chosen and at least one line
    pub fn can_finalize(&self) -> bool {
        self.missing_for_finalize().is_empty()
    }
}

/// Store operation a save maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Create,
    Update,
}

/// A save that has been validated and handed out, awaiting the backend
#[derive(Debug, Clone)]
pub struct PendingSave {
    generation: u64,
    kind: SaveKind,
    payload: SalePayload,
}

impl PendingSave {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> SaveKind {
        self.kind
    }

    /// Body to send to the store
    pub fn payload(&self) -> &SalePayload {
        &self.payload
    }

    /// Issue the store call this save maps to
    pub async fn send<S: SaleStore + ?Sized>(&self, store: &S) -> ClientResult<SalePayload> {
        match self.kind {
            SaveKind::Create => store.create(&self.payload).await,
            SaveKind::Update => store.update(&self.payload).await,
        }
    }
}

/// Outcome of a guarded completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The stored record was applied to the basket
    Applied(SalePayload),
    /// The basket moved on meanwhile; the answer was dropped
    Stale,
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// The basket on screen plus the request generation guarding it
#[derive(Debug, Default)]
pub struct SaleSession {
    basket: Basket,
    generation: u64,
}

impl SaleSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_basket(basket: Basket) -> Self {
        Self {
            basket,
            generation: 0,
        }
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// Line and member edits; these keep in-flight saves valid
    pub fn basket_mut(&mut self) -> &mut Basket {
        &mut self.basket
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in another basket, invalidating in-flight saves
    pub fn replace(&mut self, basket: Basket) -> Basket {
        self.generation += 1;
        std::mem::replace(&mut self.basket, basket)
    }

    /// Start over with an empty basket
    pub fn clear(&mut self) {
        self.replace(Basket::new());
    }

    pub fn can_finalize(&self) -> bool {
        self.basket.can_finalize()
    }

    /// Validate and build the store call for a save
    ///
    /// Nothing is sent and the basket is untouched; a newer call supersedes
    /// any save prepared before it.
    pub fn prepare_save(&mut self, finalize: bool) -> SaleResult<PendingSave> {
        if self.basket.is_finalized() {
            return Err(SaleError::AlreadyFinalized);
        }

        let mut payload = self.basket.to_payload();
        let kind = if finalize {
            let missing = self.basket.missing_for_finalize();
            if !missing.is_empty() {
                return Err(SaleError::NotReadyToFinalize(missing));
            }
            // Finalizing never reuses a draft id: the backend mints a new
            // record and the earlier draft stays behind.
            payload.id = None;
            payload.finalized = true;
            SaveKind::Create
        } else {
            payload.payment_designation = Some(PaymentType::DRAFT);
            payload.finalized = false;
            SaveKind::Update
        };

        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            kind = ?kind,
            items = payload.items.len(),
            "Sale save prepared"
        );
        Ok(PendingSave {
            generation: self.generation,
            kind,
            payload,
        })
    }

    /// Apply the backend answer to a prepared save
    ///
    /// Failures surface unchanged and leave the basket as it was. A success
    /// for a superseded save yields [`Completion::Stale`]. A finalized sale
    /// replaces the basket with the stored record; a draft save only takes
    /// the id and the draft sentinel, keeping edits made in the meantime.
    pub fn complete_save(
        &mut self,
        pending: PendingSave,
        result: ClientResult<SalePayload>,
    ) -> SaleResult<Completion> {
        let stored = result?;
        if pending.generation != self.generation {
            tracing::warn!(
                generation = pending.generation,
                current = self.generation,
                sale_id = ?stored.id,
                "Discarding stale sale save"
            );
            return Ok(Completion::Stale);
        }

        match pending.kind {
            SaveKind::Create => {
                // Lines edited while the create was in flight were never
                // stored; the finalized basket mirrors the record instead.
                let mut finalized = Basket::from_persisted(stored.clone())?;
                finalized.finalize(stored.id);
                self.basket = finalized;
            }
            SaveKind::Update => self.basket.apply_draft_save(stored.id),
        }
        tracing::info!(
            sale_id = ?stored.id,
            kind = ?pending.kind,
            total = self.basket.total_cost(),
            "Sale saved"
        );
        Ok(Completion::Applied(stored))
    }

    /// Persist the basket, as a finalized sale or as a draft
    pub async fn save<S: SaleStore + ?Sized>(
        &mut self,
        store: &S,
        finalize: bool,
    ) -> SaleResult<Completion> {
        let pending = self.prepare_save(finalize)?;
        let result = pending.send(store).await;
        self.complete_save(pending, result)
    }

    /// Delete the stored sale behind the basket
    ///
    /// Returns `false` without calling the store when the basket was never
    /// saved. On success the session starts over with an empty basket.
    pub async fn delete<S: SaleStore + ?Sized>(&mut self, store: &S) -> SaleResult<bool> {
        let Some(id) = self.basket.id() else {
            tracing::debug!("Delete skipped, basket was never saved");
            return Ok(false);
        };
        store.delete(id).await?;
        tracing::info!(sale_id = id, "Sale deleted");
        self.clear();
        Ok(true)
    }

    /// Fetch a stored sale and make it the current basket
    ///
    /// Saves still in flight for the previous basket become stale.
    pub async fn load<S: SaleStore + ?Sized>(&mut self, store: &S, id: i64) -> SaleResult<SalePayload> {
        let stored = store.fetch(id).await?;
        let basket = Basket::from_persisted(stored.clone())?;
        self.replace(basket);
        tracing::info!(sale_id = id, finalized = stored.finalized, "Sale loaded");
        Ok(stored)
    }
}
