//! Rate edit session
//!
//! An admin edits one company's rates on a working copy. Single rates are
//! edited through a draft (`Idle -> Editing -> Idle`); saving a draft merges
//! it into the working copy only. The backend sees the change when the whole
//! list is sent with [`RateEditor::save_all`].

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::error::AppError;
use crate::models::{country, CategoryRates, Country, TemplateCategory, TemplateRate};
use crate::rate_book::{RateBook, Upsert};
use crate::traits::RateStore;
use crate::AppResult;

/// Rate being edited in the dialog
#[derive(Debug, Clone, PartialEq)]
pub struct RateDraft {
    rate: TemplateRate,
    /// Country of the rate being edited; `None` for a new rate
    original_code: Option<String>,
}

impl RateDraft {
    fn blank(default_margin: Decimal) -> Self {
        let rate = TemplateRate {
            rates: CategoryRates::with_margin(default_margin),
            ..Default::default()
        };
        Self {
            rate,
            original_code: None,
        }
    }

    fn editing(rate: TemplateRate) -> Self {
        let original_code = Some(rate.country_code.clone());
        Self {
            rate,
            original_code,
        }
    }

    pub fn rate(&self) -> &TemplateRate {
        &self.rate
    }

    pub fn is_new(&self) -> bool {
        self.original_code.is_none()
    }

    pub fn original_code(&self) -> Option<&str> {
        self.original_code.as_deref()
    }

    /// Pick the draft's country; name and currency come from the catalog
    pub fn select_country(&mut self, code: &str) -> AppResult<()> {
        let country = country::lookup(code)
            .ok_or_else(|| AppError::UnknownCountry(code.to_string()))?;
        self.rate.country_code = country.code.to_string();
        self.rate.country_name = country.name.to_string();
        self.rate.currency = country.currency.to_string();
        Ok(())
    }

    pub fn set_interakt_price(&mut self, category: TemplateCategory, price: Decimal) -> AppResult<()> {
        self.rate.rates.get_mut(category).set_interakt_price(price)
    }

    pub fn set_margin_percentage(&mut self, category: TemplateCategory, margin: Decimal) -> AppResult<()> {
        self.rate.rates.get_mut(category).set_margin_percentage(margin)
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.rate.is_active = is_active;
    }
}

/// Dialog state of an edit session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(RateDraft),
}

/// Edit session over one company's rate list
#[derive(Debug, Clone)]
pub struct RateEditor {
    company_id: String,
    book: RateBook,
    state: EditState,
    dirty: bool,
    default_margin: Decimal,
}

impl RateEditor {
    pub fn new(company_id: impl Into<String>, rates: Vec<TemplateRate>, default_margin: Decimal) -> Self {
        Self {
            company_id: company_id.into(),
            book: RateBook::from_rates(rates),
            state: EditState::Idle,
            dirty: false,
            default_margin,
        }
    }

    /// Start a session from the backend's current rate list
    #[instrument(skip(store))]
    pub async fn load<S: RateStore + ?Sized>(
        store: &S,
        company_id: &str,
        default_margin: Decimal,
    ) -> AppResult<Self> {
        let rates = store.load_rates(company_id).await?;
        debug!(company_id, count = rates.len(), "Loaded template rates");
        Ok(Self::new(company_id, rates, default_margin))
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub fn book(&self) -> &RateBook {
        &self.book
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Whether the working copy differs from what was last loaded or saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn draft(&self) -> Option<&RateDraft> {
        match &self.state {
            EditState::Editing(draft) => Some(draft),
            EditState::Idle => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut RateDraft> {
        match &mut self.state {
            EditState::Editing(draft) => Some(draft),
            EditState::Idle => None,
        }
    }

    /// Open the dialog for a new rate; any open draft is discarded
    pub fn begin_new(&mut self) -> &mut RateDraft {
        self.state = EditState::Editing(RateDraft::blank(self.default_margin));
        match &mut self.state {
            EditState::Editing(draft) => draft,
            EditState::Idle => unreachable!("state was just set to Editing"),
        }
    }

    /// Open the dialog on an existing rate; any open draft is discarded
    pub fn begin_edit(&mut self, country_code: &str) -> AppResult<&mut RateDraft> {
        let rate = self
            .book
            .find_by_country(country_code)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No rate for country {}", country_code)))?;

        self.state = EditState::Editing(RateDraft::editing(rate));
        match &mut self.state {
            EditState::Editing(draft) => Ok(draft),
            EditState::Idle => unreachable!("state was just set to Editing"),
        }
    }

    /// Countries selectable in the open dialog
    ///
    /// Existing countries are hidden, except the one being edited.
    pub fn available_countries(&self) -> Vec<&'static Country> {
        let editing = self.draft().and_then(RateDraft::original_code);
        country::available_for(self.book.as_slice(), editing)
    }

    /// Merge the draft into the working copy and close the dialog
    ///
    /// Nothing is sent to the backend. On a validation failure the dialog
    /// stays open with the draft untouched.
    pub fn save(&mut self) -> AppResult<Upsert> {
        let draft = self
            .draft()
            .ok_or_else(|| AppError::Validation("No rate is being edited".to_string()))?;

        let code = draft.rate.country_code.trim();
        if code.is_empty() {
            return Err(AppError::MissingField("country".to_string()));
        }
        if country::lookup(code).is_none() {
            return Err(AppError::UnknownCountry(code.to_string()));
        }

        let same_as_original = draft
            .original_code
            .as_deref()
            .is_some_and(|orig| orig.eq_ignore_ascii_case(code));
        if !same_as_original && self.book.find_by_country(code).is_some() {
            warn!(country = code, "Rate save rejected: country already configured");
            return Err(AppError::DuplicateCountry(code.to_string()));
        }

        let EditState::Editing(draft) = std::mem::take(&mut self.state) else {
            unreachable!("draft presence checked above");
        };

        // The country of an existing rate was changed: drop the old entry
        if let Some(orig) = draft.original_code.as_deref() {
            if !same_as_original {
                self.book.remove(orig);
            }
        }

        let outcome = self.book.upsert(draft.rate);
        self.dirty = true;
        Ok(outcome)
    }

    /// Close the dialog, discarding the draft
    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
    }

    /// Remove a rate from the working copy; absent codes are a no-op
    pub fn remove(&mut self, country_code: &str) -> bool {
        let removed = self.book.remove(country_code);
        self.dirty |= removed;
        removed
    }

    /// Activate or deactivate a rate in the working copy
    pub fn set_active(&mut self, country_code: &str, is_active: bool) -> bool {
        let changed = self.book.set_active(country_code, is_active);
        self.dirty |= changed;
        changed
    }

    /// Send the whole working copy to the backend, replacing its list
    ///
    /// Single attempt; on failure the working copy is kept as is.
    #[instrument(skip(self, store), fields(company_id = %self.company_id, count = self.book.len()))]
    pub async fn save_all<S: RateStore + ?Sized>(&mut self, store: &S) -> AppResult<()> {
        store
            .save_rates(&self.company_id, self.book.as_slice())
            .await?;
        self.dirty = false;
        info!("Template rates saved");
        Ok(())
    }
}
