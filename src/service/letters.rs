//! Letter of credit lifecycle operations.
use super::{parse_payload, refuse, require_id};
use crate::auth::{self, resolve_participant};
use crate::error::{LocError, LocResult};
use crate::letter::{Evidence, LetterOfCredit, ProductDetails, Rule};
use crate::participants::Participant;
use crate::store::{ObjectType, RecordStore, create_json, get_json, put_json, scan_json};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct LetterService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> LetterService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn load_letter(&self, letter_id: &str) -> LocResult<LetterOfCredit> {
        get_json(&*self.store, ObjectType::LetterOfCredit, letter_id)
    }

    fn save_letter(&self, letter: &LetterOfCredit) -> LocResult<()> {
        put_json(&*self.store, ObjectType::LetterOfCredit, letter.id(), letter)?;
        info!(letter_id = letter.id(), status = %letter.status(), "letter of credit updated");
        Ok(())
    }

    /// The letter as JSON, provided the caller is one of its parties.
    ///
    /// Encoding a letter only involves strings, numbers, booleans and
    /// sequences so it does not fail in practice; if it ever did, the
    /// `Encode` error is returned rather than an empty document.
    #[instrument(skip(self))]
    pub fn get(&self, letter_id: &str, role: &str, participant_id: &str) -> LocResult<String> {
        let letter = self.get_letter(letter_id, role, participant_id)?;
        Ok(serde_json::to_string(&letter)?)
    }

    /// Typed form of [`LetterService::get`].
    pub fn get_letter(
        &self,
        letter_id: &str,
        role: &str,
        participant_id: &str,
    ) -> LocResult<LetterOfCredit> {
        let (_, participant) = resolve_participant(&*self.store, role, participant_id)
            .map_err(refuse)?;
        let letter = self.load_letter(letter_id)?;

        ensure_party(&letter, &participant)?;
        Ok(letter)
    }

    /// Every letter the caller is a party to, as a JSON array.
    #[instrument(skip(self))]
    pub fn get_all(&self, role: &str, participant_id: &str) -> LocResult<String> {
        let letters = self.get_all_letters(role, participant_id)?;
        Ok(serde_json::to_string(&letters)?)
    }

    pub fn get_all_letters(
        &self,
        role: &str,
        participant_id: &str,
    ) -> LocResult<Vec<LetterOfCredit>> {
        let (_, participant) = resolve_participant(&*self.store, role, participant_id)
            .map_err(refuse)?;
        let letters: Vec<LetterOfCredit> = scan_json(&*self.store, ObjectType::LetterOfCredit)?;

        Ok(letters
            .into_iter()
            .filter(|letter| letter.is_party(&participant))
            .collect())
    }

    /// Create a letter between two registered customers.
    ///
    /// The issuing and exporting banks are taken from the applicant's and
    /// beneficiary's banks at this moment and never change afterwards.
    #[instrument(skip(self, rules_json, product_details_json))]
    pub fn apply(
        &self,
        letter_id: &str,
        applicant_id: &str,
        beneficiary_id: &str,
        rules_json: &str,
        product_details_json: &str,
    ) -> LocResult<LetterOfCredit> {
        require_id(letter_id, "letter id")?;
        require_id(applicant_id, "applicant id")?;
        require_id(beneficiary_id, "beneficiary id")?;
        let rules: Vec<Rule> = parse_payload(rules_json, "slice of rules")?;
        let product_details: ProductDetails =
            parse_payload(product_details_json, "productDetails object")?;

        let applicant = auth::get_customer(&*self.store, applicant_id)?;
        let beneficiary = auth::get_customer(&*self.store, beneficiary_id)?;

        let letter = LetterOfCredit::new(letter_id, applicant, beneficiary, rules, product_details);
        create_json(&*self.store, ObjectType::LetterOfCredit, letter_id, &letter)?;

        info!(letter_id, status = %letter.status(), "letter of credit applied for");
        Ok(letter)
    }

    /// Add the approval of `role`. The fourth approval moves the letter to `APPROVED`.
    #[instrument(skip(self))]
    pub fn approve(
        &self,
        letter_id: &str,
        role: &str,
        participant_id: &str,
    ) -> LocResult<LetterOfCredit> {
        let mut letter = self.load_letter(letter_id)?;
        letter.ensure_editable().map_err(refuse)?;

        let (role, participant) = resolve_participant(&*self.store, role, participant_id)
            .map_err(refuse)?;
        if !auth::is_specific_party(&letter, &participant, role) {
            return Err(refuse(LocError::Unauthorized(format!("a valid {role}"))));
        }

        letter.approve(role)?;
        self.save_letter(&letter)?;
        Ok(letter)
    }

    /// Clear every approval and mark the letter `REJECTED`, whatever its status.
    #[instrument(skip(self))]
    pub fn reject(
        &self,
        letter_id: &str,
        role: &str,
        participant_id: &str,
    ) -> LocResult<LetterOfCredit> {
        let mut letter = self.load_letter(letter_id)?;

        let (_, participant) = resolve_participant(&*self.store, role, participant_id)
            .map_err(refuse)?;
        ensure_party(&letter, &participant)?;

        let previous = letter.status();
        letter.reject();
        self.save_letter(&letter)?;

        if previous.is_terminal() {
            tracing::warn!(letter_id, %previous, "terminal letter of credit rejected");
        }
        Ok(letter)
    }

    /// Replace the rules. Only the proposer's approval survives the change.
    #[instrument(skip(self, rules_json))]
    pub fn suggest_rule_change(
        &self,
        letter_id: &str,
        rules_json: &str,
        role: &str,
        participant_id: &str,
    ) -> LocResult<LetterOfCredit> {
        let rules: Vec<Rule> = parse_payload(rules_json, "slice of rules")?;

        let mut letter = self.load_letter(letter_id)?;
        letter.ensure_editable().map_err(refuse)?;

        let (role, participant) = resolve_participant(&*self.store, role, participant_id)
            .map_err(refuse)?;
        ensure_party(&letter, &participant)?;

        letter.suggest_rule_change(rules, role)?;
        self.save_letter(&letter)?;
        Ok(letter)
    }

    /// The beneficiary records shipment of an approved letter and attaches the evidence.
    #[instrument(skip(self, evidence_json))]
    pub fn mark_as_shipped(
        &self,
        letter_id: &str,
        participant_id: &str,
        evidence_json: &str,
    ) -> LocResult<LetterOfCredit> {
        let evidence: Evidence = parse_payload(evidence_json, "evidence")?;

        let mut letter = self.load_letter(letter_id)?;
        let customer = auth::get_customer(&*self.store, participant_id).map_err(refuse)?;
        let caller = Participant::Customer(customer);

        if !letter.is_beneficiary(&caller) {
            return Err(refuse(LocError::Unauthorized("beneficiary".into())));
        }

        letter.mark_shipped(evidence).map_err(refuse)?;
        self.save_letter(&letter)?;
        Ok(letter)
    }

    /// The applicant confirms the goods arrived.
    #[instrument(skip(self))]
    pub fn mark_as_received(
        &self,
        letter_id: &str,
        participant_id: &str,
    ) -> LocResult<LetterOfCredit> {
        let mut letter = self.load_letter(letter_id)?;
        let customer = auth::get_customer(&*self.store, participant_id).map_err(refuse)?;
        let caller = Participant::Customer(customer);

        if !letter.is_applicant(&caller) {
            return Err(refuse(LocError::Unauthorized("applicant".into())));
        }

        letter.mark_received().map_err(refuse)?;
        self.save_letter(&letter)?;
        Ok(letter)
    }

    /// An employee of the issuing bank releases the letter for payment.
    #[instrument(skip(self))]
    pub fn mark_as_ready_for_payment(
        &self,
        letter_id: &str,
        participant_id: &str,
    ) -> LocResult<LetterOfCredit> {
        let mut letter = self.load_letter(letter_id)?;
        let banker = auth::get_bank_employee(&*self.store, participant_id).map_err(refuse)?;
        let caller = Participant::BankEmployee(banker);

        if !letter.is_issuing_bank(&caller) {
            return Err(refuse(LocError::Unauthorized("issuing bank".into())));
        }

        letter.mark_ready_for_payment().map_err(refuse)?;
        self.save_letter(&letter)?;
        Ok(letter)
    }

    /// An employee of the exporting bank closes the letter.
    #[instrument(skip(self))]
    pub fn close(&self, letter_id: &str, participant_id: &str) -> LocResult<LetterOfCredit> {
        let mut letter = self.load_letter(letter_id)?;
        let banker = auth::get_bank_employee(&*self.store, participant_id).map_err(refuse)?;
        let caller = Participant::BankEmployee(banker);

        if !letter.is_exporting_bank(&caller) {
            return Err(refuse(LocError::Unauthorized("exporting bank".into())));
        }

        letter.close().map_err(refuse)?;
        self.save_letter(&letter)?;
        Ok(letter)
    }
}

fn ensure_party(letter: &LetterOfCredit, participant: &Participant) -> LocResult<()> {
    if auth::is_party(letter, participant) {
        Ok(())
    } else {
        Err(refuse(LocError::Unauthorized(
            "a party in the letter of credit".into(),
        )))
    }
}
