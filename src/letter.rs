//! The letter of credit aggregate and the values it is built from.
//!
//! The entity never touches the store. Lifecycle operations load it, call the
//! mutators below, and write it back.
use crate::error::{LocError, LocResult};
use crate::participants::{Bank, Customer, Participant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterStatus {
    AwaitingApproval,
    Approved,
    Shipped,
    Received,
    ReadyForPayment,
    Closed,
    Rejected,
}

impl LetterStatus {
    pub const ALL: [LetterStatus; 7] = [
        LetterStatus::AwaitingApproval,
        LetterStatus::Approved,
        LetterStatus::Shipped,
        LetterStatus::Received,
        LetterStatus::ReadyForPayment,
        LetterStatus::Closed,
        LetterStatus::Rejected,
    ];

    /// Position in the progression. `Rejected` sits outside it and has none.
    pub fn rank(&self) -> Option<u8> {
        match self {
            LetterStatus::AwaitingApproval => Some(0),
            LetterStatus::Approved => Some(1),
            LetterStatus::Shipped => Some(2),
            LetterStatus::Received => Some(3),
            LetterStatus::ReadyForPayment => Some(4),
            LetterStatus::Closed => Some(5),
            LetterStatus::Rejected => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LetterStatus::Closed | LetterStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterStatus::AwaitingApproval => "AWAITING_APPROVAL",
            LetterStatus::Approved => "APPROVED",
            LetterStatus::Shipped => "SHIPPED",
            LetterStatus::Received => "RECEIVED",
            LetterStatus::ReadyForPayment => "READY_FOR_PAYMENT",
            LetterStatus::Closed => "CLOSED",
            LetterStatus::Rejected => "REJECTED",
        }
    }

    // The status a letter must be at before it can move to `self` in the shipping pipeline.
    fn pipeline_predecessor(&self) -> Option<LetterStatus> {
        match self {
            LetterStatus::Shipped => Some(LetterStatus::Approved),
            LetterStatus::Received => Some(LetterStatus::Shipped),
            LetterStatus::ReadyForPayment => Some(LetterStatus::Received),
            LetterStatus::Closed => Some(LetterStatus::ReadyForPayment),
            _ => None,
        }
    }
}

impl fmt::Display for LetterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterStatus {
    type Err = LocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LetterStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LocError::malformed(s, "letter status"))
    }
}

/// One of the four signers of a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Applicant,
    Beneficiary,
    IssuingBank,
    ExportingBank,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Applicant,
        Role::Beneficiary,
        Role::IssuingBank,
        Role::ExportingBank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Applicant => "applicant",
            Role::Beneficiary => "beneficiary",
            Role::IssuingBank => "issuingBank",
            Role::ExportingBank => "exportingBank",
        }
    }

    /// Applicant and beneficiary are customers, the two banks act through employees.
    pub fn is_customer_role(&self) -> bool {
        matches!(self, Role::Applicant | Role::Beneficiary)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "applicant" => Ok(Role::Applicant),
            "beneficiary" => Ok(Role::Beneficiary),
            "issuingbank" => Ok(Role::IssuingBank),
            "exportingbank" => Ok(Role::ExportingBank),
            _ => Err(LocError::InvalidRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub wording: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub product_type: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub name: String,
    pub hash: String,
}

/// Approval quorum, one flag per signer. Not a count: all four must be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub applicant: bool,
    pub beneficiary: bool,
    pub issuing_bank: bool,
    pub exporting_bank: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterOfCredit {
    id: String,
    applicant: Customer,
    beneficiary: Customer,
    issuing_bank: Bank,
    exporting_bank: Bank,
    rules: Vec<Rule>,
    product_details: ProductDetails,
    evidence: Vec<Evidence>,
    approval: Approval,
    status: LetterStatus,
}

impl Rule {
    pub fn new(name: impl Into<String>, wording: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wording: wording.into(),
        }
    }
}

impl ProductDetails {
    pub fn new(product_type: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self {
            product_type: product_type.into(),
            quantity,
            unit_price,
        }
    }
}

impl Evidence {
    pub fn new(name: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash: hash.into(),
        }
    }

    /// Evidence whose hash is the hex sha256 digest of `document`.
    pub fn from_document(name: impl Into<String>, document: impl AsRef<[u8]>) -> Self {
        let contents = document.as_ref().to_vec();
        Self {
            name: name.into(),
            hash: sha256::digest(&contents),
        }
    }
}

impl Approval {
    /// The applicant's request counts as their approval.
    pub fn on_application() -> Self {
        Self {
            applicant: true,
            ..Self::default()
        }
    }

    pub fn grant(&mut self, role: Role) {
        match role {
            Role::Applicant => self.applicant = true,
            Role::Beneficiary => self.beneficiary = true,
            Role::IssuingBank => self.issuing_bank = true,
            Role::ExportingBank => self.exporting_bank = true,
        }
    }

    pub fn is_granted(&self, role: Role) -> bool {
        match role {
            Role::Applicant => self.applicant,
            Role::Beneficiary => self.beneficiary,
            Role::IssuingBank => self.issuing_bank,
            Role::ExportingBank => self.exporting_bank,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_complete(&self) -> bool {
        self.applicant && self.beneficiary && self.issuing_bank && self.exporting_bank
    }
}

impl LetterOfCredit {
    /// A freshly applied-for letter. The banks are fixed to the customers' banks as of now.
    pub fn new(
        id: impl Into<String>,
        applicant: Customer,
        beneficiary: Customer,
        rules: Vec<Rule>,
        product_details: ProductDetails,
    ) -> Self {
        let issuing_bank = applicant.bank.clone();
        let exporting_bank = beneficiary.bank.clone();

        Self {
            id: id.into(),
            applicant,
            beneficiary,
            issuing_bank,
            exporting_bank,
            rules,
            product_details,
            evidence: vec![],
            approval: Approval::on_application(),
            status: LetterStatus::AwaitingApproval,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn applicant(&self) -> &Customer {
        &self.applicant
    }
    pub fn beneficiary(&self) -> &Customer {
        &self.beneficiary
    }
    pub fn issuing_bank(&self) -> &Bank {
        &self.issuing_bank
    }
    pub fn exporting_bank(&self) -> &Bank {
        &self.exporting_bank
    }
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
    pub fn product_details(&self) -> &ProductDetails {
        &self.product_details
    }
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }
    pub fn approval(&self) -> &Approval {
        &self.approval
    }
    pub fn status(&self) -> LetterStatus {
        self.status
    }

    pub fn is_applicant(&self, participant: &Participant) -> bool {
        matches!(participant, Participant::Customer(c) if *c == self.applicant)
    }

    pub fn is_beneficiary(&self, participant: &Participant) -> bool {
        matches!(participant, Participant::Customer(c) if *c == self.beneficiary)
    }

    pub fn is_issuing_bank(&self, participant: &Participant) -> bool {
        matches!(participant, Participant::BankEmployee(b) if b.bank == self.issuing_bank)
    }

    pub fn is_exporting_bank(&self, participant: &Participant) -> bool {
        matches!(participant, Participant::BankEmployee(b) if b.bank == self.exporting_bank)
    }

    pub fn is_party(&self, participant: &Participant) -> bool {
        Role::ALL
            .into_iter()
            .any(|role| self.is_specific_party(participant, role))
    }

    pub fn is_specific_party(&self, participant: &Participant, role: Role) -> bool {
        match role {
            Role::Applicant => self.is_applicant(participant),
            Role::Beneficiary => self.is_beneficiary(participant),
            Role::IssuingBank => self.is_issuing_bank(participant),
            Role::ExportingBank => self.is_exporting_bank(participant),
        }
    }

    pub fn fully_approved(&self) -> bool {
        self.approval.is_complete()
    }

    /// Rules and approvals may only change while awaiting approval and before the quorum is met.
    pub fn is_editable(&self) -> bool {
        self.status == LetterStatus::AwaitingApproval && !self.fully_approved()
    }

    pub fn ensure_editable(&self) -> LocResult<()> {
        if self.status != LetterStatus::AwaitingApproval {
            return Err(LocError::NotEditable("is no longer editable".into()));
        }
        if self.fully_approved() {
            return Err(LocError::NotEditable("has already been approved".into()));
        }
        Ok(())
    }

    /// Record `role`'s approval; the fourth flag moves the letter to `Approved`.
    pub fn approve(&mut self, role: Role) -> LocResult<()> {
        self.ensure_editable()?;
        self.approval.grant(role);

        if self.fully_approved() {
            self.status = LetterStatus::Approved;
        }
        Ok(())
    }

    /// Replace the rules. Every earlier approval is void; only the proposer's stands.
    pub fn suggest_rule_change(&mut self, rules: Vec<Rule>, proposer: Role) -> LocResult<()> {
        self.ensure_editable()?;
        self.rules = rules;
        self.approval.clear();
        self.approval.grant(proposer);
        Ok(())
    }

    /// Allowed from any status.
    pub fn reject(&mut self) {
        self.approval.clear();
        self.status = LetterStatus::Rejected;
    }

    pub fn mark_shipped(&mut self, evidence: Evidence) -> LocResult<()> {
        self.advance(LetterStatus::Shipped)?;
        self.evidence.push(evidence);
        Ok(())
    }

    pub fn mark_received(&mut self) -> LocResult<()> {
        self.advance(LetterStatus::Received)
    }

    pub fn mark_ready_for_payment(&mut self) -> LocResult<()> {
        self.advance(LetterStatus::ReadyForPayment)
    }

    pub fn close(&mut self) -> LocResult<()> {
        self.advance(LetterStatus::Closed)
    }

    // current must rank at least the predecessor of `target` and strictly below `target`
    fn advance(&mut self, target: LetterStatus) -> LocResult<()> {
        let (Some(required), Some(target_rank)) = (target.pipeline_predecessor(), target.rank())
        else {
            return Err(LocError::InvalidTransition(format!(
                "cannot be moved to {target} by the shipping pipeline"
            )));
        };

        let Some(current) = self.status.rank() else {
            return Err(LocError::InvalidTransition(format!(
                "has been rejected. Cannot mark as {target}"
            )));
        };

        if required.rank().is_some_and(|min| current < min) {
            return Err(LocError::InvalidTransition(format!(
                "is not marked as {required}. Cannot mark as {target}"
            )));
        }
        if current >= target_rank {
            return Err(LocError::InvalidTransition(format!(
                "is already marked as {} which is at or beyond {target}",
                self.status
            )));
        }

        self.status = target;
        Ok(())
    }
}
