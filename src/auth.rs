//! Turns a claimed role and a participant id into a stored identity, and checks
//! that identity against a letter's parties.
use crate::error::LocResult;
use crate::letter::{LetterOfCredit, Role};
use crate::participants::{BankEmployee, Customer, Participant};
use crate::store::{ObjectType, RecordStore, get_json};

/// Look up the participant behind `participant_id` as the kind `role` calls for.
///
/// Customer roles read the customer records, bank roles read the bank
/// employee records. Store failures come back unchanged.
pub fn resolve_participant<S>(
    store: &S,
    role: &str,
    participant_id: &str,
) -> LocResult<(Role, Participant)>
where
    S: RecordStore + ?Sized,
{
    let role: Role = role.parse()?;

    let participant = if role.is_customer_role() {
        Participant::Customer(get_customer(store, participant_id)?)
    } else {
        Participant::BankEmployee(get_bank_employee(store, participant_id)?)
    };

    Ok((role, participant))
}

pub fn get_customer<S: RecordStore + ?Sized>(store: &S, id: &str) -> LocResult<Customer> {
    get_json(store, ObjectType::Customer, id)
}

pub fn get_bank_employee<S: RecordStore + ?Sized>(store: &S, id: &str) -> LocResult<BankEmployee> {
    get_json(store, ObjectType::BankEmployee, id)
}

pub fn is_party(letter: &LetterOfCredit, participant: &Participant) -> bool {
    letter.is_party(participant)
}

pub fn is_specific_party(letter: &LetterOfCredit, participant: &Participant, role: Role) -> bool {
    letter.is_specific_party(participant, role)
}
