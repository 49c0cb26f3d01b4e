use super::require_id;
use crate::auth;
use crate::error::LocResult;
use crate::participants::{Bank, BankEmployee, Customer};
use crate::store::{ObjectType, RecordStore, create_json, get_json};
use std::sync::Arc;
use tracing::{info, instrument};

/// Registration and lookup of banks, customers and bank employees.
pub struct ParticipantService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> ParticipantService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub fn create_bank(&self, id: &str, name: &str) -> LocResult<Bank> {
        require_id(id, "bank id")?;

        let bank = Bank::new(id, name);
        create_json(&*self.store, ObjectType::Bank, id, &bank)?;

        info!(bank_id = id, "bank registered");
        Ok(bank)
    }

    /// Register a customer of an existing bank.
    #[instrument(skip(self))]
    pub fn create_customer(
        &self,
        id: &str,
        forename: &str,
        surname: &str,
        bank_id: &str,
        company_name: &str,
    ) -> LocResult<Customer> {
        require_id(id, "customer id")?;
        require_id(bank_id, "bank id")?;
        let bank = self.get_bank(bank_id)?;

        let customer = Customer::new(id, forename, surname, bank, company_name);
        create_json(&*self.store, ObjectType::Customer, id, &customer)?;

        info!(customer_id = id, bank_id, "customer registered");
        Ok(customer)
    }

    /// Register an employee of an existing bank.
    #[instrument(skip(self))]
    pub fn create_bank_employee(
        &self,
        id: &str,
        forename: &str,
        surname: &str,
        bank_id: &str,
    ) -> LocResult<BankEmployee> {
        require_id(id, "bank employee id")?;
        require_id(bank_id, "bank id")?;
        let bank = self.get_bank(bank_id)?;

        let banker = BankEmployee::new(id, forename, surname, bank);
        create_json(&*self.store, ObjectType::BankEmployee, id, &banker)?;

        info!(bank_employee_id = id, bank_id, "bank employee registered");
        Ok(banker)
    }

    pub fn get_bank(&self, id: &str) -> LocResult<Bank> {
        get_json(&*self.store, ObjectType::Bank, id)
    }

    pub fn get_customer(&self, id: &str) -> LocResult<Customer> {
        auth::get_customer(&*self.store, id)
    }

    pub fn get_bank_employee(&self, id: &str) -> LocResult<BankEmployee> {
        auth::get_bank_employee(&*self.store, id)
    }
}
