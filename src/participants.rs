//! Customers, bank employees and the banks they belong to.
//!
//! All three are value records: two of them are the same participant
//! exactly when every field matches.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub forename: String,
    pub surname: String,
    pub bank: Bank,
    pub company_name: String,
}

/// Staff member of a bank. Stands for whichever side of a deal their bank is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankEmployee {
    pub id: String,
    pub forename: String,
    pub surname: String,
    pub bank: Bank,
}

/// A resolved caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participant {
    Customer(Customer),
    BankEmployee(BankEmployee),
}

impl Bank {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Customer {
    pub fn new(
        id: impl Into<String>,
        forename: impl Into<String>,
        surname: impl Into<String>,
        bank: Bank,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            forename: forename.into(),
            surname: surname.into(),
            bank,
            company_name: company_name.into(),
        }
    }
}

impl BankEmployee {
    pub fn new(
        id: impl Into<String>,
        forename: impl Into<String>,
        surname: impl Into<String>,
        bank: Bank,
    ) -> Self {
        Self {
            id: id.into(),
            forename: forename.into(),
            surname: surname.into(),
            bank,
        }
    }
}

impl Participant {
    pub fn id(&self) -> &str {
        match self {
            Participant::Customer(customer) => &customer.id,
            Participant::BankEmployee(banker) => &banker.id,
        }
    }

    pub fn bank(&self) -> &Bank {
        match self {
            Participant::Customer(customer) => &customer.bank,
            Participant::BankEmployee(banker) => &banker.bank,
        }
    }

    pub fn as_customer(&self) -> Option<&Customer> {
        match self {
            Participant::Customer(customer) => Some(customer),
            Participant::BankEmployee(_) => None,
        }
    }

    pub fn as_bank_employee(&self) -> Option<&BankEmployee> {
        match self {
            Participant::BankEmployee(banker) => Some(banker),
            Participant::Customer(_) => None,
        }
    }
}

impl From<Customer> for Participant {
    fn from(customer: Customer) -> Self {
        Participant::Customer(customer)
    }
}

impl From<BankEmployee> for Participant {
    fn from(banker: BankEmployee) -> Self {
        Participant::BankEmployee(banker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_json_shape() {
        let customer = Customer::new("c1", "Ada", "Lovelace", Bank::new("b1", "First"), "Engines Ltd");
        let json = serde_json::to_value(&customer).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "c1",
                "forename": "Ada",
                "surname": "Lovelace",
                "bank": {"id": "b1", "name": "First"},
                "companyName": "Engines Ltd",
            })
        );
    }

    #[test]
    fn equality_covers_every_field() {
        let bank = Bank::new("b1", "First");
        let a = Customer::new("c1", "Ada", "Lovelace", bank.clone(), "Engines Ltd");
        let mut b = a.clone();
        assert_eq!(a, b);

        b.bank = Bank::new("b1", "First Renamed");
        assert_ne!(a, b);
    }

    #[test]
    fn customer_and_banker_with_same_id_differ() {
        let bank = Bank::new("b1", "First");
        let customer: Participant = Customer::new("p1", "A", "B", bank.clone(), "Co").into();
        let banker: Participant = BankEmployee::new("p1", "A", "B", bank).into();

        assert_ne!(customer, banker);
        assert_eq!(customer.id(), banker.id());
        assert!(customer.as_customer().is_some());
        assert!(banker.as_bank_employee().is_some());
        assert!(banker.as_customer().is_none());
    }
}
