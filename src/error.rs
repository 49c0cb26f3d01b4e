use crate::store::StoreError;

pub type LocResult<T> = Result<T, LocError>;

/// Kind of failure, without the message. Handy for matching in callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    StoreFault,
    InvalidRole,
    Unauthorized,
    NotEditable,
    InvalidTransition,
    MalformedInput,
    Encode,
}

#[derive(thiserror::Error, Debug)]
pub enum LocError {
    #[error("There exists no {object_type} with ID {id} in the world state")]
    NotFound { object_type: String, id: String },
    #[error("There exists {object_type} with ID {id} in the world state")]
    AlreadyExists { object_type: String, id: String },
    #[error("Unable to interact with world state: {0}")]
    StoreFault(String),
    #[error("{0} not a valid approval field")]
    InvalidRole(String),
    #[error("Participant passed is not {0}")]
    Unauthorized(String),
    #[error("The letter of credit {0}")]
    NotEditable(String),
    #[error("The letter of credit {0}")]
    InvalidTransition(String),
    #[error("Could not convert passed input {input:?} into {target}")]
    MalformedInput { input: String, target: String },
    #[error("Failed to generate JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LocError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LocError::NotFound { .. } => ErrorKind::NotFound,
            LocError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            LocError::StoreFault(_) => ErrorKind::StoreFault,
            LocError::InvalidRole(_) => ErrorKind::InvalidRole,
            LocError::Unauthorized(_) => ErrorKind::Unauthorized,
            LocError::NotEditable(_) => ErrorKind::NotEditable,
            LocError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            LocError::MalformedInput { .. } => ErrorKind::MalformedInput,
            LocError::Encode(_) => ErrorKind::Encode,
        }
    }

    pub(crate) fn malformed(input: &str, target: &str) -> Self {
        LocError::MalformedInput {
            input: input.to_string(),
            target: target.to_string(),
        }
    }
}

impl From<StoreError> for LocError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { object_type, id } => LocError::NotFound {
                object_type: object_type.to_string(),
                id,
            },
            StoreError::AlreadyExists { object_type, id } => LocError::AlreadyExists {
                object_type: object_type.to_string(),
                id,
            },
            StoreError::Fault(msg) => LocError::StoreFault(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ObjectType;

    #[test]
    fn store_errors_keep_their_kind() {
        let not_found: LocError = StoreError::NotFound {
            object_type: ObjectType::Customer,
            id: "cust-a".into(),
        }
        .into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(
            not_found.to_string(),
            "There exists no customer with ID cust-a in the world state"
        );

        let exists: LocError = StoreError::AlreadyExists {
            object_type: ObjectType::LetterOfCredit,
            id: "L1".into(),
        }
        .into();
        assert_eq!(exists.kind(), ErrorKind::AlreadyExists);

        let fault: LocError = StoreError::Fault("disk on fire".into()).into();
        assert_eq!(fault.kind(), ErrorKind::StoreFault);
    }
}
