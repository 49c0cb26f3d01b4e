// Walks one letter of credit from application to close against a sled store.
//
//   RUST_LOG=locnet=debug cargo run --example lifecycle
//
// The store location comes from LOCNET_DB_PATH and friends; set
// LOCNET_DB_TEMPORARY=true to leave nothing behind.

use anyhow::Context;
use locnet::{
    ErrorKind, LetterService, LocResult, ParticipantService,
    config::StoreConfig,
    letter::Evidence,
    store::SledStore,
    utils::new_letter_id,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = StoreConfig::from_env()?;
    let store = Arc::new(SledStore::open(&config).context("failed to open the letter store")?);

    let participants = ParticipantService::new(store.clone());
    let letters = LetterService::new(store.clone());

    // a persistent store keeps the participants from the previous run
    registered(participants.create_bank("bank-dinero", "Dinero Bank"))?;
    registered(participants.create_bank("bank-eastwood", "Eastwood Banking"))?;
    registered(participants.create_customer("alice", "Alice", "Hamilton", "bank-dinero", "QuickFix IT"))?;
    registered(participants.create_customer("bella", "Bella", "Ngozi", "bank-eastwood", "Conga Computers"))?;
    registered(participants.create_bank_employee("matias", "Matias", "Koski", "bank-dinero"))?;
    registered(participants.create_bank_employee("ella", "Ella", "Sherwood", "bank-eastwood"))?;

    let letter_id = new_letter_id()?;
    let rules = r#"[
        {"name":"delivery","wording":"The correct quantity of product has been delivered"},
        {"name":"condition","wording":"The product was received within 30 days of the placement of the order"}
    ]"#;
    let product = r#"{"productType":"Computer","quantity":100,"unitPrice":230.0}"#;

    letters.apply(&letter_id, "alice", "bella", rules, product)?;
    letters.approve(&letter_id, "issuingBank", "matias")?;
    letters.approve(&letter_id, "exportingBank", "ella")?;
    letters.approve(&letter_id, "beneficiary", "bella")?;

    let bill_of_lading = Evidence::from_document("bill-of-lading.pdf", b"100 computers, container 7");
    letters.mark_as_shipped(&letter_id, "bella", &serde_json::to_string(&bill_of_lading)?)?;
    letters.mark_as_received(&letter_id, "alice")?;
    letters.mark_as_ready_for_payment(&letter_id, "matias")?;
    let letter = letters.close(&letter_id, "ella")?;

    store.flush()?;
    println!("{}", letters.get(letter.id(), "applicant", "alice")?);
    Ok(())
}

fn registered<T>(result: LocResult<T>) -> LocResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(err),
    }
}
