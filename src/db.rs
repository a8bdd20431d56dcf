/*! This module sets up the application's database. */

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::product::create_product_table;

/// Create the tables for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_product_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
