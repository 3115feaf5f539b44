//! Record persistence keyed by invoice number.
//!
//! The store works on whole collections: every mutation loads the full record
//! list from its backend, changes it in memory and writes it back.
//!
//! Reads treat an absent or unreadable collection as empty. Mutations only
//! treat an absent or corrupt collection as empty; a backend read error
//! aborts them so the stored collection is never overwritten from a failed
//! read.

mod backend;

pub use backend::{FileBackend, FileLock, MemoryBackend, RecordBackend};

use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::record::InvoiceRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Collection of invoice records with unique invoice numbers.
#[derive(Debug)]
pub struct RecordStore<B: RecordBackend> {
    backend: B,
}

impl RecordStore<FileBackend> {
    /// Open a JSON file store.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(FileBackend::new(path))
    }
}

impl<B: RecordBackend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Append a record unless its invoice number is already stored.
    pub fn insert(&self, record: InvoiceRecord) -> Result<()> {
        let _lock = self.backend.lock()?;
        let mut records = self.load_for_update()?;

        if records
            .iter()
            .any(|r| r.invoice_number == record.invoice_number)
        {
            info!("Invoice {} already exists, skipping", record.invoice_number);
            return Err(StoreError::DuplicateInvoice(record.invoice_number));
        }

        debug!("Adding invoice {} ({})", record.invoice_number, record.kind());
        records.push(record);
        self.save(&records)
    }

    /// All stored records in insertion order.
    ///
    /// A missing or unreadable collection reads as empty.
    pub fn list_all(&self) -> Vec<InvoiceRecord> {
        self.load()
    }

    /// Look up a record by invoice number.
    pub fn find(&self, invoice_number: &str) -> Option<InvoiceRecord> {
        self.load()
            .into_iter()
            .find(|r| r.invoice_number == invoice_number)
    }

    /// Replace the record with the same invoice number, keeping its position.
    pub fn update(&self, record: InvoiceRecord) -> Result<()> {
        let _lock = self.backend.lock()?;
        let mut records = self.load_for_update()?;

        let slot = records
            .iter_mut()
            .find(|r| r.invoice_number == record.invoice_number)
            .ok_or_else(|| StoreError::NotFound(record.invoice_number.clone()))?;

        debug!("Replacing invoice {}", record.invoice_number);
        *slot = record;
        self.save(&records)
    }

    /// Remove the record with this invoice number.
    pub fn delete(&self, invoice_number: &str) -> Result<InvoiceRecord> {
        let _lock = self.backend.lock()?;
        let mut records = self.load_for_update()?;

        let index = records
            .iter()
            .position(|r| r.invoice_number == invoice_number)
            .ok_or_else(|| StoreError::NotFound(invoice_number.to_string()))?;

        let removed = records.remove(index);
        debug!("Deleted invoice {}", invoice_number);
        self.save(&records)?;
        Ok(removed)
    }

    /// Replace the record if its invoice number is stored, append it otherwise.
    ///
    /// Returns `true` when an existing record was replaced.
    pub fn upsert(&self, record: InvoiceRecord) -> Result<bool> {
        let _lock = self.backend.lock()?;
        let mut records = self.load_for_update()?;

        let replaced = match records
            .iter_mut()
            .find(|r| r.invoice_number == record.invoice_number)
        {
            Some(slot) => {
                *slot = record;
                true
            }
            None => {
                records.push(record);
                false
            }
        };

        self.save(&records)?;
        Ok(replaced)
    }

    fn load(&self) -> Vec<InvoiceRecord> {
        self.load_for_update().unwrap_or_else(|e| {
            warn!("Could not read record store, treating it as empty: {}", e);
            Vec::new()
        })
    }

    fn load_for_update(&self) -> Result<Vec<InvoiceRecord>> {
        let Some(bytes) = self.backend.load()? else {
            return Ok(Vec::new());
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("Record store is not valid JSON, treating it as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, records: &[InvoiceRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        self.backend.store(&bytes)
    }
}
