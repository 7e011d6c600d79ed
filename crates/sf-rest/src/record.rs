//! Records bound to the session that can act on them.

use std::future::Future;
use std::ops::{Deref, DerefMut};

use simpleforce_client::{Error, Result};

use crate::sobject::{CreateResult, SObject};

/// What a bound record needs from a session.
///
/// Implemented by [`crate::ForceClient`]; tests can supply their own.
pub trait RecordSession: Send + Sync {
    /// Fetch a record by type and id.
    fn get_record(&self, type_name: &str, id: &str)
        -> impl Future<Output = Result<SObject>> + Send;

    /// Create a record.
    fn create_record(
        &self,
        type_name: &str,
        record: &SObject,
    ) -> impl Future<Output = Result<CreateResult>> + Send;

    /// Update the fields of an existing record.
    fn update_record(
        &self,
        type_name: &str,
        id: &str,
        record: &SObject,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Delete a record.
    fn delete_record(&self, type_name: &str, id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// A record paired with the session it came from.
///
/// Derefs to [`SObject`], so fields can be read and written directly.
pub struct BoundRecord<'a, S> {
    record: SObject,
    session: &'a S,
}

impl<S> std::fmt::Debug for BoundRecord<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundRecord")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl<S> Clone for BoundRecord<'_, S> {
    fn clone(&self) -> Self {
        Self {
            record: self.record.clone(),
            session: self.session,
        }
    }
}

impl<'a, S> BoundRecord<'a, S> {
    /// Bind a record to a session.
    pub fn new(record: SObject, session: &'a S) -> Self {
        Self { record, session }
    }

    /// The session this record is bound to.
    pub fn session(&self) -> &'a S {
        self.session
    }

    /// Detach the record from its session.
    pub fn into_record(self) -> SObject {
        self.record
    }
}

impl<S: RecordSession> BoundRecord<'_, S> {
    /// Reload every field from the server.
    pub async fn refresh(&mut self) -> Result<()> {
        let (type_name, id) = self.type_and_id()?;
        let fresh = self.session.get_record(&type_name, &id).await?;
        self.record = fresh;
        if self.record.type_name().is_none() {
            self.record.set_type(&type_name);
        }
        Ok(())
    }

    /// Create the record when it has no id, update it otherwise.
    ///
    /// After a create the new id is stored in the `Id` field.
    pub async fn save(&mut self) -> Result<()> {
        let type_name = self
            .record
            .type_name()
            .ok_or_else(|| Error::failure("record has no type"))?
            .to_string();

        match self.record.id().map(str::to_string) {
            Some(id) => self.session.update_record(&type_name, &id, &self.record).await,
            None => {
                let created = self.session.create_record(&type_name, &self.record).await?;
                self.record.set("Id", created.id);
                Ok(())
            }
        }
    }

    /// Delete the record on the server.
    pub async fn delete(&self) -> Result<()> {
        let (type_name, id) = self.type_and_id()?;
        self.session.delete_record(&type_name, &id).await
    }

    fn type_and_id(&self) -> Result<(String, String)> {
        let type_name = self
            .record
            .type_name()
            .ok_or_else(|| Error::failure("record has no type"))?;
        let id = self
            .record
            .id()
            .ok_or_else(|| Error::failure("record has no id"))?;
        Ok((type_name.to_string(), id.to_string()))
    }
}

impl<S> Deref for BoundRecord<'_, S> {
    type Target = SObject;

    fn deref(&self) -> &SObject {
        &self.record
    }
}

impl<S> DerefMut for BoundRecord<'_, S> {
    fn deref_mut(&mut self) -> &mut SObject {
        &mut self.record
    }
}
