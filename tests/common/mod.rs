//! Shared scripted store and recording responder for the integration suites.
//!
//! The store records every call into a journal shared across stores, so a
//! test can assert cross-region ordering (replica-create before tag). Each
//! describe pops the next scripted result; running off the end of a script
//! is a test bug and panics.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use global_table_provisioner::{
    InvocationContext, Outputs, ProvisionError, ProvisionResponder, ProvisioningEvent,
    ReplicaTableStore, RequestType, ResourceProperties, ResponseStatus, TableDescription,
    TableSpec, TableStatus, Tag,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Describe {
        region: String,
        table: String,
    },
    CreateTable {
        region: String,
        table: String,
    },
    CreateReplica {
        region: String,
        table: String,
        replica_region: String,
    },
    DeleteTable {
        region: String,
        table: String,
    },
    TagResource {
        region: String,
        arn: String,
        tags: Vec<Tag>,
    },
}

pub type Journal = Arc<Mutex<Vec<Call>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<Call> {
    journal.lock().unwrap().clone()
}

pub struct ScriptedStore {
    region: String,
    journal: Journal,
    describes: Mutex<VecDeque<Result<TableDescription, ProvisionError>>>,
    create_table_error: Mutex<Option<ProvisionError>>,
    create_replica_error: Mutex<Option<ProvisionError>>,
    delete_error: Mutex<Option<ProvisionError>>,
    tag_error: Mutex<Option<ProvisionError>>,
}

impl ScriptedStore {
    pub fn new(region: &str, journal: &Journal) -> Self {
        ScriptedStore {
            region: region.to_string(),
            journal: journal.clone(),
            describes: Mutex::new(VecDeque::new()),
            create_table_error: Mutex::new(None),
            create_replica_error: Mutex::new(None),
            delete_error: Mutex::new(None),
            tag_error: Mutex::new(None),
        }
    }

    pub fn push_describe(&self, result: Result<TableDescription, ProvisionError>) {
        self.describes.lock().unwrap().push_back(result);
    }

    pub fn fail_create_table(&self, err: ProvisionError) {
        *self.create_table_error.lock().unwrap() = Some(err);
    }

    pub fn fail_create_replica(&self, err: ProvisionError) {
        *self.create_replica_error.lock().unwrap() = Some(err);
    }

    pub fn fail_delete(&self, err: ProvisionError) {
        *self.delete_error.lock().unwrap() = Some(err);
    }

    pub fn fail_tag(&self, err: ProvisionError) {
        *self.tag_error.lock().unwrap() = Some(err);
    }
}

#[async_trait]
impl ReplicaTableStore for ScriptedStore {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_table(&self, table: &str) -> Result<TableDescription, ProvisionError> {
        self.journal.lock().unwrap().push(Call::Describe {
            region: self.region.clone(),
            table: table.to_string(),
        });
        self.describes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted describe for '{}' in {}", table, self.region))
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<(), ProvisionError> {
        self.journal.lock().unwrap().push(Call::CreateTable {
            region: self.region.clone(),
            table: spec.table_name.clone(),
        });
        match self.create_table_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn create_replica(
        &self,
        table: &str,
        replica_region: &str,
    ) -> Result<(), ProvisionError> {
        self.journal.lock().unwrap().push(Call::CreateReplica {
            region: self.region.clone(),
            table: table.to_string(),
            replica_region: replica_region.to_string(),
        });
        match self.create_replica_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn delete_table(&self, table: &str) -> Result<(), ProvisionError> {
        self.journal.lock().unwrap().push(Call::DeleteTable {
            region: self.region.clone(),
            table: table.to_string(),
        });
        match self.delete_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn tag_resource(&self, arn: &str, tags: &[Tag]) -> Result<(), ProvisionError> {
        self.journal.lock().unwrap().push(Call::TagResource {
            region: self.region.clone(),
            arn: arn.to_string(),
            tags: tags.to_vec(),
        });
        match self.tag_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Responder that records every terminal response it is handed.
#[derive(Default)]
pub struct RecordingResponder {
    responses: Mutex<Vec<(ResponseStatus, Outputs)>>,
}

impl RecordingResponder {
    pub fn recorded(&self) -> Vec<(ResponseStatus, Outputs)> {
        self.responses.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProvisionResponder for RecordingResponder {
    async fn respond(
        &self,
        _event: &ProvisioningEvent,
        _context: &InvocationContext,
        status: ResponseStatus,
        outputs: &Outputs,
    ) -> Result<(), ProvisionError> {
        self.responses
            .lock()
            .unwrap()
            .push((status, outputs.clone()));
        Ok(())
    }
}

pub fn active(arn: &str, stream_arn: &str, replicas: &[&str]) -> TableDescription {
    TableDescription {
        status: TableStatus::Active,
        table_arn: Some(arn.to_string()),
        latest_stream_arn: Some(stream_arn.to_string()),
        replica_regions: replicas.iter().map(|r| r.to_string()).collect(),
    }
}

pub fn creating() -> TableDescription {
    TableDescription {
        status: TableStatus::Creating,
        table_arn: None,
        latest_stream_arn: None,
        replica_regions: Vec::new(),
    }
}

pub fn not_found(table: &str, region: &str) -> ProvisionError {
    ProvisionError::TableNotFound {
        table: table.to_string(),
        region: region.to_string(),
    }
}

pub fn properties(table: &str, origin_region: &str, tags: &[&str]) -> ResourceProperties {
    ResourceProperties {
        table_name: table.to_string(),
        original_primary_region: origin_region.to_string(),
        tags: tags.iter().map(|t| Some(t.to_string())).collect(),
    }
}

pub fn provisioning_event(
    request_type: RequestType,
    table: &str,
    origin_region: &str,
    tags: &[&str],
) -> ProvisioningEvent {
    ProvisioningEvent {
        request_type,
        resource_properties: properties(table, origin_region, tags),
    }
}
