//! Event processing entry point.

use tracing::{error, info, warn};

use crate::client::{RegionClient, ReplicaTableStore};
use crate::config::HandlerConfig;
use crate::errors::ProvisionError;
use crate::event::{
    InvocationContext, Outputs, ProvisionResponder, ProvisioningEvent, RequestType, ResponseStatus,
};
use crate::lifecycle::ReplicaCoordinator;
use crate::schema::SchemaTemplate;

/// Processes one provisioning event end to end: resolves the region stores,
/// dispatches on request type, and delivers exactly one terminal response.
pub struct EventProcessor {
    config: HandlerConfig,
    template: SchemaTemplate,
}

impl EventProcessor {
    pub fn new(config: HandlerConfig) -> Self {
        EventProcessor {
            config,
            template: SchemaTemplate::default(),
        }
    }

    /// Use a custom schema for tables this processor creates.
    pub fn with_template(config: HandlerConfig, template: SchemaTemplate) -> Self {
        EventProcessor { config, template }
    }

    /// Build the region stores and process the event.
    ///
    /// The local store is bound to the invocation's own region; the origin
    /// store to the event's original primary region. When the two regions
    /// coincide a single handle serves both roles. Only a response-delivery
    /// fault escapes; provisioning faults become a FAILED response.
    pub async fn process<R>(
        &self,
        event: &ProvisioningEvent,
        context: &InvocationContext,
        responder: &R,
    ) -> Result<(), ProvisionError>
    where
        R: ProvisionResponder + ?Sized,
    {
        let sdk_config = RegionClient::load_base_config(Some(self.config.region.clone())).await;
        let endpoint = self.config.endpoint_url.as_deref();
        let local = RegionClient::new(&sdk_config, self.config.region.as_str(), endpoint);

        let origin_region = &event.resource_properties.original_primary_region;
        if self.config.region == *origin_region {
            self.dispatch(event, context, &local, &local, responder)
                .await
        } else {
            let origin = RegionClient::new(&sdk_config, origin_region.as_str(), endpoint);
            self.dispatch(event, context, &origin, &local, responder)
                .await
        }
    }

    /// Dispatch on request type against already-resolved stores.
    ///
    /// Create and Delete run their paths; any other request type (Update) is
    /// a deliberate no-op that still reports SUCCESS with empty outputs. Any
    /// fault from either path is logged with full context and reported as a
    /// FAILED response carrying whatever outputs had been produced.
    pub async fn dispatch<S, R>(
        &self,
        event: &ProvisioningEvent,
        context: &InvocationContext,
        origin: &S,
        local: &S,
        responder: &R,
    ) -> Result<(), ProvisionError>
    where
        S: ReplicaTableStore + ?Sized,
        R: ProvisionResponder + ?Sized,
    {
        let properties = &event.resource_properties;
        info!(
            request_type = ?event.request_type,
            table = %properties.table_name,
            origin_region = %properties.original_primary_region,
            region = %self.config.region,
            "processing provisioning event"
        );

        let coordinator = ReplicaCoordinator::new(origin, local, &self.config, &self.template);
        let result = match event.request_type {
            RequestType::Create => coordinator.process_create(properties).await,
            RequestType::Delete => Ok(coordinator.process_delete(properties).await),
            _ => {
                warn!(
                    request_type = ?event.request_type,
                    table = %properties.table_name,
                    "request type carries no reconciliation action, reporting success"
                );
                Ok(Outputs::default())
            }
        };

        match result {
            Ok(outputs) => {
                info!(?outputs, "provisioning complete");
                responder
                    .respond(event, context, ResponseStatus::Success, &outputs)
                    .await
            }
            Err(err) => {
                error!(
                    request_type = ?event.request_type,
                    table = %properties.table_name,
                    region = %self.config.region,
                    error = %err,
                    "provisioning failed"
                );
                responder
                    .respond(event, context, ResponseStatus::Failed, &Outputs::default())
                    .await
            }
        }
    }
}
