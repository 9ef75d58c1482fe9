use std::sync::Arc;

use crate::error::StoreError;
use crate::nrtm::log::{OperationLog, TracingLog};
use crate::nrtm::operation::NrtmOperation;
use crate::rpsl::{ObjectParser, ParseError, RpslParser};
use crate::store::MirrorStore;
use crate::types::OperationKind;

/// Applies NRTM operations to a mirror store
///
/// Each operation passes a chain of gates: parse, class filter, validation
/// errors, source consistency. Unknown or filtered classes are dropped
/// quietly; validation errors and source mismatches are recorded as mirror
/// errors against the operation's source. Neither kind of rejection is an
/// `Err`: that is reserved for store failures, which the stream driver owns.
///
/// The applier holds no per-operation state. Operations for one source must
/// be applied in ascending serial order, since later operations are what
/// heals earlier rejections.
pub struct OperationApplier {
    parser: Arc<dyn ObjectParser>,
    log: Arc<dyn OperationLog>,
    log_completed: bool,
}

impl Default for OperationApplier {
    fn default() -> Self {
        Self::new(Arc::new(RpslParser), Arc::new(TracingLog))
    }
}

impl OperationApplier {
    pub fn new(parser: Arc<dyn ObjectParser>, log: Arc<dyn OperationLog>) -> Self {
        Self {
            parser,
            log,
            log_completed: true,
        }
    }

    /// Toggle the info log emitted after each successful operation
    pub fn with_completed_log(mut self, enabled: bool) -> Self {
        self.log_completed = enabled;
        self
    }

    /// Returns `Ok(true)` when the store received the operation's mutation,
    /// `Ok(false)` when the operation was filtered or recorded as a mirror error.
    pub async fn apply<S>(&self, operation: &NrtmOperation, store: &S) -> Result<bool, StoreError>
    where
        S: MirrorStore + ?Sized,
    {
        let default_source = match operation.kind() {
            OperationKind::Delete => Some(operation.source()),
            OperationKind::AddOrUpdate => None,
        };

        let obj = match self
            .parser
            .parse(operation.object_text().trim(), false, default_source)
        {
            Ok(obj) => obj,
            Err(err @ ParseError::UnknownObjectClass(_)) => {
                // Silent only when the filter lists the class
                if operation.object_class_filter().is_none()
                    || !operation.admits_class(err.object_class())
                {
                    self.log
                        .info(&format!("Ignoring NRTM operation {}: {}", operation, err));
                }
                return Ok(false);
            }
        };

        if !operation.admits_class(obj.object_class()) {
            return Ok(false);
        }

        let errors = obj.messages.errors();
        if !errors.is_empty() {
            let errors = errors.join("; ");
            self.log.critical(&format!(
                "Parsing errors occurred while processing NRTM operation {}. \
                 This operation is ignored, causing potential data inconsistencies. \
                 A later operation for this object without errors will resolve the inconsistency. \
                 Parser error messages: {}; original object text follows:\n{}",
                operation,
                errors,
                operation.object_text()
            ));
            store
                .record_mirror_error(
                    operation.source(),
                    &format!(
                        "Parsing errors: {}, original object text follows:\n{}",
                        errors,
                        operation.object_text()
                    ),
                )
                .await?;
            return Ok(false);
        }

        if let Some(found) = obj.source() {
            let found = found.to_ascii_uppercase();
            if found != operation.source() {
                let message = format!(
                    "Incorrect source in NRTM object: stream has source {}, found object with \
                     source {} in operation {}/{}/{}. \
                     This operation is ignored, causing potential data inconsistencies.",
                    operation.source(),
                    found,
                    operation.serial(),
                    operation.kind(),
                    obj.pk()
                );
                store.record_mirror_error(operation.source(), &message).await?;
                self.log.critical(&message);
                return Ok(false);
            }
        }

        match operation.kind() {
            OperationKind::AddOrUpdate => store.upsert_rpsl_object(&obj, operation.serial()).await?,
            OperationKind::Delete => store.delete_rpsl_object(&obj, operation.serial()).await?,
        }

        if self.log_completed {
            self.log
                .info(&format!("Completed NRTM operation {}/{}", operation, obj.pk()));
        }
        Ok(true)
    }
}
