//! Record submission form: validate, build the payload, post it, and report
//! one typed outcome per attempt.
//!
//! Rendering the outcome (notices, navigation) is left to the caller. The
//! messages the registry UI shows are exposed as constants and through
//! [`SubmitError::user_message`].

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use atos_core::{AtoForm, AtoPayload, ValidationErrors, validate};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::http::{AtosClient, ClientError};

/// Route shown after a successful submission.
pub const LISTING_ROUTE: &str = "/atos";

pub const SUCCESS_MESSAGE: &str = "Novo registro cadastrado com sucesso.";
pub const REJECTED_MESSAGE: &str = "Cadastro inválido, favor verificar todos os campos.";
pub const FAILED_MESSAGE: &str = "Erro ao cadastrar, favor tentar novamente.";
pub const IN_FLIGHT_MESSAGE: &str = "Salvando...";

/// The remote side of the form.
#[async_trait]
pub trait AtosApi: Send + Sync {
    /// Create an ato, returning the parsed response body.
    async fn create_ato(&self, payload: &AtoPayload) -> Result<Value, ClientError>;
}

#[async_trait]
impl AtosApi for AtosClient {
    async fn create_ato(&self, payload: &AtoPayload) -> Result<Value, ClientError> {
        AtosClient::create_ato(self, payload).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    /// Last attempt was accepted; the caller should navigate away.
    Succeeded,
}

/// A successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    /// Response body from the API.
    pub response: Value,
    pub redirect: &'static str,
}

impl Submitted {
    pub fn message(&self) -> &'static str {
        SUCCESS_MESSAGE
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Another submission of this form has not resolved yet.
    #[error("a submission is already in flight")]
    InFlight,
    #[error("invalid form: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("submission rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("submission failed: {0}")]
    Failed(#[source] ClientError),
}

impl SubmitError {
    /// Text for the notice shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::InFlight => IN_FLIGHT_MESSAGE.to_string(),
            SubmitError::Invalid(errors) => errors.to_string(),
            SubmitError::Rejected { message, .. } => message
                .clone()
                .unwrap_or_else(|| REJECTED_MESSAGE.to_string()),
            SubmitError::Failed(_) => FAILED_MESSAGE.to_string(),
        }
    }
}

/// Form values plus the submitting flag that gates the submit control.
///
/// Values are edited through [`values_mut`](Self::values_mut) and are never
/// cleared by a failed attempt.
pub struct RecordForm<A> {
    api: A,
    values: AtoForm,
    submitting: AtomicBool,
    succeeded: AtomicBool,
}

impl<A: AtosApi> RecordForm<A> {
    pub fn new(api: A) -> Self {
        Self::with_values(api, AtoForm::default())
    }

    pub fn with_values(api: A, values: AtoForm) -> Self {
        Self {
            api,
            values,
            submitting: AtomicBool::new(false),
            succeeded: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn values(&self) -> &AtoForm {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut AtoForm {
        &mut self.values
    }

    /// Whether the submit control should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn state(&self) -> FormState {
        if self.is_submitting() {
            FormState::Submitting
        } else if self.succeeded.load(Ordering::Acquire) {
            FormState::Succeeded
        } else {
            FormState::Idle
        }
    }

    /// Validate the current values and post them.
    ///
    /// Validation runs first and a failure never reaches the network. While
    /// the request is in flight, further calls return
    /// [`SubmitError::InFlight`] without doing anything.
    pub async fn submit(&self) -> Result<Submitted, SubmitError> {
        if self.is_submitting() {
            debug!("submit ignored, request in flight");
            return Err(SubmitError::InFlight);
        }
        self.succeeded.store(false, Ordering::Release);

        let ato = validate(&self.values).inspect_err(|errors| {
            warn!(errors = %errors, "ato form failed validation");
        })?;
        let payload = ato.to_payload();

        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }
        let _flag = SubmittingFlag(&self.submitting);

        debug!(payload = ?payload, "submitting ato");
        match self.api.create_ato(&payload).await {
            Ok(response) => {
                info!(numero = %payload.numero, tipo = %payload.tipo_id, "ato registered");
                self.succeeded.store(true, Ordering::Release);
                Ok(Submitted {
                    response,
                    redirect: LISTING_ROUTE,
                })
            }
            Err(ClientError::Server { status, message }) => {
                warn!(status, message = ?message, "ato rejected by server");
                Err(SubmitError::Rejected { status, message })
            }
            Err(e) => {
                error!(error = %e, "ato submission failed");
                Err(SubmitError::Failed(e))
            }
        }
    }
}

/// Clears the submitting flag when the attempt ends, however it ends.
struct SubmittingFlag<'a>(&'a AtomicBool);

impl Drop for SubmittingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
