use crate::api::{HttpTransport, OptimizeTransport, RequestPayload};
use crate::config::ClientConfig;
use crate::error::{FcError, FcResult};
use crate::form::{Field, FormStage, FormState};
use crate::orchestrator::{MutationState, RequestOrchestrator};
use crate::validate::ValidationError;
use tracing::{debug, info};

/// Everything one user session needs: config, form and the request lifecycle.
/// Built once up front and passed around explicitly; dropped when the
/// session ends.
pub struct Session<T: OptimizeTransport = HttpTransport> {
    config: ClientConfig,
    form: FormState,
    orchestrator: RequestOrchestrator<T>,
}

impl Session<HttpTransport> {
    pub fn new(config: ClientConfig) -> FcResult<Self> {
        config.check()?;
        let transport = HttpTransport::new(&config)?;
        info!("📡 Model service: {}", transport.optimize_url());
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: OptimizeTransport> Session<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let orchestrator = RequestOrchestrator::new(transport, config.timeout());
        Self {
            config,
            form: FormState::new(),
            orchestrator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn orchestrator(&self) -> &RequestOrchestrator<T> {
        &self.orchestrator
    }

    pub fn edit(
        &mut self,
        field: Field,
        raw: impl Into<String>,
    ) -> Result<FormStage, ValidationError> {
        self.form.edit(field, raw, &self.config.bounds)
    }

    pub fn stage(&self) -> FormStage {
        self.form.stage(&self.config.bounds)
    }

    pub fn state(&self) -> MutationState {
        self.orchestrator.state()
    }

    /// Submit-time check on its own. Fails with `Busy` while a request is
    /// pending, otherwise re-validates the whole form and builds the payload.
    pub fn prepare(&mut self) -> FcResult<RequestPayload> {
        if !self.orchestrator.can_submit() {
            return Err(FcError::Busy);
        }
        Ok(self.form.prepare_submission(&self.config.bounds)?)
    }

    /// Validates the whole form and, if it passes, runs the request.
    /// Invalid input never reaches the orchestrator.
    pub async fn submit(&mut self) -> FcResult<MutationState> {
        let payload = self.prepare()?;
        self.orchestrator.submit(payload).await
    }

    /// The one message the page shows: a validation error while editing,
    /// otherwise the last request failure.
    pub fn error_message(&self) -> Option<String> {
        self.form
            .validation_error
            .clone()
            .or_else(|| self.orchestrator.state().error().map(str::to_string))
    }
}

impl<T: OptimizeTransport> Drop for Session<T> {
    fn drop(&mut self) {
        debug!("Session closed");
    }
}
