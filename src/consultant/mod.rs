//! Boundary to the natural-language consultant service.
//!
//! The sizing core hands the selected configuration and the original
//! requirements to a [`Consultant`] and treats whatever text comes back as
//! opaque. Failures never reach the core; [`advise`] substitutes a fixed
//! advisory string instead.

pub mod tracker;

pub use tracker::{ConsultationTracker, Ticket};

use std::fmt;

use tracing::warn;

use crate::sizing::{Requirements, SystemConfiguration};

/// Shown when no credential is configured.
pub const MISSING_CREDENTIAL_TEXT: &str =
    "Consultant API key is missing. Unable to generate analysis.";
/// Shown when the service cannot be reached.
pub const OFFLINE_TEXT: &str =
    "Sorry, our AI consultant is currently offline. Please try again later.";
/// Shown when the service answers with no text.
pub const EMPTY_TEXT: &str = "Analysis could not be generated at this time.";

/// Where the energy figure handed to the consultant came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnergyBasis {
    /// Summed from per-appliance run times (kWh).
    Itemized(f64),
    /// Peak load times backup hours (kWh).
    Estimated(f64),
}

impl EnergyBasis {
    pub fn kwh(self) -> f64 {
        match self {
            Self::Itemized(kwh) | Self::Estimated(kwh) => kwh,
        }
    }
}

/// Everything the consultant is told about one sizing outcome.
#[derive(Debug, Clone, Copy)]
pub struct ConsultationRequest<'a> {
    pub config: &'a SystemConfiguration,
    pub requirements: &'a Requirements,
}

impl<'a> ConsultationRequest<'a> {
    pub fn new(config: &'a SystemConfiguration, requirements: &'a Requirements) -> Self {
        Self {
            config,
            requirements,
        }
    }

    /// An itemized figure of zero (or NaN) is reported as an estimate of
    /// peak load times backup hours.
    pub fn energy_basis(&self) -> EnergyBasis {
        let reqs = self.requirements;
        match reqs.energy_req_kwh {
            Some(kwh) if kwh != 0.0 && !kwh.is_nan() => EnergyBasis::Itemized(kwh),
            _ => EnergyBasis::Estimated(reqs.peak_load_kw * reqs.backup_hours),
        }
    }
}

/// Why a consultation produced no text.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsultantError {
    /// No API credential is configured.
    MissingCredential,
    /// The request failed in transit or was rejected.
    Transport(String),
}

impl fmt::Display for ConsultantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "consultant credential is missing"),
            Self::Transport(msg) => write!(f, "consultant request failed: {msg}"),
        }
    }
}

impl std::error::Error for ConsultantError {}

/// A service that turns a sizing outcome into advisory text.
pub trait Consultant {
    /// Returns the consultant's free-text assessment.
    ///
    /// # Errors
    ///
    /// Returns a `ConsultantError` when no credential is available or the
    /// service cannot be reached.
    fn consult(&self, request: &ConsultationRequest<'_>) -> Result<String, ConsultantError>;
}

/// Stand-in used when no consultant service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableConsultant;

impl Consultant for UnavailableConsultant {
    fn consult(&self, _request: &ConsultationRequest<'_>) -> Result<String, ConsultantError> {
        Err(ConsultantError::MissingCredential)
    }
}

/// Asks `consultant` for advice, falling back to a fixed advisory string on
/// any failure or empty answer.
pub fn advise<C: Consultant + ?Sized>(consultant: &C, request: &ConsultationRequest<'_>) -> String {
    match consultant.consult(request) {
        Ok(text) if text.trim().is_empty() => EMPTY_TEXT.to_string(),
        Ok(text) => text,
        Err(ConsultantError::MissingCredential) => {
            warn!("consultant credential missing, using fallback text");
            MISSING_CREDENTIAL_TEXT.to_string()
        }
        Err(err) => {
            warn!(error = %err, "consultant unavailable, using fallback text");
            OFFLINE_TEXT.to_string()
        }
    }
}
