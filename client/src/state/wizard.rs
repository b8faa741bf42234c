//! New-application wizard state.
//!
//! DESIGN
//! ======
//! The page only renders; step gating, document list edits and the final
//! form assembly live here so they can be tested without a DOM.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use crate::net::types::{ApplicationForm, ApplicationType, Attachment, Citizen, LicenseCategory};

/// Minimum query length before the citizen search hits the server.
pub const MIN_SEARCH_LEN: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Citizen,
    Details,
    Documents,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Citizen, WizardStep::Details, WizardStep::Documents];

    pub fn number(self) -> usize {
        match self {
            WizardStep::Citizen => 1,
            WizardStep::Details => 2,
            WizardStep::Documents => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Citizen => "Citizen",
            WizardStep::Details => "License Details",
            WizardStep::Documents => "Supporting Documents",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApplicationWizard {
    pub step: WizardStep,
    pub citizen: Option<Citizen>,
    pub category: Option<LicenseCategory>,
    pub application_type: ApplicationType,
    pub notes: String,
    pub documents: Vec<Attachment>,
}

impl Default for ApplicationWizard {
    fn default() -> Self {
        Self {
            step: WizardStep::Citizen,
            citizen: None,
            category: None,
            application_type: ApplicationType::New,
            notes: String::new(),
            documents: Vec::new(),
        }
    }
}

/// Trimmed query if it is long enough to search for.
pub fn search_query(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (trimmed.chars().count() >= MIN_SEARCH_LEN).then_some(trimmed)
}

impl ApplicationWizard {
    pub fn select_citizen(&mut self, citizen: Citizen) {
        self.citizen = Some(citizen);
    }

    pub fn clear_citizen(&mut self) {
        self.citizen = None;
    }

    /// Whether the current step's required input is present.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Citizen => self.citizen.is_some(),
            WizardStep::Details => self.category.is_some(),
            WizardStep::Documents => false,
        }
    }

    /// Move forward one step if the current step is complete.
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.step = match self.step {
            WizardStep::Citizen => WizardStep::Details,
            WizardStep::Details | WizardStep::Documents => WizardStep::Documents,
        };
        true
    }

    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::Citizen | WizardStep::Details => WizardStep::Citizen,
            WizardStep::Documents => WizardStep::Details,
        };
    }

    pub fn add_documents(&mut self, documents: impl IntoIterator<Item = Attachment>) {
        self.documents.extend(documents);
    }

    pub fn remove_document(&mut self, index: usize) {
        if index < self.documents.len() {
            self.documents.remove(index);
        }
    }

    /// The form to submit, once a citizen and category are chosen.
    pub fn submission(&self) -> Option<ApplicationForm> {
        let citizen = self.citizen.as_ref()?;
        let category = self.category?;
        let notes = self.notes.trim();
        Some(ApplicationForm {
            citizen_id: citizen.id.clone(),
            category,
            application_type: self.application_type,
            notes: (!notes.is_empty()).then(|| notes.to_owned()),
            supporting_documents: self.documents.clone(),
        })
    }
}
