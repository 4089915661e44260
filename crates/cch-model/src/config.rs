//! Engine configuration: column bindings and controlled vocabularies.
//!
//! Every column name and status value the metrics read lives here, so the
//! same engine can target a differently named export without code changes.
//! All sections default to the production export schema; a TOML file only
//! needs to list the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result, TableName};

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// Column bindings for the `Client` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientColumns {
    pub client_id: String,
    pub create_stamp: String,
    pub edit_stamp: String,
    /// Non-blank values mark a row as an inbound referral.
    pub referral_type: String,
    /// Holds the duplicate-record sentinel.
    pub ahp_status: String,
    /// Program status used for enrollment.
    pub care_connect_status: String,
    pub opt_in_date: String,
    pub referral_date: String,
}

impl Default for ClientColumns {
    fn default() -> Self {
        Self {
            client_id: "Client_Id".to_string(),
            create_stamp: "Client_CreateStamp".to_string(),
            edit_stamp: "Client_EditStamp".to_string(),
            referral_type: "ClientOption_WhatTypeOfReferralIsThis".to_string(),
            ahp_status: "ClientOption_AhpClientStatus".to_string(),
            care_connect_status: "ClientOption_CareConnectStatus".to_string(),
            opt_in_date: "ClientSystem_CcOptinDate".to_string(),
            referral_date: "ClientSystem_CcProgramReferralDate".to_string(),
        }
    }
}

/// Column bindings for the `Ahpscreening` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningColumns {
    pub client_id: String,
    pub edit_stamp: String,
    pub create_stamp: String,
    pub ladder_first: String,
    pub ladder_second: String,
    /// SDOH assessment completion date.
    pub assessment_date: String,
}

impl Default for ScreeningColumns {
    fn default() -> Self {
        Self {
            client_id: "Client_Id".to_string(),
            edit_stamp: "Ahpscreening_EditStamp".to_string(),
            create_stamp: "Ahpscreening_CreateStamp".to_string(),
            ladder_first: "AhpscreeningOption_WellbeingCantrilsLadder1".to_string(),
            ladder_second: "AhpscreeningOption_WellbeingCantrilsLadder2".to_string(),
            assessment_date: "AhpscreeningSystem_DateAcceptedcompleted".to_string(),
        }
    }
}

/// Column bindings for the `Goalshortterm` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalColumns {
    pub closure_status: String,
    pub created_date: String,
}

impl Default for GoalColumns {
    fn default() -> Self {
        Self {
            closure_status: "GoalshorttermOption_GoalClosureStatus".to_string(),
            created_date: "GoalshorttermSystem_StgDateCreated".to_string(),
        }
    }
}

/// Column bindings for the `Interaction` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionColumns {
    pub client_id: String,
    pub outcome: String,
    pub create_stamp: String,
}

impl Default for InteractionColumns {
    fn default() -> Self {
        Self {
            client_id: "Client_Id".to_string(),
            outcome: "InteractionOption_ContactOutcome".to_string(),
            create_stamp: "Interaction_CreateStamp".to_string(),
        }
    }
}

/// Column bindings for the `Interaction_referral` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferralColumns {
    pub client_id: String,
    pub taxonomy_name: String,
    pub requested_date: String,
}

impl Default for ReferralColumns {
    fn default() -> Self {
        Self {
            client_id: "InteractionReferral_ReferralsModule_client_id".to_string(),
            taxonomy_name: "InteractionReferralTaxonomy_Taxonomy_external_term_name".to_string(),
            requested_date: "InteractionReferral_ReferralsModule_referral_status_requested_date"
                .to_string(),
        }
    }
}

/// Controlled vocabularies matched against free-text status columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Case-insensitive substrings marking an enrolled client.
    pub enrolled_statuses: Vec<String>,
    /// Case-insensitive substrings marking a newly enrolled client.
    pub newly_enrolled_statuses: Vec<String>,
    /// Interaction outcomes that count as a service connection (exact, trimmed).
    pub services_provided: Vec<String>,
    pub duplicate_sentinel: String,
    pub discharged_keyword: String,
    /// Case-insensitive substrings marking a met goal.
    pub needs_met_statuses: Vec<String>,
    pub uncategorized_label: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            enrolled_statuses: owned(&["Engaged"]),
            newly_enrolled_statuses: owned(&["Engaged", "Enrolled (Assigned)"]),
            services_provided: owned(&[
                "Care Coordination",
                "Referral to Services",
                "Education Provided",
                "Services Provided- Ongoing work with client",
            ]),
            duplicate_sentinel: "Inactive-Duplicate Record".to_string(),
            discharged_keyword: "discharged".to_string(),
            needs_met_statuses: owned(&["Met", "Partially Met"]),
            uncategorized_label: "Uncategorized".to_string(),
        }
    }
}

/// Day thresholds for the connection metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionWindows {
    pub short_days: i64,
    pub long_days: i64,
}

impl Default for ConnectionWindows {
    fn default() -> Self {
        Self {
            short_days: 7,
            long_days: 30,
        }
    }
}

/// Immutable configuration passed into the metrics engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// When set, a connection dated before the referral does not count.
    pub require_non_negative_gap: bool,
    pub windows: ConnectionWindows,
    pub vocabulary: Vocabulary,
    pub client: ClientColumns,
    pub screening: ScreeningColumns,
    pub goal: GoalColumns,
    pub interaction: InteractionColumns,
    pub referral: ReferralColumns,
}

impl MetricsConfig {
    /// Parses a configuration from TOML text; omitted keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ModelError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Column names bound for a table, in declaration order.
    pub fn bound_columns(&self, table: TableName) -> Vec<&str> {
        match table {
            TableName::Client => vec![
                self.client.client_id.as_str(),
                self.client.create_stamp.as_str(),
                self.client.edit_stamp.as_str(),
                self.client.referral_type.as_str(),
                self.client.ahp_status.as_str(),
                self.client.care_connect_status.as_str(),
                self.client.opt_in_date.as_str(),
                self.client.referral_date.as_str(),
            ],
            TableName::Ahpscreening => vec![
                self.screening.client_id.as_str(),
                self.screening.edit_stamp.as_str(),
                self.screening.create_stamp.as_str(),
                self.screening.ladder_first.as_str(),
                self.screening.ladder_second.as_str(),
                self.screening.assessment_date.as_str(),
            ],
            TableName::Goalshortterm => vec![
                self.goal.closure_status.as_str(),
                self.goal.created_date.as_str(),
            ],
            TableName::Interaction => vec![
                self.interaction.client_id.as_str(),
                self.interaction.outcome.as_str(),
                self.interaction.create_stamp.as_str(),
            ],
            TableName::InteractionReferral => vec![
                self.referral.client_id.as_str(),
                self.referral.taxonomy_name.as_str(),
                self.referral.requested_date.as_str(),
            ],
            TableName::Ahpdischarge => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = MetricsConfig::from_toml_str("").expect("parse empty config");
        assert_eq!(config, MetricsConfig::default());
        assert!(!config.require_non_negative_gap);
        assert_eq!(config.windows.short_days, 7);
        assert_eq!(config.windows.long_days, 30);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = MetricsConfig::from_toml_str(
            r#"
require_non_negative_gap = true

[client]
client_id = "PersonId"

[vocabulary]
enrolled_statuses = ["Active"]
"#,
        )
        .expect("parse partial config");
        assert!(config.require_non_negative_gap);
        assert_eq!(config.client.client_id, "PersonId");
        assert_eq!(config.client.edit_stamp, "Client_EditStamp");
        assert_eq!(config.vocabulary.enrolled_statuses, vec!["Active"]);
        assert_eq!(
            config.vocabulary.duplicate_sentinel,
            "Inactive-Duplicate Record"
        );
    }

    #[test]
    fn rendered_defaults_parse_back() {
        let rendered = MetricsConfig::default()
            .to_toml_string()
            .expect("render config");
        let parsed = MetricsConfig::from_toml_str(&rendered).expect("parse rendered config");
        assert_eq!(parsed, MetricsConfig::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = MetricsConfig::from_toml_str("windows = 3").expect_err("type mismatch");
        assert!(matches!(err, ModelError::TomlInline(_)));
    }

    #[test]
    fn discharge_table_binds_no_columns() {
        let config = MetricsConfig::default();
        assert!(config.bound_columns(TableName::Ahpdischarge).is_empty());
        assert_eq!(config.bound_columns(TableName::Goalshortterm).len(), 2);
    }
}
