use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::profile::CompanyProfile;
use crate::types::Money;

/// A hypothetical or unlisted company described ad hoc by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualProfile {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<Money>,
}

impl VirtualProfile {
    /// Revenue usable for scale comparison; non-positive figures count as absent.
    pub fn scale(&self) -> Option<Money> {
        self.revenue.filter(|r| *r > Decimal::ZERO)
    }
}

/// What a peer search is run for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryDescriptor {
    /// An existing company, identified by corp code
    Listed { corp_code: String },
    /// A free-standing profile with no universe membership
    Virtual(VirtualProfile),
}

impl QueryDescriptor {
    pub fn listed(corp_code: impl Into<String>) -> Self {
        QueryDescriptor::Listed {
            corp_code: corp_code.into(),
        }
    }

    /// Build the query a profile implies: virtual profiles search by
    /// description, listed ones by corp code.
    pub fn from_profile(profile: &CompanyProfile) -> Self {
        if profile.is_virtual {
            let flat = profile.fs_summary_flat.as_ref();
            QueryDescriptor::Virtual(VirtualProfile {
                name: profile.corp_name.clone(),
                description: profile.business_section.clone().unwrap_or_default(),
                revenue: flat.and_then(|f| f.revenue),
                total_assets: flat.and_then(|f| f.total_assets),
            })
        } else {
            QueryDescriptor::listed(profile.corp_code.clone())
        }
    }
}
