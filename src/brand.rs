//! Brand and contact details shown across the site.
//!
//! Company, phone, email and address come from the site content file; the
//! public website URL can be overridden per deployment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SiteError;

pub const DEFAULT_WEBSITE: &str = "https://www.1031exchangeofsanantonio.com";

// Contents of content/site.json
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteConfig {
    pub company: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl SiteConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SiteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SiteError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub company: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
}

impl Brand {
    /// A blank `website` counts as unset and falls back to [`DEFAULT_WEBSITE`].
    pub fn new(site: &SiteConfig, website: Option<&str>) -> Self {
        let website = website
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .unwrap_or(DEFAULT_WEBSITE);

        Self {
            company: site.company.clone(),
            phone: site.phone.clone(),
            email: site.email.clone(),
            address: site.address.clone(),
            website: website.to_string(),
        }
    }
}
