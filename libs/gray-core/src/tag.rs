use serde::{Deserialize, Serialize};

use crate::{VERSION_BASE, VERSION_GRAY};

/// Release cohort of a request or instance.
///
/// `Base` is the default and the fallback on every ambiguity: a missing,
/// empty or unrecognized header value always classifies as `Base`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrayTag {
    #[default]
    Base,
    Gray,
}

impl GrayTag {
    /// Classify a raw header value. Only the exact gray token matches.
    pub fn from_header_value(value: &str) -> Self {
        if value == VERSION_GRAY {
            GrayTag::Gray
        } else {
            GrayTag::Base
        }
    }

    /// Wire token for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrayTag::Base => VERSION_BASE,
            GrayTag::Gray => VERSION_GRAY,
        }
    }

    pub fn is_gray(&self) -> bool {
        matches!(self, GrayTag::Gray)
    }
}
