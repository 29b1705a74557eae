//! Rule-based recommendation panel: the visitor picks who they are and the page
//! swaps in matching copy. Also classifies the viewport into a device type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorType {
    Recruiter,
    Peer,
    Client,
    #[default]
    Unknown,
}

impl VisitorType {
    pub fn label(self) -> &'static str {
        match self {
            VisitorType::Recruiter => "Recruiter",
            VisitorType::Peer => "Fellow developer",
            VisitorType::Client => "Potential client",
            VisitorType::Unknown => "Visitor",
        }
    }
}

/// Anything unrecognised falls back to `Unknown`, mirroring the panel's
/// "other visitors" button.
impl FromStr for VisitorType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "recruiter" => VisitorType::Recruiter,
            "peer" => VisitorType::Peer,
            "client" => VisitorType::Client,
            _ => VisitorType::Unknown,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    /// Extra line shown under the first entry for known visitor types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'static str>,
}

const fn rec(title: &'static str, detail: Option<&'static str>) -> Recommendation {
    Recommendation { title, detail }
}

static RECRUITER: [Recommendation; 3] = [
    rec(
        "See my project case studies",
        Some("Browse the projects to see how I approach technical problems."),
    ),
    rec("Review my experience and skills", None),
    rec("Download my full résumé", None),
];

static PEER: [Recommendation; 3] = [
    rec(
        "Read my technical blog",
        Some("Get a feel for my stack and coding style; maybe we can build something together."),
    ),
    rec("Explore the tools and stack I use", None),
    rec("Look at my open-source contributions", None),
];

static CLIENT: [Recommendation; 3] = [
    rec(
        "See what services I offer",
        Some("Find out what I can build for you and how past projects turned out."),
    ),
    rec("Read my success stories", None),
    rec("Get in touch about your project", None),
];

static GENERAL: [Recommendation; 3] = [
    rec("Browse my portfolio", None),
    rec("Learn about my skills", None),
    rec("Find my contact details", None),
];

/// Ordered recommendations for a visitor type.
pub fn recommendations(visitor: VisitorType) -> &'static [Recommendation] {
    match visitor {
        VisitorType::Recruiter => &RECRUITER,
        VisitorType::Peer => &PEER,
        VisitorType::Client => &CLIENT,
        VisitorType::Unknown => &GENERAL,
    }
}

/// What the panel shows: a badge naming the visitor type and the entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub visitor: VisitorType,
    pub label: &'static str,
    pub items: &'static [Recommendation],
}

pub fn panel(visitor: VisitorType) -> Panel {
    Panel {
        visitor,
        label: visitor.label(),
        items: recommendations(visitor),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

pub const TABLET_MIN_WIDTH: f64 = 768.0;
pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;

impl DeviceType {
    pub fn from_width(width: f64) -> Self {
        if width < TABLET_MIN_WIDTH {
            DeviceType::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            DeviceType::Tablet
        } else {
            DeviceType::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Desktop => "desktop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_visitor_gets_three_entries() {
        for v in [
            VisitorType::Recruiter,
            VisitorType::Peer,
            VisitorType::Client,
            VisitorType::Unknown,
        ] {
            assert_eq!(recommendations(v).len(), 3, "{v:?}");
        }
        assert_eq!(
            recommendations(VisitorType::Client)[2].title,
            "Get in touch about your project"
        );
    }

    #[test]
    fn only_known_visitors_get_detail_on_first_entry() {
        assert!(recommendations(VisitorType::Recruiter)[0].detail.is_some());
        assert!(recommendations(VisitorType::Peer)[0].detail.is_some());
        assert!(recommendations(VisitorType::Peer)[1].detail.is_none());
        assert!(
            recommendations(VisitorType::Unknown)
                .iter()
                .all(|r| r.detail.is_none())
        );
    }

    #[test]
    fn visitor_parsing_falls_back_to_unknown() {
        assert_eq!("recruiter".parse::<VisitorType>(), Ok(VisitorType::Recruiter));
        assert_eq!(" Client ".parse::<VisitorType>(), Ok(VisitorType::Client));
        assert_eq!("martian".parse::<VisitorType>(), Ok(VisitorType::Unknown));
        assert_eq!("".parse::<VisitorType>(), Ok(VisitorType::Unknown));
    }

    #[test]
    fn device_breakpoints() {
        assert_eq!(DeviceType::from_width(375.0), DeviceType::Mobile);
        assert_eq!(DeviceType::from_width(767.9), DeviceType::Mobile);
        assert_eq!(DeviceType::from_width(768.0), DeviceType::Tablet);
        assert_eq!(DeviceType::from_width(1023.0), DeviceType::Tablet);
        assert_eq!(DeviceType::from_width(1024.0), DeviceType::Desktop);
        assert_eq!(DeviceType::from_width(1920.0).as_str(), "desktop");
    }

    #[test]
    fn panel_carries_badge_label() {
        let p = panel(VisitorType::Peer);
        assert_eq!(p.label, "Fellow developer");
        assert_eq!(p.items, recommendations(VisitorType::Peer));
        let json = serde_json::to_value(panel(VisitorType::Unknown)).unwrap();
        assert_eq!(json["visitor"], "unknown");
        assert_eq!(json["label"], "Visitor");
        assert_eq!(json["items"].as_array().map(|a| a.len()), Some(3));
    }

    #[test]
    fn serialized_entries_skip_missing_detail() {
        let json = serde_json::to_string(&recommendations(VisitorType::Unknown)[0]).unwrap();
        assert_eq!(json, r#"{"title":"Browse my portfolio"}"#);
    }
}
