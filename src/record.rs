use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_txt;

/// TTL applied when neither the caller nor the existing rrset carries one.
pub const DEFAULT_TTL: u32 = 3600;

/// A single DNS record as exposed to tool callers, with its name relative to
/// the zone (`""` is the apex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    pub value: String,
    /// Seconds; 0 means "unspecified".
    #[serde(default)]
    pub ttl: u32,
    /// MX preference or SRV priority, ignored for everything else.
    #[serde(default)]
    pub priority: u32,
}

impl Record {
    /// Content string as PowerDNS stores it.
    pub fn content(&self) -> String {
        match self.rtype.to_ascii_uppercase().as_str() {
            "MX" | "SRV" => format!("{} {}", self.priority, self.value),
            "TXT" => sanitize_txt(&self.value),
            _ => self.value.clone(),
        }
    }

    /// Rebuilds a record from an rrset entry. TXT content is kept exactly as
    /// stored so that it compares equal to freshly sanitized values.
    pub fn from_content(fqdn: &str, zone: &str, rtype: &str, ttl: u32, content: &str) -> Self {
        let rtype = rtype.to_ascii_uppercase();
        let (priority, value) = match rtype.as_str() {
            "MX" | "SRV" => split_priority(content),
            _ => (0, content.to_string()),
        };
        Self {
            name: relative_name(fqdn, zone),
            rtype,
            value,
            ttl,
            priority,
        }
    }

    /// Same record with its value in stored form.
    pub fn normalized(&self) -> Self {
        let rtype = self.rtype.to_ascii_uppercase();
        let value = if rtype == "TXT" {
            sanitize_txt(&self.value)
        } else {
            self.value.clone()
        };
        Self { rtype, value, ..self.clone() }
    }
}

fn split_priority(content: &str) -> (u32, String) {
    let trimmed = content.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => match first.parse::<u32>() {
            Ok(priority) => (priority, rest.trim_start().to_string()),
            Err(_) => (0, trimmed.to_string()),
        },
        None => (0, trimmed.to_string()),
    }
}

/// Ensures a zone name ends with a dot.
pub fn canonical_zone(zone: &str) -> String {
    let zone = zone.trim();
    if zone.ends_with('.') {
        zone.to_string()
    } else {
        format!("{zone}.")
    }
}

pub fn absolute_name(name: &str, zone: &str) -> String {
    let zone = canonical_zone(zone);
    match name.trim() {
        "" | "@" => zone,
        n if n.ends_with('.') => n.to_string(),
        n => format!("{n}.{zone}"),
    }
}

pub fn relative_name(fqdn: &str, zone: &str) -> String {
    let zone = canonical_zone(zone);
    if fqdn.eq_ignore_ascii_case(&zone) {
        return String::new();
    }
    let suffix = format!(".{zone}");
    let split = fqdn.len().saturating_sub(suffix.len());
    match (fqdn.get(..split), fqdn.get(split..)) {
        (Some(label), Some(tail)) if !label.is_empty() && tail.eq_ignore_ascii_case(&suffix) => {
            label.to_string()
        }
        _ => fqdn.trim_end_matches('.').to_string(),
    }
}

// PowerDNS zones API wire types.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordContent {
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Replace,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRSet {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub changetype: Option<ChangeType>,
    #[serde(default)]
    pub records: Vec<RecordContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    #[serde(default)]
    pub rrsets: Vec<RRSet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(name: &str, rtype: &str, value: &str, priority: u32) -> Record {
        Record { name: name.into(), rtype: rtype.into(), value: value.into(), ttl: 0, priority }
    }

    #[test]
    fn absolutises_names() {
        assert_eq!(absolute_name("", "example.org"), "example.org.");
        assert_eq!(absolute_name("@", "example.org."), "example.org.");
        assert_eq!(absolute_name("www", "example.org."), "www.example.org.");
        assert_eq!(absolute_name("mail.other.net.", "example.org."), "mail.other.net.");
    }

    #[test]
    fn relativises_names() {
        assert_eq!(relative_name("example.org.", "example.org."), "");
        assert_eq!(relative_name("_https._tcp.example.org.", "example.org"), "_https._tcp");
        assert_eq!(relative_name("1.Example.ORG.", "example.org."), "1");
        assert_eq!(relative_name("elsewhere.net.", "example.org."), "elsewhere.net");
    }

    #[test]
    fn formats_priority_types() {
        assert_eq!(rec("", "MX", "mx1.example.org.", 10).content(), "10 mx1.example.org.");
        assert_eq!(
            rec("_imaps._tcp", "srv", "1 993 imaps.example.org.", 200).content(),
            "200 1 993 imaps.example.org."
        );
        assert_eq!(rec("1", "A", "127.0.0.1", 5).content(), "127.0.0.1");
    }

    #[test]
    fn sanitizes_txt_content() {
        let r = rec("1", "TXT", r#"This is some weird text that "has embedded quoting""#, 0);
        assert_eq!(r.content(), r#""This is some weird text that \"has embedded quoting\"""#);
        assert_eq!(r.normalized().value, r.content());
    }

    #[test]
    fn parses_priority_from_content() {
        let mx = Record::from_content("example.org.", "example.org.", "MX", 60, "10 mx1.example.org.");
        assert_eq!(mx, Record { name: "".into(), rtype: "MX".into(), value: "mx1.example.org.".into(), ttl: 60, priority: 10 });

        let srv = Record::from_content(
            "_https._tcp.example.org.", "example.org.", "SRV", 60, "100 1 443 https.example.org.",
        );
        assert_eq!(srv.name, "_https._tcp");
        assert_eq!(srv.priority, 100);
        assert_eq!(srv.value, "1 443 https.example.org.");
        assert_eq!(srv.content(), "100 1 443 https.example.org.");
    }

    #[test]
    fn unparsable_priority_keeps_whole_content() {
        let mx = Record::from_content("example.org.", "example.org.", "MX", 60, "mx1.example.org.");
        assert_eq!(mx.priority, 0);
        assert_eq!(mx.value, "mx1.example.org.");
    }

    #[test]
    fn txt_content_is_kept_as_stored() {
        let txt = Record::from_content("1.example.org.", "example.org.", "TXT", 60, r#""This is text""#);
        assert_eq!(txt.value, r#""This is text""#);
        assert_eq!(txt.content(), txt.value);
    }

    #[test]
    fn record_uses_type_key_and_defaults() {
        let r: Record = serde_json::from_value(json!({"type": "A", "value": "127.0.0.1"})).unwrap();
        assert_eq!(r, rec("", "A", "127.0.0.1", 0));
    }

    #[test]
    fn rrset_serializes_changetype_uppercase() {
        let set = RRSet {
            name: "1.example.org.".into(),
            rtype: "A".into(),
            ttl: 60,
            changetype: Some(ChangeType::Delete),
            records: vec![],
        };
        let v = serde_json::to_value(&set).unwrap();
        assert_eq!(v["changetype"], "DELETE");
        assert_eq!(v["type"], "A");
    }
}
