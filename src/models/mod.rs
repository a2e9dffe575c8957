//! Export document model.
//!
//! These are the shapes that land on disk: the XML host document and the
//! JSON metric and trigger lists. They are built from the raw API records
//! once those have passed per-record validation.

use serde::{Deserialize, Serialize};

use crate::zabbix::types::{RawGroup, RawHost, RawInterface, RawItem, RawTemplate, RawTrigger};

/// Host availability derived from the `available` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Unavailable,
    Unknown,
}

impl Availability {
    /// "1" is available, "0" is unavailable, anything else (including an
    /// absent flag) is unknown.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("1") => Availability::Available,
            Some("0") => Availability::Unavailable,
            _ => Availability::Unknown,
        }
    }
}

/// Root of the per-host XML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "host")]
pub struct Host {
    pub hostid: String,
    pub name: String,
    pub ip: String,
    pub status: String,
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Groups::is_empty")]
    pub groups: Groups,
    #[serde(default, skip_serializing_if = "Templates::is_empty")]
    pub templates: Templates,
    #[serde(default, skip_serializing_if = "Interfaces::is_empty")]
    pub interfaces: Interfaces,
}

impl Host {
    /// Build the document from a validated raw record.
    ///
    /// The host IP is the address of the first interface; a host without
    /// interfaces cannot be exported. `include_interfaces` controls only
    /// the nested interface list, never the IP.
    pub fn from_raw(raw: RawHost, include_interfaces: bool) -> anyhow::Result<Host> {
        let ip = raw
            .interfaces
            .first()
            .map(|interface| interface.ip.clone())
            .ok_or_else(|| anyhow::anyhow!("host {} ({}) has no interfaces", raw.name, raw.hostid))?;

        let interfaces = if include_interfaces {
            Interfaces {
                items: raw.interfaces.into_iter().map(Interface::from).collect(),
            }
        } else {
            Interfaces::default()
        };

        Ok(Host {
            hostid: raw.hostid,
            name: raw.name,
            ip,
            status: raw.status,
            availability: Availability::from_flag(raw.available.as_deref()),
            notes: raw.description,
            groups: Groups {
                items: raw.groups.into_iter().map(Group::from).collect(),
            },
            templates: Templates {
                items: raw.parent_templates.into_iter().map(Template::from).collect(),
            },
            interfaces,
        })
    }
}

/// Wrapper producing `<groups><group>..</group></groups>` nesting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Groups {
    #[serde(rename = "group", default)]
    pub items: Vec<Group>,
}

impl Groups {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Templates {
    #[serde(rename = "template", default)]
    pub items: Vec<Template>,
}

impl Templates {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interfaces {
    #[serde(rename = "interface", default)]
    pub items: Vec<Interface>,
}

impl Interfaces {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub groupid: String,
    pub name: String,
}

impl From<RawGroup> for Group {
    fn from(raw: RawGroup) -> Self {
        Group {
            groupid: raw.groupid,
            name: raw.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub templateid: String,
    pub name: String,
}

impl From<RawTemplate> for Template {
    fn from(raw: RawTemplate) -> Self {
        Template {
            templateid: raw.templateid,
            name: raw.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub interfaceid: String,
    pub ip: String,
    pub port: String,
    #[serde(rename = "type")]
    pub interface_type: String,
}

impl From<RawInterface> for Interface {
    fn from(raw: RawInterface) -> Self {
        Interface {
            interfaceid: raw.interfaceid,
            ip: raw.ip,
            port: raw.port,
            interface_type: raw.interface_type,
        }
    }
}

/// One entry of `metrics.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub itemid: String,
    pub name: String,
    pub key: String,
    pub value: String,
}

impl From<RawItem> for Metric {
    fn from(raw: RawItem) -> Self {
        Metric {
            itemid: raw.itemid,
            name: raw.name,
            key: raw.key,
            value: raw.lastvalue,
        }
    }
}

/// One entry of `triggers.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub triggerid: String,
    pub description: String,
    pub priority: String,
    pub status: String,
}

impl From<RawTrigger> for Trigger {
    fn from(raw: RawTrigger) -> Self {
        Trigger {
            triggerid: raw.triggerid,
            description: raw.description,
            priority: raw.priority,
            status: raw.status,
        }
    }
}
