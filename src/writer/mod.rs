//! File output.
//!
//! Everything written to disk goes through this module. Parent directories
//! are created on demand and existing files are overwritten, so a re-run
//! refreshes a previous export in place.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// Declaration line prepended to every XML document.
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Serialize `value` as an indented XML document and write it to `path`.
pub async fn write_xml<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    value
        .serialize(serializer)
        .with_context(|| format!("failed to serialize {}", path.display()))?;

    let mut document = String::with_capacity(XML_DECLARATION.len() + body.len());
    document.push_str(XML_DECLARATION);
    document.push_str(&body);

    write_file(path, document.as_bytes()).await
}

/// Serialize `value` as pretty-printed JSON and write it to `path`.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let contents = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    write_file(path, &contents).await
}

/// Directory name for one host. Path separators in the host name would
/// change the layout, so they are replaced; a host with an empty name
/// falls back to its id.
pub fn host_dir_name(name: &str, hostid: &str) -> String {
    let sanitized = name.replace(['/', '\\'], "_");
    if sanitized.is_empty() {
        hostid.to_string()
    } else {
        sanitized
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Availability, Group, Groups, Host, Interface, Interfaces, Metric, Template, Templates,
        Trigger,
    };

    fn full_host() -> Host {
        Host {
            hostid: "10084".to_string(),
            name: "web-01".to_string(),
            ip: "192.168.1.10".to_string(),
            status: "0".to_string(),
            availability: Availability::Available,
            notes: "primary web server".to_string(),
            groups: Groups {
                items: vec![Group {
                    groupid: "2".to_string(),
                    name: "Linux servers".to_string(),
                }],
            },
            templates: Templates {
                items: vec![Template {
                    templateid: "10001".to_string(),
                    name: "Template OS Linux".to_string(),
                }],
            },
            interfaces: Interfaces {
                items: vec![Interface {
                    interfaceid: "1".to_string(),
                    ip: "192.168.1.10".to_string(),
                    port: "10050".to_string(),
                    interface_type: "1".to_string(),
                }],
            },
        }
    }

    fn minimal_host() -> Host {
        Host {
            hostid: "10200".to_string(),
            name: "bare".to_string(),
            ip: "10.0.0.1".to_string(),
            status: "1".to_string(),
            availability: Availability::Unknown,
            notes: String::new(),
            groups: Groups::default(),
            templates: Templates::default(),
            interfaces: Interfaces::default(),
        }
    }

    #[tokio::test]
    async fn test_xml_document_has_declaration_and_indentation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.xml");

        write_xml(&path, &full_host()).await.unwrap();

        let document = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(document.starts_with(XML_DECLARATION));
        assert!(document.contains("<host>"));
        assert!(document.contains("\n  <name>web-01</name>"));
        assert!(document.contains("<availability>Available</availability>"));
        assert!(document.contains("<groups>"));
        assert!(document.contains("<group>"));
        assert!(document.contains("<type>1</type>"));
    }

    #[tokio::test]
    async fn test_xml_round_trip_preserves_full_host() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.xml");
        let host = full_host();

        write_xml(&path, &host).await.unwrap();

        let document = tokio::fs::read_to_string(&path).await.unwrap();
        let decoded: Host = quick_xml::de::from_str(&document).unwrap();
        assert_eq!(decoded, host);
    }

    #[tokio::test]
    async fn test_empty_sections_are_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.xml");
        let host = minimal_host();

        write_xml(&path, &host).await.unwrap();

        let document = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(!document.contains("<notes>"));
        assert!(!document.contains("<groups>"));
        assert!(!document.contains("<templates>"));
        assert!(!document.contains("<interfaces>"));

        let decoded: Host = quick_xml::de::from_str(&document).unwrap();
        assert_eq!(decoded, host);
    }

    #[tokio::test]
    async fn test_json_output_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        let metrics = vec![Metric {
            itemid: "23296".to_string(),
            name: "CPU load".to_string(),
            key: "system.cpu.load".to_string(),
            value: "0.15".to_string(),
        }];

        write_json(&path, &metrics).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("\n  {"));
        let decoded: Vec<Metric> = serde_json::from_str(&contents).unwrap();
        assert_eq!(decoded, metrics);
    }

    #[tokio::test]
    async fn test_empty_list_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triggers.json");

        write_json(&path, &Vec::<Trigger>::new()).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "[]");
    }

    #[tokio::test]
    async fn test_parent_directories_are_created_and_files_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export/hosts/web-01/triggers.json");

        let first = vec![Trigger {
            triggerid: "1".to_string(),
            description: "old".to_string(),
            priority: "1".to_string(),
            status: "0".to_string(),
        }];
        write_json(&path, &first).await.unwrap();
        write_json(&path, &Vec::<Trigger>::new()).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "[]");
    }

    #[test]
    fn test_host_dir_name_sanitizes_separators() {
        assert_eq!(host_dir_name("web-01", "10084"), "web-01");
        assert_eq!(host_dir_name("rack/web-01", "10084"), "rack_web-01");
        assert_eq!(host_dir_name("lab\\node", "10084"), "lab_node");
        assert_eq!(host_dir_name("", "10084"), "10084");
    }
}
