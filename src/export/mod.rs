//! Export pipeline.
//!
//! Failures are layered. Anything that compromises the run as a whole,
//! such as host enumeration or file I/O, aborts it. A bad host record
//! skips that host. A failed metric or trigger fetch skips only that
//! file. Every skip is recorded in the report instead of being silently
//! dropped.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{Host, Metric, Trigger};
use crate::writer;
use crate::zabbix::types::{RawHost, RawItem, RawTrigger};
use crate::zabbix::ZabbixClient;

/// Tally of one export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub hosts_total: usize,
    pub hosts_exported: usize,
    pub hosts_skipped: usize,
    pub metrics_files: usize,
    pub triggers_files: usize,
    pub errors: Vec<String>,
}

impl ExportReport {
    fn record(&mut self, line: String) {
        warn!("{}", line);
        self.errors.push(line);
    }
}

/// Export every host reachable with `token` under `config.export_dir`.
pub async fn run(client: &ZabbixClient, token: &str, config: &Config) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    let records = client
        .list_hosts(token)
        .await
        .context("host enumeration failed")?;
    report.hosts_total = records.len();

    if records.is_empty() {
        info!("No hosts available for export");
        return Ok(report);
    }
    info!("Exporting {} hosts", records.len());

    for record in records {
        let raw: RawHost = match serde_json::from_value(record) {
            Ok(raw) => raw,
            Err(err) => {
                report.hosts_skipped += 1;
                report.record(format!("skipping malformed host record: {}", err));
                continue;
            }
        };

        let host = match Host::from_raw(raw, config.include_interfaces) {
            Ok(host) => host,
            Err(err) => {
                report.hosts_skipped += 1;
                report.record(format!("skipping host: {}", err));
                continue;
            }
        };

        let host_dir = config
            .export_dir
            .join("hosts")
            .join(writer::host_dir_name(&host.name, &host.hostid));

        writer::write_xml(&host_dir.join("host.xml"), &host).await?;
        export_metrics(client, token, &host, &host_dir, &mut report).await?;
        export_triggers(client, token, &host, &host_dir, &mut report).await?;

        report.hosts_exported += 1;
        info!("Exported host {} ({})", host.name, host.hostid);
    }

    Ok(report)
}

/// Fetch and write `metrics.json` for one host.
///
/// A failed fetch skips the file; a malformed item is dropped from it.
/// When the fetch succeeds the file is always written, even when empty.
async fn export_metrics(
    client: &ZabbixClient,
    token: &str,
    host: &Host,
    host_dir: &Path,
    report: &mut ExportReport,
) -> Result<()> {
    let records = match client.list_items(token, &host.hostid).await {
        Ok(records) => records,
        Err(err) => {
            report.record(format!("metrics for host {} unavailable: {}", host.name, err));
            return Ok(());
        }
    };

    let mut metrics = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<RawItem>(record) {
            Ok(raw) => metrics.push(Metric::from(raw)),
            Err(err) => {
                report.record(format!("dropping malformed item on host {}: {}", host.name, err))
            }
        }
    }

    writer::write_json(&host_dir.join("metrics.json"), &metrics).await?;
    report.metrics_files += 1;
    Ok(())
}

/// Fetch and write `triggers.json` for one host. Same policy as metrics.
async fn export_triggers(
    client: &ZabbixClient,
    token: &str,
    host: &Host,
    host_dir: &Path,
    report: &mut ExportReport,
) -> Result<()> {
    let records = match client.list_triggers(token, &host.hostid).await {
        Ok(records) => records,
        Err(err) => {
            report.record(format!("triggers for host {} unavailable: {}", host.name, err));
            return Ok(());
        }
    };

    let mut triggers = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<RawTrigger>(record) {
            Ok(raw) => triggers.push(Trigger::from(raw)),
            Err(err) => {
                report.record(format!("dropping malformed trigger on host {}: {}", host.name, err))
            }
        }
    }

    writer::write_json(&host_dir.join("triggers.json"), &triggers).await?;
    report.triggers_files += 1;
    Ok(())
}
