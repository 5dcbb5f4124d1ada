//! Pod output formatting.

use std::collections::BTreeMap;

use owo_colors::OwoColorize;
use pod_filter_rs::snapshot::PodSnapshot;
use pod_filter_rs::Pod;
use serde::Serialize;

use super::helpers::{format_created, format_status, truncate_id, truncate_str};

/// JSON output structure for the ps command.
#[derive(Serialize)]
pub struct PodsListOutput<'a> {
    pub pods: Vec<PodOutput<'a>>,
    pub total: usize,
}

/// JSON output structure for a single pod.
#[derive(Serialize)]
pub struct PodOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub status: &'static str,
    pub created: String,
    pub labels: &'a BTreeMap<String, String>,
    pub containers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infra_id: Option<&'a str>,
}

/// Formats pods as JSON.
pub fn format_pods_json(pods: &[&PodSnapshot]) -> Result<String, serde_json::Error> {
    let pods_output: Vec<PodOutput> = pods
        .iter()
        .map(|p| PodOutput {
            id: &p.id,
            name: &p.name,
            status: p.derived_status().as_str(),
            created: p.created_at().to_rfc3339(),
            labels: &p.labels,
            containers: p.containers.len(),
            infra_id: p.containers.iter().find(|c| c.infra).map(|c| c.id.as_str()),
        })
        .collect();

    let output = PodsListOutput {
        total: pods_output.len(),
        pods: pods_output,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats pods as a table.
pub fn format_pods_table(pods: &[&PodSnapshot], use_colors: bool) -> String {
    if pods.is_empty() {
        return "No pods found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<12}  {:<24}  {:<10}  {:<19}  {:>4}  {}",
        "POD ID", "NAME", "STATUS", "CREATED", "CTRS", "INFRA ID"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for pod in pods {
        let infra_id = pod
            .containers
            .iter()
            .find(|c| c.infra)
            .map(|c| truncate_id(&c.id))
            .unwrap_or_default();

        let line = format!(
            "{:<12}  {:<24}  {}  {:<19}  {:>4}  {}",
            truncate_id(&pod.id),
            truncate_str(&pod.name, 24),
            format_status(pod.derived_status(), 10, use_colors),
            format_created(pod.created),
            pod.containers.len(),
            infra_id
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pod_filter_rs::snapshot::ContainerSnapshot;
    use pod_filter_rs::ContainerState;

    fn pod(id: &str, name: &str, containers: Vec<ContainerSnapshot>) -> PodSnapshot {
        PodSnapshot {
            id: id.to_string(),
            name: name.to_string(),
            created: "2024-05-01T10:00:00Z".parse().unwrap(),
            labels: [("app".to_string(), name.to_string())].into(),
            containers,
        }
    }

    fn container(id: &str, state: ContainerState, infra: bool) -> ContainerSnapshot {
        ContainerSnapshot {
            id: id.to_string(),
            name: format!("ctr-{id}"),
            state,
            infra,
            networks: vec![],
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_pods_table(&[], false), "No pods found.\n");
    }

    #[test]
    fn test_table_rows() {
        let web = pod(
            "abcdef0123456789",
            "web",
            vec![
                container("aa11bb22cc33dd44", ContainerState::Running, true),
                container("ee55", ContainerState::Running, false),
            ],
        );
        let batch = pod("fedcba98", "batch", vec![]);

        let table = format_pods_table(&[&web, &batch], false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("POD ID"));
        assert!(lines[1].starts_with("abcdef012345  web"));
        assert!(lines[1].contains("Running"));
        assert!(lines[1].contains("2024-05-01 10:00:00"));
        assert!(lines[1].ends_with("aa11bb22cc33"));
        assert!(lines[2].contains("Created"));
        assert!(lines[2].ends_with("0"));
    }

    #[test]
    fn test_json_output() {
        let web = pod(
            "abcdef0123456789",
            "web",
            vec![container("aa11", ContainerState::Exited, true)],
        );

        let json = format_pods_json(&[&web]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["pods"][0]["id"], "abcdef0123456789");
        assert_eq!(value["pods"][0]["status"], "Exited");
        assert_eq!(value["pods"][0]["containers"], 1);
        assert_eq!(value["pods"][0]["infra_id"], "aa11");
        assert_eq!(value["pods"][0]["labels"]["app"], "web");
    }

    #[test]
    fn test_json_omits_missing_infra() {
        let batch = pod("fedcba98", "batch", vec![]);
        let json = format_pods_json(&[&batch]).unwrap();
        assert!(!json.contains("infra_id"));
    }
}
