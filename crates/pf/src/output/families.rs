//! Filter family output formatting.

use owo_colors::OwoColorize;
use pod_filter_rs::FilterFamily;
use serde::Serialize;

/// JSON output structure for a filter family.
#[derive(Serialize)]
pub struct FamilyOutput {
    pub name: &'static str,
    pub description: &'static str,
}

/// Formats filter families as JSON.
pub fn format_families_json(families: &[FilterFamily]) -> Result<String, serde_json::Error> {
    let output: Vec<FamilyOutput> = families
        .iter()
        .map(|f| FamilyOutput {
            name: f.as_str(),
            description: f.description(),
        })
        .collect();

    serde_json::to_string_pretty(&serde_json::json!({ "families": output }))
}

/// Formats filter families as a table.
pub fn format_families_table(families: &[FilterFamily], use_colors: bool) -> String {
    let mut output = String::new();

    let header = format!("{:<12} {}", "FAMILY", "MATCHES");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for family in families {
        let name = format!("{:<12}", family.as_str());
        if use_colors {
            output.push_str(&format!("{} {}\n", name.cyan(), family.description()));
        } else {
            output.push_str(&format!("{} {}\n", name, family.description()));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_family() {
        let table = format_families_table(&FilterFamily::ALL, false);
        assert_eq!(table.lines().count(), FilterFamily::ALL.len() + 1);
        assert!(table.contains("ctr-status   state of any container"));
        assert!(table.contains("network"));
    }

    #[test]
    fn test_json_names() {
        let json = format_families_json(&[FilterFamily::Id, FilterFamily::Until]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["families"][0]["name"], "id");
        assert_eq!(value["families"][1]["name"], "until");
    }
}
