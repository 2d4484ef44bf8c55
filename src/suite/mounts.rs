// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Volume mounts of a container, read as three index-aligned columns

use crate::error::AssertionFailure;

/// What to require of a mount's sub-path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubPathCheck {
    /// Do not look at the sub-path
    Skip,
    /// The mount must not use a sub-path
    Absent,
    Equals(String),
}

impl SubPathCheck {
    /// An empty expectation means "no sub-path", not "don't check"
    pub fn expecting(sub_path: &str) -> Self {
        if sub_path.is_empty() {
            SubPathCheck::Absent
        } else {
            SubPathCheck::Equals(sub_path.to_string())
        }
    }
}

/// Mount names, paths and sub-paths where entry `i` of each column belongs to
/// the same mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMounts {
    names: Vec<String>,
    mount_paths: Vec<String>,
    sub_paths: Vec<String>,
}

impl VolumeMounts {
    /// Columns of different lengths cannot be correlated and are rejected
    pub fn new(
        names: Vec<String>,
        mount_paths: Vec<String>,
        sub_paths: Vec<String>,
        context: &str,
    ) -> Result<Self, AssertionFailure> {
        if names.len() != mount_paths.len() || names.len() != sub_paths.len() {
            return Err(AssertionFailure::new(
                "Volume mount columns are not aligned",
                format!("{} names, mount paths and sub-paths", names.len()),
                format!(
                    "{} names, {} mount paths, {} sub-paths",
                    names.len(),
                    mount_paths.len(),
                    sub_paths.len()
                ),
                context,
            ));
        }

        Ok(Self {
            names,
            mount_paths,
            sub_paths,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check that the mount called `name` is at `mount_path` with the expected sub-path
    pub fn verify(
        &self,
        name: &str,
        mount_path: &str,
        sub_path: &SubPathCheck,
        context: &str,
    ) -> Result<(), AssertionFailure> {
        let Some(index) = self.names.iter().position(|n| n == name) else {
            return Err(AssertionFailure::new(
                format!("The mounted volume '{}' could not be found", name),
                name,
                format!("{:?}", self.names),
                context,
            ));
        };

        let actual_path = &self.mount_paths[index];
        if actual_path != mount_path {
            return Err(AssertionFailure::new(
                format!("The mount path for '{}' does not match", name),
                mount_path,
                actual_path.as_str(),
                context,
            ));
        }

        let actual_sub_path = &self.sub_paths[index];
        let expected_sub_path = match sub_path {
            SubPathCheck::Skip => return Ok(()),
            SubPathCheck::Absent => "",
            SubPathCheck::Equals(expected) => expected.as_str(),
        };

        if actual_sub_path != expected_sub_path {
            return Err(AssertionFailure::new(
                format!("The subPath for '{}' does not match", name),
                expected_sub_path,
                actual_sub_path.as_str(),
                context,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = "pods with selector app=metricbeat-metricbeat";

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn make_mounts() -> VolumeMounts {
        VolumeMounts::new(
            strings(&["data", "config"]),
            strings(&["/usr/share/data", "/usr/share/config"]),
            strings(&["", "config.yml"]),
            CONTEXT,
        )
        .unwrap()
    }

    #[test]
    fn test_verify_with_matching_sub_path() {
        let mounts = make_mounts();
        let result = mounts.verify(
            "config",
            "/usr/share/config",
            &SubPathCheck::expecting("config.yml"),
            CONTEXT,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_verify_explicit_empty_sub_path_is_checked() {
        let mounts = make_mounts();
        let failure = mounts
            .verify("config", "/usr/share/config", &SubPathCheck::expecting(""), CONTEXT)
            .unwrap_err();

        assert!(failure.message.contains("subPath"));
        assert_eq!(failure.expected, "");
        assert_eq!(failure.actual, "config.yml");
    }

    #[test]
    fn test_verify_absent_sub_path() {
        let mounts = make_mounts();
        assert!(mounts
            .verify("data", "/usr/share/data", &SubPathCheck::Absent, CONTEXT)
            .is_ok());
    }

    #[test]
    fn test_verify_skip_ignores_sub_path() {
        let mounts = make_mounts();
        assert!(mounts
            .verify("config", "/usr/share/config", &SubPathCheck::Skip, CONTEXT)
            .is_ok());
    }

    #[test]
    fn test_verify_missing_name_lists_available() {
        let mounts = make_mounts();
        let failure = mounts
            .verify("missing", "/anywhere", &SubPathCheck::Skip, CONTEXT)
            .unwrap_err();

        assert!(failure.message.contains("'missing' could not be found"));
        assert!(failure.actual.contains("data"));
        assert!(failure.actual.contains("config"));
    }

    #[test]
    fn test_verify_missing_name_on_empty_mounts() {
        let mounts = VolumeMounts::new(vec![], vec![], vec![], CONTEXT).unwrap();
        assert!(mounts
            .verify("data", "/usr/share/data", &SubPathCheck::Skip, CONTEXT)
            .is_err());
    }

    #[test]
    fn test_verify_mount_path_uses_aligned_index() {
        let mounts = make_mounts();
        let failure = mounts
            .verify("config", "/usr/share/data", &SubPathCheck::Skip, CONTEXT)
            .unwrap_err();

        assert_eq!(failure.expected, "/usr/share/data");
        assert_eq!(failure.actual, "/usr/share/config");
    }

    #[test]
    fn test_misaligned_columns_are_rejected() {
        let failure = VolumeMounts::new(
            strings(&["data", "config"]),
            strings(&["/usr/share/data"]),
            strings(&["", ""]),
            CONTEXT,
        )
        .unwrap_err();

        assert_eq!(failure.actual, "2 names, 1 mount paths, 2 sub-paths");
        assert_eq!(failure.context, CONTEXT);
    }
}
