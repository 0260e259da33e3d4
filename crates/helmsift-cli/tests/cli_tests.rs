//! CLI integration tests against the real helmsift binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RENDERED: &str = "\
# Source: cert-manager/templates/serviceaccount.yaml
apiVersion: v1
kind: ServiceAccount
metadata:
  name: cert-manager
---
# Source: cert-manager/templates/webhook-serviceaccount.yaml
apiVersion: v1
kind: ServiceAccount
metadata:
  name: cert-manager-webhook
---
# Source: cert-manager/templates/webhook-validating-webhook.yaml
apiVersion: admissionregistration.k8s.io/v1
kind: ValidatingWebhookConfiguration
metadata:
  name: cert-manager-webhook
---
# Source: cert-manager/templates/deployment.yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: cert-manager
";

const FILTERED: &str = "\
# Source: cert-manager/templates/serviceaccount.yaml
apiVersion: v1
kind: ServiceAccount
metadata:
  name: cert-manager
---
# Source: cert-manager/templates/deployment.yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: cert-manager
";

/// Binary running in `dir` with no inherited helmsift configuration.
#[allow(deprecated)]
fn helmsift_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("helmsift").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    for var in [
        "HELMSIFT_HELM",
        "HELMSIFT_CHART",
        "HELMSIFT_CHART_VERSION",
        "HELMSIFT_NAMESPACE",
        "HELMSIFT_OUTPUT",
        "HELMSIFT_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_output() {
    let dir = TempDir::new().unwrap();
    helmsift_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("filter"))
        .stdout(predicate::str::contains("rules"));
}

#[test]
fn test_version_output() {
    let dir = TempDir::new().unwrap();
    helmsift_cmd(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rules_lists_default_markers() {
    let dir = TempDir::new().unwrap();
    helmsift_cmd(dir.path())
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("cert-manager-webhook"))
        .stdout(predicate::str::contains("kind: MutatingWebhookConfiguration"))
        .stdout(predicate::str::contains("unless 'kind: ServiceAccount'"));
}

#[test]
fn test_filter_stdin_to_stdout() {
    let dir = TempDir::new().unwrap();
    helmsift_cmd(dir.path())
        .arg("filter")
        .write_stdin("A\n---\nkind: Deployment\nname: cert-manager-webhook\n---\nB")
        .assert()
        .success()
        .stdout("A\n---\nB")
        .stderr(predicate::str::contains("Removed 1 documents."));
}

#[test]
fn test_filter_file_skips_identical_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("rendered.yaml");
    let output = dir.path().join("out").join("filtered.yaml");
    fs::write(&input, RENDERED).unwrap();

    helmsift_cmd(dir.path())
        .args(["filter", "rendered.yaml", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Successfully generated"))
        .stderr(predicate::str::contains("Removed 2 documents."));
    assert_eq!(fs::read_to_string(&output).unwrap(), FILTERED);

    helmsift_cmd(dir.path())
        .args(["filter", "rendered.yaml", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("YAML content unchanged, skipping write."));
}

#[test]
fn test_filter_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    helmsift_cmd(dir.path())
        .args(["filter", "missing.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("An error occurred:"));
}

#[test]
fn test_explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    helmsift_cmd(dir.path())
        .args(["--config", "nope.yml", "rules"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_config_file_changes_rules() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("helmsift.yml"),
        "rules:\n  component: cert-manager-cainjector\n",
    )
    .unwrap();

    helmsift_cmd(dir.path())
        .arg("filter")
        .write_stdin("kind: Deployment\nname: cert-manager-webhook\n---\nkind: Deployment\nname: cert-manager-cainjector")
        .assert()
        .success()
        .stdout("kind: Deployment\nname: cert-manager-webhook");
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("helmsift.yml"), "render:\n  namespace: Not_Valid\n").unwrap();

    helmsift_cmd(dir.path())
        .arg("rules")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[cfg(unix)]
mod generate {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn fake_helm(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-helm");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_generate_writes_then_skips() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rendered.yaml"), RENDERED).unwrap();
        let helm = fake_helm(dir.path(), "cat rendered.yaml");
        let output = dir.path().join("k8s").join("cert-manager-filtered.yaml");

        helmsift_cmd(dir.path())
            .arg("generate")
            .arg("--helm")
            .arg(&helm)
            .assert()
            .success()
            .stdout(predicate::str::contains("Successfully generated"))
            .stdout(predicate::str::contains("Removed 2 webhook configurations."));
        assert_eq!(fs::read_to_string(&output).unwrap(), FILTERED);

        helmsift_cmd(dir.path())
            .env("HELMSIFT_HELM", &helm)
            .arg("generate")
            .assert()
            .success()
            .stdout(predicate::str::contains("YAML content unchanged, skipping write."))
            .stdout(predicate::str::contains("(Up to date)"));
    }

    #[test]
    fn test_generate_passes_overrides_to_helm() {
        let dir = TempDir::new().unwrap();
        let helm = fake_helm(dir.path(), "echo \"$@\" > args.txt");

        helmsift_cmd(dir.path())
            .arg("generate")
            .arg("--helm")
            .arg(&helm)
            .args(["--chart-version", "v1.15.0", "-n", "security", "--set", "installCRDs=true"])
            .args(["-o", "out.yaml"])
            .assert()
            .success();

        let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert_eq!(
            args.trim(),
            "template cert-manager jetstack/cert-manager --version v1.15.0 --namespace security \
             --set webhook.enabled=false --set startupapicheck.enabled=false --set installCRDs=true"
        );
    }

    #[test]
    fn test_generate_reports_helm_failure() {
        let dir = TempDir::new().unwrap();
        let helm = fake_helm(dir.path(), "echo 'Error: repo jetstack not found' >&2\nexit 1");
        let output = dir.path().join("out.yaml");
        fs::write(&output, "previous").unwrap();

        helmsift_cmd(dir.path())
            .arg("generate")
            .arg("--helm")
            .arg(&helm)
            .arg("--output")
            .arg(&output)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error running Helm:"))
            .stderr(predicate::str::contains("Error: repo jetstack not found"));

        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_generate_missing_helm_binary() {
        let dir = TempDir::new().unwrap();

        helmsift_cmd(dir.path())
            .args(["generate", "--helm", "/nonexistent/helmsift/helm"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("An error occurred:"))
            .stderr(predicate::str::contains("Failed to run /nonexistent/helmsift/helm"))
            .stderr(predicate::str::contains("Error running Helm:").not());
    }
}
