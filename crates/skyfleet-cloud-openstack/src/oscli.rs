//! openstack CLI wrapper
//!
//! Wraps the `openstack` CLI with JSON output. Credentials are injected
//! into each invocation's environment; nothing is read from the calling
//! process environment.

use crate::error::{OpenStackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Connection settings handed to every invocation.
#[derive(Debug, Clone)]
pub struct OsAuth {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub project: String,
    pub domain: String,
}

/// openstack CLI wrapper
pub struct OsCli {
    auth: OsAuth,
}

impl OsCli {
    pub fn new(auth: OsAuth) -> Self {
        Self { auth }
    }

    /// Check that the CLI is installed and the credentials authenticate.
    pub async fn check_auth(&self) -> Result<()> {
        let which = Command::new("which").arg("openstack").output().await?;
        if !which.status.success() {
            return Err(OpenStackError::CliNotFound);
        }

        match self.run_json(&["token", "issue"]).await {
            Ok(_) => Ok(()),
            Err(OpenStackError::CommandFailed(m)) => {
                Err(OpenStackError::AuthenticationFailed(m))
            }
            Err(e) => Err(e),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("openstack");
        cmd.args(args);
        cmd.env("OS_AUTH_URL", &self.auth.auth_url);
        cmd.env("OS_USERNAME", &self.auth.username);
        cmd.env("OS_PASSWORD", &self.auth.password);
        cmd.env("OS_PROJECT_NAME", &self.auth.project);
        cmd.env("OS_USER_DOMAIN_NAME", &self.auth.domain);
        cmd.env("OS_PROJECT_DOMAIN_NAME", &self.auth.domain);
        cmd.env("OS_IDENTITY_API_VERSION", "3");
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }

    /// Run a command with JSON output and return stdout.
    pub async fn run_json(&self, args: &[&str]) -> Result<String> {
        let mut full = args.to_vec();
        full.extend_from_slice(&["-f", "json"]);
        self.run(&full).await
    }

    /// Run a command and return stdout.
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("running: openstack {}", args.join(" "));

        let output = self.command(args).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OpenStackError::CommandFailed(stderr.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn parse_rows<T: serde::de::DeserializeOwned>(output: &str) -> Result<Vec<T>> {
        if output.trim().is_empty() || output.trim() == "[]" {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(output)?)
    }

    /// Hypervisor inventory with administrative state and address.
    pub async fn hypervisor_list(&self) -> Result<Vec<HypervisorRow>> {
        let output = self.run_json(&["hypervisor", "list", "--long"]).await?;
        Self::parse_rows(&output)
    }

    /// Servers scheduled on one host. An idle host yields an empty list.
    pub async fn server_list_on_host(&self, hostname: &str) -> Result<Vec<ServerRow>> {
        let output = self
            .run_json(&["server", "list", "--all-projects", "--host", hostname])
            .await?;
        Self::parse_rows(&output)
    }

    pub async fn server_list(&self) -> Result<Vec<ServerRow>> {
        let output = self.run_json(&["server", "list"]).await?;
        Self::parse_rows(&output)
    }

    pub async fn server_list_named(&self, name: &str) -> Result<Vec<ServerRow>> {
        let output = self.run_json(&["server", "list", "--name", name]).await?;
        Self::parse_rows(&output)
    }

    pub async fn server_create(
        &self,
        name: &str,
        image_id: &str,
        flavor_id: &str,
        network_id: &str,
    ) -> Result<CreatedRow> {
        let output = self
            .run_json(&[
                "server", "create", "--image", image_id, "--flavor", flavor_id, "--network",
                network_id, name,
            ])
            .await?;
        Ok(serde_json::from_str(&output)?)
    }

    /// Evacuate one instance off its dead host. The scheduler picks the
    /// target; shared storage is assumed.
    pub async fn server_evacuate(&self, id: &str) -> Result<()> {
        self.run(&["server", "evacuate", "--shared-storage", id])
            .await?;
        Ok(())
    }

    pub async fn flavor_list(&self) -> Result<Vec<NamedRow>> {
        let output = self.run_json(&["flavor", "list"]).await?;
        Self::parse_rows(&output)
    }

    pub async fn network_list(&self) -> Result<Vec<NamedRow>> {
        let output = self.run_json(&["network", "list"]).await?;
        Self::parse_rows(&output)
    }

    pub async fn image_list(&self) -> Result<Vec<ImageRow>> {
        let output = self.run_json(&["image", "list"]).await?;
        Self::parse_rows(&output)
    }

    pub async fn image_create_from_file(
        &self,
        name: &str,
        file: &Path,
        disk_format: &str,
        container_format: &str,
        properties: &[(String, String)],
    ) -> Result<CreatedRow> {
        let file = file.to_string_lossy().into_owned();
        let mut args = vec![
            "image",
            "create",
            "--disk-format",
            disk_format,
            "--container-format",
            container_format,
            "--file",
            file.as_str(),
        ];

        let props: Vec<String> = properties
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        for p in &props {
            args.push("--property");
            args.push(p.as_str());
        }
        args.push(name);

        let output = self.run_json(&args).await?;
        Ok(serde_json::from_str(&output)?)
    }

    pub async fn image_delete(&self, id: &str) -> Result<()> {
        self.run(&["image", "delete", id]).await?;
        Ok(())
    }

    pub async fn volume_list(&self) -> Result<Vec<VolumeRow>> {
        let output = self.run_json(&["volume", "list", "--long"]).await?;
        Self::parse_rows(&output)
    }

    pub async fn volume_create(
        &self,
        name: &str,
        size_gb: u32,
        description: Option<&str>,
        metadata: &[(String, String)],
    ) -> Result<CreatedRow> {
        let size = size_gb.to_string();
        let mut args = vec!["volume", "create", "--size", size.as_str()];

        if let Some(desc) = description {
            args.push("--description");
            args.push(desc);
        }

        let props: Vec<String> = metadata.iter().map(|(k, v)| format!("{k}={v}")).collect();
        for p in &props {
            args.push("--property");
            args.push(p.as_str());
        }
        args.push(name);

        let output = self.run_json(&args).await?;
        Ok(serde_json::from_str(&output)?)
    }

    pub async fn volume_delete(&self, id: &str) -> Result<()> {
        self.run(&["volume", "delete", id]).await?;
        Ok(())
    }

    pub async fn stack_list(&self) -> Result<Vec<StackRow>> {
        let output = self.run_json(&["stack", "list"]).await?;
        Self::parse_rows(&output)
    }

    pub async fn stack_create(&self, name: &str, template_file: &Path) -> Result<CreatedRow> {
        let file = template_file.to_string_lossy().into_owned();
        let output = self
            .run_json(&["stack", "create", "-t", file.as_str(), name])
            .await?;
        Ok(serde_json::from_str(&output)?)
    }

    pub async fn stack_delete(&self, id: &str) -> Result<()> {
        self.run(&["stack", "delete", "--yes", id]).await?;
        Ok(())
    }

    pub async fn metric_list(&self) -> Result<Vec<MetricRow>> {
        let output = self.run_json(&["metric", "list"]).await?;
        Self::parse_rows(&output)
    }

    pub async fn user_list(&self) -> Result<Vec<NamedRow>> {
        let output = self.run_json(&["user", "list"]).await?;
        Self::parse_rows(&output)
    }
}

/// Hypervisor listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypervisorRow {
    #[serde(rename = "Hypervisor Hostname")]
    pub hostname: String,

    #[serde(rename = "State")]
    pub state: String,

    #[serde(rename = "Host IP", default)]
    pub host_ip: Option<String>,
}

/// Server listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerRow {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

/// Generic name/id listing row (flavors, networks, users)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRow {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,
}

/// Image listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRow {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

/// Volume listing row (from `volume list --long`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeRow {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "Size", default)]
    pub size: u32,
}

/// Stack listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackRow {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Stack Name")]
    pub name: String,

    #[serde(rename = "Stack Status")]
    pub status: String,
}

/// Metric listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRow {
    pub name: String,

    #[serde(default)]
    pub resource_id: String,

    #[serde(default)]
    pub unit: String,
}

/// Create-call response (lowercase keys in show/create output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRow {
    pub id: String,

    #[serde(default, alias = "stack_status")]
    pub status: Option<String>,
}
