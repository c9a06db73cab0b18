//! ICMP reachability prober

use async_trait::async_trait;
use skyfleet_cloud::Prober;
use tokio::process::Command;

/// Bounded ping probe: 3 attempts within a 5-second window by default.
#[derive(Debug, Clone)]
pub struct PingProber {
    pub attempts: u32,
    pub timeout_secs: u32,
}

impl Default for PingProber {
    fn default() -> Self {
        Self {
            attempts: 3,
            timeout_secs: 5,
        }
    }
}

#[async_trait]
impl Prober for PingProber {
    async fn reachable(&self, address: &str) -> bool {
        let count = self.attempts.to_string();
        let timeout = self.timeout_secs.to_string();

        let mut cmd = Command::new("ping");
        if cfg!(target_os = "macos") {
            // BSD ping has no deadline flag; -t bounds the run in seconds
            cmd.args(["-c", &count, "-t", &timeout]);
        } else {
            cmd.args(["-c", &count, "-w", &timeout]);
        }
        cmd.arg(address);

        match cmd.output().await {
            Ok(output) => {
                tracing::debug!(
                    "ping {address} exited {:?}",
                    output.status.code()
                );
                output.status.success()
            }
            Err(e) => {
                tracing::warn!("ping {address} could not run: {e}");
                false
            }
        }
    }
}
