//! AMQP work queue publisher

use crate::domain::jobs::{AnalysisJob, JobPublisher};
use anyhow::{Context, Result};
use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, ConfirmSelectOptions, QueueDeclareOptions};
use lapin::publisher_confirm::Confirmation;
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};

/// AMQP delivery mode for messages that survive a broker restart
const PERSISTENT: u8 = 2;

/// Publishes analysis jobs to a durable queue through the default exchange
pub struct AmqpJobPublisher {
    // Kept alive for the lifetime of the channel
    _connection: Connection,
    channel: Channel,
    queue: String,
}

impl AmqpJobPublisher {
    /// Connect and declare the destination queue
    pub async fn connect(url: &str, queue: &str) -> Result<Self> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .context("failed to connect to AMQP broker")?;
        let channel = connection
            .create_channel()
            .await
            .context("failed to open AMQP channel")?;
        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await
            .context("failed to enable publisher confirms")?;

        // Declaring is idempotent for identical arguments
        channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .with_context(|| format!("failed to declare queue '{}'", queue))?;

        tracing::info!(queue, "work queue declared");
        Ok(Self {
            _connection: connection,
            channel,
            queue: queue.to_string(),
        })
    }
}

#[async_trait]
impl JobPublisher for AmqpJobPublisher {
    async fn publish(&self, job: &AnalysisJob) -> Result<()> {
        let body = serde_json::to_vec(job)?;
        let confirm = self
            .channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions {
                    mandatory: true,
                    ..BasicPublishOptions::default()
                },
                &body,
                BasicProperties::default()
                    .with_content_type("application/json".into())
                    .with_delivery_mode(PERSISTENT),
            )
            .await?;
        accepted(confirm.await?, &self.queue)?;

        tracing::debug!(queue = %self.queue, job_id = %job.job_id, "job published");
        Ok(())
    }
}

/// Only a plain ack means the broker took ownership of the message
fn accepted(confirmation: Confirmation, queue: &str) -> Result<()> {
    match confirmation {
        Confirmation::Ack(None) => Ok(()),
        Confirmation::Ack(Some(_)) => {
            anyhow::bail!("message for queue '{}' was returned as unroutable", queue)
        }
        Confirmation::Nack(_) => anyhow::bail!("broker rejected message for queue '{}'", queue),
        Confirmation::NotRequested => {
            anyhow::bail!("publisher confirms are not enabled on the channel")
        }
    }
}
