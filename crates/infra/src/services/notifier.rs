use adslot_domain::Channel;
use serde::Serialize;
use std::sync::Mutex;

/// A fully resolved reminder ready for delivery. Rendering the actual email
/// or SMS body is the gateway's concern, the engine only produces the
/// structured fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub channel: Channel,
    pub address: String,
    pub subject: String,
    pub body: String,
}

#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Delivers notifications by POSTing them to an external gateway which owns
/// templating and transport.
pub struct GatewayNotifier {
    client: reqwest::Client,
    url: String,
    key: String,
}

impl GatewayNotifier {
    pub fn new(url: String, key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            key,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for GatewayNotifier {
    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.url)
            .header("adslot-gateway-key", &self.key)
            .json(notification)
            .send()
            .await?;
        if !res.status().is_success() {
            anyhow::bail!("Notification gateway returned status: {}", res.status());
        }
        Ok(())
    }
}

/// Records notifications instead of delivering them. Used when no gateway is
/// configured and as the test double; `fail_sends` makes every send error so
/// dispatch failure paths can be exercised.
pub struct InMemoryNotifier {
    sent: Mutex<Vec<Notification>>,
    fail_with: Mutex<Option<String>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail_with: Mutex::new(None),
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_sends(&self, reason: &str) {
        *self.fail_with.lock().unwrap() = Some(reason.to_string());
    }

    pub fn restore_sends(&self) {
        *self.fail_with.lock().unwrap() = None;
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        if let Some(reason) = self.fail_with.lock().unwrap().clone() {
            anyhow::bail!("{}", reason);
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
