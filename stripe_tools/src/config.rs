use apg_common::Secret;

#[derive(Debug, Clone, Default)]
pub struct StripeConfig {
    /// The workflow endpoint that turns a sanitized cart into a Stripe checkout session.
    /// Kept secret, since anyone holding the URL can open sessions against the store.
    pub webhook_url: Secret<String>,
}

impl StripeConfig {
    pub fn new(webhook_url: &str) -> Self {
        Self { webhook_url: Secret::new(webhook_url.to_string()) }
    }
}
