use folio_core::{load_env_config, FolioConfig};
use folio_mail::MailSettings;
use folio_media::MediaSettings;

pub const ENV_PREFIX: &str = "FOLIO__";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "3001";

/// Variables a host platform sets directly, mapped onto config keys.
const WELL_KNOWN: [(&str, &str); 3] = [
    ("PORT", "http.port"),
    ("EMAIL_USER", "mail.user"),
    ("EMAIL_PASS", "mail.pass"),
];

/// Fill every key that is still unset.
pub fn defaults(config: &mut FolioConfig) {
    let media = MediaSettings::default();
    let mail = MailSettings::default();

    config.set_default("http.host", DEFAULT_HOST);
    config.set_default("http.port", DEFAULT_PORT);
    config.set_default("app.env", "development");
    config.set_default("media.root", "public");
    config.set_default("media.origin", media.origin);
    config.set_default("media.placeholder", media.placeholder_url);
    config.set_default(
        "media.probe_timeout_ms",
        media.probe_timeout.as_millis().to_string(),
    );
    config.set_default("mail.relay", folio_mail::DEFAULT_SMTP_RELAY);
    config.set_default("mail.from_name", mail.from_name);
    config.set_default(
        "mail.sandbox_capacity",
        folio_mail::DEFAULT_SANDBOX_CAPACITY.to_string(),
    );
    config.set_default("resume.path", "public/files/resume/resume.pdf");
    config.set_default("client.dir", "public/client");
}

fn apply_well_known<F>(config: &mut FolioConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in WELL_KNOWN {
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(var, key, "config override from well-known variable");
            config.set(key, value);
        }
    }
}

/// `FOLIO__*` overrides, then `PORT` / `EMAIL_USER` / `EMAIL_PASS`, then
/// defaults for whatever is left.
pub fn load() -> FolioConfig {
    let mut config = FolioConfig::new();
    load_env_config(&mut config, ENV_PREFIX);
    apply_well_known(&mut config, |var| std::env::var(var).ok());
    defaults(&mut config);
    config
}
