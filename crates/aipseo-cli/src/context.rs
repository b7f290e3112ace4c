//! Per-invocation command context
//!
//! Every handler receives one [`Context`] holding its output writers, the
//! API client, and the interactive collaborators (password prompt and
//! browser). Tests swap those for in-memory versions.

use seo_api::ApiClient;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;
use wallet_core::{SecretString, WalletStore};

use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::output::{Output, OutputFormat};

/// Source of wallet passwords
pub trait PasswordPrompt: Send {
    /// Ask for a password with the given prompt
    fn prompt(&mut self, prompt: &str) -> Result<SecretString>;
}

/// Reads passwords from the terminal without echo
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn prompt(&mut self, prompt: &str) -> Result<SecretString> {
        let password = rpassword::prompt_password(prompt)?;
        Ok(SecretString::new(password))
    }
}

/// Answers every prompt with the same password
///
/// Used for `--password` / `AIPSEO_WALLET_PASSWORD`.
pub struct FixedPassword(SecretString);

impl FixedPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(SecretString::new(password.into()))
    }
}

impl PasswordPrompt for FixedPassword {
    fn prompt(&mut self, _prompt: &str) -> Result<SecretString> {
        Ok(SecretString::new(self.0.expose().to_string()))
    }
}

/// Opens URLs for the user
pub trait Browser: Send {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the platform's default handler
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        debug!("Opening {} in the default browser", url);
        open::that(url)?;
        Ok(())
    }
}

/// Records opened URLs instead of opening them
#[derive(Debug, Clone, Default)]
pub struct RecordingBrowser {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingBrowser {
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Browser for RecordingBrowser {
    fn open(&self, url: &str) -> Result<()> {
        let mut opened = self
            .opened
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        opened.push(url.to_string());
        Ok(())
    }
}

/// Everything a command handler needs
pub struct Context {
    pub output: Output,
    pub api: ApiClient,
    pub settings: Settings,
    pub wallets: WalletStore,
    prompt: Box<dyn PasswordPrompt>,
    browser: Box<dyn Browser>,
}

impl Context {
    /// Context writing to stdio, prompting on the terminal
    pub fn new(format: OutputFormat, api: ApiClient, settings: Settings) -> Self {
        Self {
            output: Output::stdio(format),
            api,
            settings,
            wallets: WalletStore::new(),
            prompt: Box::new(TerminalPrompt),
            browser: Box::new(SystemBrowser),
        }
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn with_prompt(mut self, prompt: impl PasswordPrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn with_browser(mut self, browser: impl Browser + 'static) -> Self {
        self.browser = Box::new(browser);
        self
    }

    pub fn with_wallet_store(mut self, wallets: WalletStore) -> Self {
        self.wallets = wallets;
        self
    }

    /// Wallet file to use: the explicit path or the configured default
    pub fn wallet_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.settings.wallet_path.clone())
    }

    /// Ask for a password once
    pub fn password(&mut self, prompt: &str) -> Result<SecretString> {
        self.prompt.prompt(prompt)
    }

    /// Ask for a new password twice; both entries must match
    pub fn new_password(&mut self) -> Result<SecretString> {
        let password = self.prompt.prompt("Enter wallet password: ")?;
        let confirmation = self.prompt.prompt("Confirm wallet password: ")?;
        if password.expose() != confirmation.expose() {
            return Err(CliError::PasswordMismatch);
        }
        Ok(password)
    }

    /// Decrypt the wallet id stored at `path`
    pub async fn unlock_wallet(&mut self, path: &Path) -> Result<SecretString> {
        if !WalletStore::exists(path) {
            return Err(CliError::FileNotFound(path.to_path_buf()));
        }
        let password = self.password("Enter wallet password: ")?;
        let wallet_id = self.wallets.read(path, password.expose()).await?;
        debug!("Unlocked wallet {:?}", path);
        Ok(wallet_id)
    }

    pub fn open_browser(&self, url: &str) -> Result<()> {
        self.browser.open(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_api::MockBackend;
    use tempfile::TempDir;
    use wallet_core::KeyDerivationParams;

    /// Replays scripted answers
    struct Scripted(Vec<&'static str>);

    impl PasswordPrompt for Scripted {
        fn prompt(&mut self, _prompt: &str) -> Result<SecretString> {
            Ok(SecretString::new(self.0.remove(0).to_string()))
        }
    }

    fn context() -> Context {
        let api = ApiClient::new(Arc::new(MockBackend::seeded(7)));
        let (output, _) = Output::captured(OutputFormat::Pretty);
        Context::new(OutputFormat::Pretty, api, Settings::default())
            .with_output(output)
            .with_wallet_store(WalletStore::with_params(KeyDerivationParams { iterations: 1_000 }))
    }

    #[test]
    fn test_new_password_requires_confirmation() {
        let mut ctx = context().with_prompt(Scripted(vec!["secret-one", "secret-two"]));
        assert!(matches!(ctx.new_password(), Err(CliError::PasswordMismatch)));

        let mut ctx = context().with_prompt(Scripted(vec!["same", "same"]));
        assert_eq!(ctx.new_password().unwrap().expose(), "same");
    }

    #[test]
    fn test_wallet_path_falls_back_to_settings() {
        let ctx = context();
        assert_eq!(ctx.wallet_path(None), PathBuf::from(".wallet.json"));
        assert_eq!(
            ctx.wallet_path(Some(Path::new("other.json"))),
            PathBuf::from("other.json")
        );
    }

    #[tokio::test]
    async fn test_unlock_wallet() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wallet.json");
        let mut ctx = context().with_prompt(FixedPassword::new("hunter22"));

        let err = ctx.unlock_wallet(&path).await.unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));

        ctx.wallets.write(&path, "w_abc123", "hunter22").await.unwrap();
        let wallet_id = ctx.unlock_wallet(&path).await.unwrap();
        assert_eq!(wallet_id.expose(), "w_abc123");
    }

    #[test]
    fn test_recording_browser() {
        let browser = RecordingBrowser::default();
        let ctx = context().with_browser(browser.clone());
        ctx.open_browser("https://checkout.example/1").unwrap();
        assert_eq!(browser.opened(), vec!["https://checkout.example/1".to_string()]);
    }
}
