use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the raw `{"cards": [...]}` payload comes from.
#[async_trait]
pub trait CardSource: Send + Sync {
    /// Human readable origin, used in logs and load errors.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<C: Confirm + ?Sized> Confirm for &mut C {
    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

/// Answers every prompt the same way (`--yes`, scripted sessions, tests).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

pub trait ConfigProvider: Send + Sync {
    fn source_location(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn default_category(&self) -> Option<&str>;
    fn bar_width(&self) -> usize;
    fn export_path(&self) -> &str;
}
